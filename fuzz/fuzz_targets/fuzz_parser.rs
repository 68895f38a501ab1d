#![no_main]
use libfuzzer_sys::fuzz_target;
use ver_rs::{Value, Version};

const MAX_INPUT_SIZE: usize = 1024;

fn do_fuzz(data: &[u8]) {
    if data.len() > MAX_INPUT_SIZE {
        return;
    }
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(v) = ver_rs::parse(s) {
            let _ = v.to_string();
            let mut back = Version::default();
            let _res = back.scan(&v.value());
        }
    }
    // scan accepts exactly the non-negative ordinals
    if let Some(v) = Version::from_raw(data) {
        let mut back = Version::default();
        let ord = v.ordinal();
        assert_eq!(back.scan(&Value::Integer(ord)).is_ok(), ord >= 0);
    }
}

fuzz_target!(|data: &[u8]| {
    do_fuzz(data);
});
