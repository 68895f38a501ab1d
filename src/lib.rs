pub mod error;
pub mod value;
pub mod ver;
pub mod versions;

pub use error::{Error, ErrorKind, Field};
pub use value::Value;
pub use ver::{parse, Version, RAW_SIZE};
pub use versions::Versions;
