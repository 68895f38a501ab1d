use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use ver_rs::{parse, Value, Version, Versions};

/// Parse, compare, sort and encode major.minor.patch.build versions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical form of each version
    Parse {
        inputs: Vec<String>,
        /// Print the fields as JSON instead
        #[arg(short, long)]
        json: bool,
    },
    /// Print -1, 0 or 1
    Compare { a: String, b: String },
    /// Print the versions in ascending order
    Sort {
        inputs: Vec<String>,
        #[arg(short, long)]
        reverse: bool,
    },
    /// Print the integer encoding of a version
    Encode { input: String },
    /// Decode an integer encoding
    Decode {
        #[arg(allow_hyphen_values = true)]
        ordinal: i64,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Version(#[from] ver_rs::Error),
    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn run(cmd: Command, out: &mut impl Write) -> Result<(), CliError> {
    match cmd {
        Command::Parse { inputs, json } => {
            for i in inputs {
                let v = parse(&i)?;
                if json {
                    let s = serde_json::to_string(&v)?;
                    writeln!(out, "{s}")?;
                } else {
                    writeln!(out, "{v}")?;
                }
            }
        }
        Command::Compare { a, b } => {
            let a = parse(&a)?;
            let b = parse(&b)?;
            writeln!(out, "{}", a.compare(&b))?;
        }
        Command::Sort { inputs, reverse } => {
            let mut list = inputs
                .iter()
                .map(|i| parse(i))
                .collect::<Result<Versions, ver_rs::Error>>()?;
            list.sort();
            if reverse {
                list.reverse();
            }
            debug!("sorted {} versions", list.len());
            for v in &list {
                writeln!(out, "{v}")?;
            }
        }
        Command::Encode { input } => {
            let v = parse(&input)?;
            writeln!(out, "{}", v.ordinal())?;
        }
        Command::Decode { ordinal } => {
            let mut v = Version::default();
            v.scan(&Value::Integer(ordinal))?;
            writeln!(out, "{v}")?;
        }
    }
    Ok(())
}

/// Reports a failed command on `err` and maps the outcome to an exit status.
fn status(res: Result<(), CliError>, err: &mut impl Write) -> u8 {
    match res {
        Ok(()) => 0,
        Err(e) => {
            if let CliError::Version(v) = &e {
                debug!(kind = ?v.kind(), "command failed");
            }
            let _ = writeln!(err, "{e}");
            1
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let res = run(args.cmd, &mut io::stdout().lock());
    ExitCode::from(status(res, &mut io::stderr().lock()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ver_rs::ErrorKind;

    fn exec(argv: &[&str]) -> (u8, String, String) {
        let args = Args::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = status(run(args.cmd, &mut out), &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn kind(res: Result<(), CliError>) -> ErrorKind {
        match res {
            Err(CliError::Version(e)) => e.kind(),
            other => panic!("expected a version error, got {other:?}"),
        }
    }

    #[test]
    fn parse_prints_canonical_form() {
        let (code, out, err) = exec(&["ver", "parse", "v1.2", "1.3.3.7", "1.2.3.0"]);
        assert_eq!(code, 0);
        assert_eq!(out, "1.2.0\n1.3.3.7\n1.2.3\n");
        assert_eq!(err, "");
    }

    #[test]
    fn parse_json() {
        let (code, out, _) = exec(&["ver", "parse", "--json", "8.5.1"]);
        assert_eq!(code, 0);
        assert_eq!(out, "{\"major\":8,\"minor\":5,\"patch\":1,\"build\":0}\n");
    }

    #[test]
    fn parse_missing_minor() {
        let cmd = Command::Parse {
            inputs: vec!["1".into()],
            json: false,
        };
        let res = run(cmd, &mut Vec::new());
        assert!(matches!(
            res,
            Err(CliError::Version(ver_rs::Error::MissingElements))
        ));

        let (code, out, err) = exec(&["ver", "parse", "1"]);
        assert_eq!(code, 1);
        assert_eq!(out, "");
        assert_eq!(err, "no major.minor elements found\n");
    }

    #[test]
    fn compare() {
        assert_eq!(exec(&["ver", "compare", "1.2", "1.2.1"]).1, "-1\n");
        assert_eq!(exec(&["ver", "compare", "2.0.1", "1.2.1"]).1, "1\n");
        assert_eq!(exec(&["ver", "compare", "v1.2", "1.2.0.0"]).1, "0\n");

        let (code, _, err) = exec(&["ver", "compare", "1.2", "1.x"]);
        assert_eq!(code, 1);
        assert_eq!(err, "invalid minor number: \"x\"\n");
    }

    #[test]
    fn sort() {
        let (code, out, _) = exec(&["ver", "sort", "2.0", "1.10", "1.2.3.4", "0.9"]);
        assert_eq!(code, 0);
        assert_eq!(out, "0.9.0\n1.2.3.4\n1.10.0\n2.0.0\n");

        let (code, out, _) = exec(&["ver", "sort", "1.0", "0.5", "--reverse"]);
        assert_eq!(code, 0);
        assert_eq!(out, "1.0.0\n0.5.0\n");
    }

    #[test]
    fn sort_stops_at_bad_input() {
        let cmd = Command::Sort {
            inputs: vec!["1.0".into(), "1.0.a".into()],
            reverse: false,
        };
        let mut out = Vec::new();
        assert_eq!(kind(run(cmd, &mut out)), ErrorKind::Format);
        assert!(out.is_empty());
    }

    #[test]
    fn encode() {
        let (code, out, _) = exec(&["ver", "encode", "8.5.1"]);
        assert_eq!(code, 0);
        assert_eq!(out, "8005001000\n");
        assert_eq!(
            Version::new(8, 5, 1, 0).value(),
            Value::Integer(8005001000)
        );
    }

    #[test]
    fn decode() {
        let (code, out, _) = exec(&["ver", "decode", "8005001000"]);
        assert_eq!(code, 0);
        assert_eq!(out, "8.5.1\n");
    }

    #[test]
    fn decode_negative() {
        let res = run(Command::Decode { ordinal: -5 }, &mut Vec::new());
        assert_eq!(kind(res), ErrorKind::Range);

        let (code, out, err) = exec(&["ver", "decode", "--", "-5"]);
        assert_eq!(code, 1);
        assert_eq!(out, "");
        assert_eq!(err, "value must be positive\n");
    }
}
