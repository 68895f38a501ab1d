use core::fmt::{self, Display};
use thiserror::Error;

/// One of the four positional components of a version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Build,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
            Field::Build => "build",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The dotted string is malformed.
    Format,
    /// A column value of the wrong type was scanned.
    Type,
    /// A column value outside the encodable range was scanned.
    Range,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no major.minor elements found")]
    MissingElements,

    /// `raw` is the offending part exactly as it appeared in the input,
    /// quoted with Rust's `Debug` escaping: ASCII control characters and
    /// non-printable code points render as `\u{..}`.
    #[error("invalid {field} number: {raw:?}")]
    InvalidNumber { field: Field, raw: String },

    #[error("invalid type")]
    InvalidType { found: &'static str },

    #[error("value must be positive")]
    Negative(i64),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingElements | Error::InvalidNumber { .. } => ErrorKind::Format,
            Error::InvalidType { .. } => ErrorKind::Type,
            Error::Negative(_) => ErrorKind::Range,
        }
    }
}
