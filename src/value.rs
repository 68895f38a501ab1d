//! Integer column codec.
//!
//! A [`Version`] is stored as its ordinal in an integer column. [`Value`] is
//! the dynamically typed cell a storage driver hands back when reading.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Error;
use crate::ver::{Version, MAJOR_WEIGHT, MINOR_WEIGHT, PATCH_WEIGHT};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Bool(bool),
    Bytes(Vec<u8>),
    Text(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
        }
    }
}

impl Version {
    /// Encodes the version for an integer column.
    pub fn value(&self) -> Value {
        Value::Integer(self.ordinal())
    }

    /// Decodes an integer column into `self`.
    ///
    /// `self` is left untouched unless `src` is a non-negative integer.
    /// Components above 999 (other than major) do not survive the round trip.
    pub fn scan(&mut self, src: &Value) -> Result<(), Error> {
        let n = match src {
            Value::Integer(n) => *n,
            other => {
                return Err(Error::InvalidType {
                    found: other.type_name(),
                })
            }
        };
        if n < 0 {
            return Err(Error::Negative(n));
        }

        self.major = n / MAJOR_WEIGHT;
        self.minor = (n % MAJOR_WEIGHT) / MINOR_WEIGHT;
        self.patch = ((n % MAJOR_WEIGHT) % MINOR_WEIGHT) / PATCH_WEIGHT;
        self.build = ((n % MAJOR_WEIGHT) % MINOR_WEIGHT) % PATCH_WEIGHT;
        trace!(ordinal = n, version = %self, "scanned version");
        Ok(())
    }
}

impl From<Version> for Value {
    fn from(v: Version) -> Self {
        v.value()
    }
}

impl TryFrom<&Value> for Version {
    type Error = Error;

    fn try_from(src: &Value) -> Result<Self, Self::Error> {
        let mut v = Version::default();
        v.scan(src)?;
        Ok(v)
    }
}
