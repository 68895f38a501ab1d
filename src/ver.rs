//! The four-component version number.
//!
//! Ordering and the persisted integer form go through the ordinal,
//! `major * 10^9 + minor * 10^6 + patch * 10^3 + build`. Components are
//! expected to stay below 1000 (major below 10^6); larger values are accepted
//! but collide with their neighbours. `==` and `Hash` stay field-wise, so two
//! colliding versions are [`Version::equals`] without being `==`.

use core::cmp::Ordering;
use core::fmt::{self, Display};
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zerocopy::{FromBytes, IntoBytes};
use zerocopy_derive::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::{Error, Field};

pub(crate) const MAJOR_WEIGHT: i64 = 1_000_000_000;
pub(crate) const MINOR_WEIGHT: i64 = 1_000_000;
pub(crate) const PATCH_WEIGHT: i64 = 1_000;

/// Size of the raw record in bytes, see [`Version::as_raw`].
pub const RAW_SIZE: usize = core::mem::size_of::<Version>();

#[derive(
    IntoBytes,
    FromBytes,
    Immutable,
    KnownLayout,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
)]
#[repr(C)]
pub struct Version {
    pub major: i64,
    pub minor: i64,
    pub patch: i64,
    pub build: i64,
}

impl Version {
    pub const fn new(major: i64, minor: i64, patch: i64, build: i64) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Single integer the total order is defined on. Wraps on overflow.
    pub fn ordinal(&self) -> i64 {
        self.major
            .wrapping_mul(MAJOR_WEIGHT)
            .wrapping_add(self.minor.wrapping_mul(MINOR_WEIGHT))
            .wrapping_add(self.patch.wrapping_mul(PATCH_WEIGHT))
            .wrapping_add(self.build)
    }

    /// Returns -1, 0 or 1 if `self` is less than, equal to or greater than `other`.
    pub fn compare(&self, other: &Version) -> i32 {
        match self.ordinal().cmp(&other.ordinal()) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn less(&self, other: &Version) -> bool {
        self.compare(other) == -1
    }

    pub fn equals(&self, other: &Version) -> bool {
        self.compare(other) == 0
    }

    pub fn greater(&self, other: &Version) -> bool {
        self.compare(other) == 1
    }

    /// Native in-memory record of the four fields: four `i64` in declaration
    /// order, each in the byte order of the host. Not portable across
    /// platforms of different endianness.
    pub fn as_raw(&self) -> &[u8] {
        self.as_bytes()
    }

    /// Reads a version from the first [`RAW_SIZE`] bytes of `data`, which must
    /// hold a record in host byte order as written by [`Version::as_raw`].
    pub fn from_raw(data: &[u8]) -> Option<Self> {
        match Version::read_from_prefix(data) {
            Ok((v, _)) => Some(v),
            Err(_) => None,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by ordinal. Colliding ordinals fall back to the fields so that
/// `Ord` agrees with the field-wise `Eq`.
impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal()
            .cmp(&other.ordinal())
            .then_with(|| self.major.cmp(&other.major))
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Version {
            major,
            minor,
            patch,
            build,
        } = self;
        if *build > 0 {
            write!(f, "{major}.{minor}.{patch}.{build}")
        } else {
            write!(f, "{major}.{minor}.{patch}")
        }
    }
}

fn number(field: Field, txt: &str, raw: &str) -> Result<i64, Error> {
    txt.parse::<i64>().map_err(|_| {
        let raw = raw.to_string();
        debug!(%field, %raw, "rejecting version component");
        Error::InvalidNumber { field, raw }
    })
}

/// Parses `major.minor[.patch[.build]]`, with an optional `v` before major.
///
/// Components are checked back to front, so with several bad components the
/// error names the last one. Anything after the fourth component is ignored.
pub fn parse(input: &str) -> Result<Version, Error> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() < 2 {
        debug!(input, "no minor component");
        return Err(Error::MissingElements);
    }

    let mut v = Version::default();
    if let Some(raw) = parts.get(3) {
        v.build = number(Field::Build, raw, raw)?;
    }
    if let Some(raw) = parts.get(2) {
        v.patch = number(Field::Patch, raw, raw)?;
    }
    v.minor = number(Field::Minor, parts[1], parts[1])?;

    let major = parts[0].strip_prefix('v').unwrap_or(parts[0]);
    v.major = number(Field::Major, major, parts[0])?;

    Ok(v)
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
