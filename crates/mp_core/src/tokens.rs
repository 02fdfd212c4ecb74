//! crates/mp_core/src/tokens.rs
//! Region and sub-unit identifier newtypes.
//! Deterministic, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const TOKEN_MAX_LEN: usize = 64;
const NAME_MAX_LEN: usize = 128;

/// Region token: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_region_token(s: &str) -> bool {
    let bs = s.as_bytes();
    let len = bs.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

/// Sub-unit names come from gazetteers: any non-empty string up to 128 chars
/// with no control characters. Unicode is allowed; surrounding whitespace is
/// the caller's problem and rejected here.
#[inline]
pub fn is_valid_sub_unit_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars().count() <= NAME_MAX_LEN
        && !s.chars().any(|c| c.is_control())
        && s.trim() == s
}

/// Administrative district identifier: ^[A-Za-z0-9_.:-]{1,64}$
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct RegionId(String);

impl RegionId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_region_token(s) {
            return Err(CoreError::InvalidToken);
        }
        Ok(RegionId(s.to_owned()))
    }
}

impl TryFrom<String> for RegionId {
    type Error = CoreError;
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RegionId> for String {
    #[inline]
    fn from(value: RegionId) -> Self {
        value.0
    }
}

/// Administrative sub-unit display name (unique within a region).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct SubUnitName(String);

impl SubUnitName {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubUnitName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SubUnitName {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_sub_unit_name(s) {
            return Err(CoreError::InvalidName);
        }
        Ok(SubUnitName(s.to_owned()))
    }
}

impl TryFrom<String> for SubUnitName {
    type Error = CoreError;
    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SubUnitName> for String {
    #[inline]
    fn from(value: SubUnitName) -> Self {
        value.0
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_tokens() {
        for ok in ["lowokwaru", "Klojen", "kec-01", "a.b:c_9"] {
            assert!(is_valid_region_token(ok));
            let r: RegionId = ok.parse().unwrap();
            assert_eq!(r.as_str(), ok);
        }
        for bad in ["", " ", "kecamatan sukun", "é", &"x".repeat(65)] {
            assert!(bad.parse::<RegionId>().is_err());
        }
    }

    #[test]
    fn sub_unit_names() {
        for ok in ["Tunjungsekar", "Mojolangu Barat", "Kel. Bareng"] {
            let n: SubUnitName = ok.parse().unwrap();
            assert_eq!(format!("{n}"), ok);
        }
        for bad in ["", "  padded  ", "line\nbreak", &"x".repeat(129)] {
            assert!(bad.parse::<SubUnitName>().is_err());
        }
    }
}
