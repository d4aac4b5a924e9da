//! Numeric OpenSSL version encoding.
//!
//! OpenSSL and LibreSSL both publish their version as one integer laid out as
//! `0xMNNFFPPS`: major nibble, minor byte, fix byte, patch byte, status nibble.
//! OpenSSL 3.x keeps the width but stores the patch *number* in the `PP` byte
//! and leaves `FF` and `S` at zero (`0xMNN00PP0`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionParseError;

/// Status nibble value for a final release.
pub const STATUS_RELEASE: u8 = 0xf;

/// A version number as encoded by `OPENSSL_VERSION_NUMBER` and
/// `LIBRESSL_VERSION_NUMBER`.
///
/// Ordering follows the raw integer, which is how the C headers compare
/// versions (`OPENSSL_VERSION_NUMBER >= 0x1010000fL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpenSslVersion(u64);

impl OpenSslVersion {
    /// Wrap a raw encoded version number.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Parse a hex version number at compile time.
    ///
    /// Accepts the same forms as [`OpenSslVersion::parse`]. Malformed input
    /// panics, which inside a `const` item is a build error.
    pub const fn from_hex_const(s: &str) -> Self {
        match parse_hex(s.as_bytes()) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("malformed OpenSSL version number"),
        }
    }

    /// Like [`OpenSslVersion::from_hex_const`], but an empty string is `None`.
    pub const fn from_optional_hex_const(s: &str) -> Option<Self> {
        if s.is_empty() {
            None
        } else {
            Some(Self::from_hex_const(s))
        }
    }

    /// Parse `1010100f`, `0x1010100f` or `0x1000208fL` style input.
    ///
    /// Surrounding whitespace, a single trailing `L`/`l` and `_` separators
    /// are accepted.
    pub const fn parse(s: &str) -> Result<Self, VersionParseError> {
        match parse_hex(s.as_bytes()) {
            Ok(raw) => Ok(Self(raw)),
            Err(e) => Err(e),
        }
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn major(self) -> u8 {
        ((self.0 >> 28) & 0xf) as u8
    }

    pub const fn minor(self) -> u8 {
        ((self.0 >> 20) & 0xff) as u8
    }

    pub const fn fix(self) -> u8 {
        ((self.0 >> 12) & 0xff) as u8
    }

    pub const fn patch(self) -> u8 {
        ((self.0 >> 4) & 0xff) as u8
    }

    pub const fn status(self) -> u8 {
        (self.0 & 0xf) as u8
    }

    /// True when the value uses the OpenSSL 3.x layout (`0xMNN00PP0`).
    pub const fn uses_semver_layout(self) -> bool {
        self.major() >= 3 && self.fix() == 0 && self.status() == 0
    }

    /// `true` when `self` is at least `other`.
    pub const fn at_least(self, other: Self) -> bool {
        self.0 >= other.0
    }

    /// The value formatted as the C headers spell it, e.g. `0x1010100f`.
    pub fn to_hex(self) -> String {
        format!("{:#010x}", self.0)
    }
}

impl fmt::Display for OpenSslVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.uses_semver_layout() {
            return write!(f, "{}.{}.{}", self.major(), self.minor(), self.patch());
        }

        write!(f, "{}.{}.{}", self.major(), self.minor(), self.fix())?;
        write_patch_letters(f, self.patch())?;

        match self.status() {
            STATUS_RELEASE => Ok(()),
            0 => f.write_str("-dev"),
            beta => write!(f, "-beta{beta}"),
        }
    }
}

impl FromStr for OpenSslVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for OpenSslVersion {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// 1 => "a" .. 26 => "z", then "za", "zb", ...
fn write_patch_letters(f: &mut fmt::Formatter<'_>, mut patch: u8) -> fmt::Result {
    while patch > 26 {
        f.write_str("z")?;
        patch -= 26;
    }
    if patch > 0 {
        let letter = char::from(b'a' + patch - 1);
        write!(f, "{letter}")?;
    }
    Ok(())
}

const fn parse_hex(input: &[u8]) -> Result<u64, VersionParseError> {
    let mut start = 0;
    let mut end = input.len();

    while start < end && input[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && input[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    if end > start && (input[end - 1] == b'L' || input[end - 1] == b'l') {
        end -= 1;
    }
    if end - start >= 2 && input[start] == b'0' && (input[start + 1] == b'x' || input[start + 1] == b'X')
    {
        start += 2;
    }

    let mut value: u64 = 0;
    let mut digits = 0;
    let mut i = start;
    while i < end {
        let c = input[i];
        i += 1;
        let nibble = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            b'_' => continue,
            _ => {
                return Err(VersionParseError::InvalidDigit {
                    position: i - 1,
                    found: c as char,
                });
            }
        };
        if value >> 60 != 0 {
            return Err(VersionParseError::Overflow);
        }
        value = (value << 4) | nibble as u64;
        digits += 1;
    }

    if digits == 0 {
        return Err(VersionParseError::Empty);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_header_spellings() {
        let expected = OpenSslVersion::new(0x1000_208f);
        assert_eq!("1000208f".parse::<OpenSslVersion>(), Ok(expected));
        assert_eq!("0x1000208f".parse::<OpenSslVersion>(), Ok(expected));
        assert_eq!("0x1000208fL".parse::<OpenSslVersion>(), Ok(expected));
        assert_eq!("  0X1000208F \n".parse::<OpenSslVersion>(), Ok(expected));
        assert_eq!("0x1000_208f".parse::<OpenSslVersion>(), Ok(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(OpenSslVersion::parse(""), Err(VersionParseError::Empty));
        assert_eq!(OpenSslVersion::parse("0x"), Err(VersionParseError::Empty));
        assert_eq!(OpenSslVersion::parse("  L "), Err(VersionParseError::Empty));
        assert_eq!(
            OpenSslVersion::parse("1.1.1"),
            Err(VersionParseError::InvalidDigit {
                position: 1,
                found: '.'
            })
        );
        assert_eq!(
            OpenSslVersion::parse("0x1ffffffffffffffff"),
            Err(VersionParseError::Overflow)
        );
    }

    #[test]
    fn test_full_width_value_fits() {
        assert_eq!(
            OpenSslVersion::parse("ffffffffffffffff").map(OpenSslVersion::raw),
            Ok(u64::MAX)
        );
    }

    #[test]
    fn test_components() {
        let v = OpenSslVersion::new(0x1000_208f);
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 0);
        assert_eq!(v.fix(), 2);
        assert_eq!(v.patch(), 8);
        assert_eq!(v.status(), STATUS_RELEASE);
    }

    #[test]
    fn test_display_classic_layout() {
        assert_eq!(OpenSslVersion::new(0x1010_100f).to_string(), "1.1.1");
        assert_eq!(OpenSslVersion::new(0x1010_000f).to_string(), "1.1.0");
        assert_eq!(OpenSslVersion::new(0x1000_208f).to_string(), "1.0.2h");
        assert_eq!(OpenSslVersion::new(0x1010_117f).to_string(), "1.1.1w");
        assert_eq!(OpenSslVersion::new(0x1000_21bf).to_string(), "1.0.2za");
        assert_eq!(OpenSslVersion::new(0x1010_0000).to_string(), "1.1.0-dev");
        assert_eq!(OpenSslVersion::new(0x1010_0003).to_string(), "1.1.0-beta3");
    }

    #[test]
    fn test_display_openssl3_layout() {
        assert_eq!(OpenSslVersion::new(0x3000_0000).to_string(), "3.0.0");
        assert_eq!(OpenSslVersion::new(0x3000_00d0).to_string(), "3.0.13");
        assert_eq!(OpenSslVersion::new(0x3020_0010).to_string(), "3.2.1");
    }

    #[test]
    fn test_display_libressl() {
        assert_eq!(OpenSslVersion::new(0x3080_200f).to_string(), "3.8.2");
        assert_eq!(OpenSslVersion::new(0x2070_400f).to_string(), "2.7.4");
    }

    #[test]
    fn test_hex_and_ordering() {
        let old = OpenSslVersion::new(0x1000_208f);
        let new = OpenSslVersion::new(0x1010_100f);
        assert_eq!(new.to_hex(), "0x1010100f");
        assert!(old < new);
        assert!(new.at_least(old));
        assert!(!old.at_least(new));
    }

    #[test]
    fn test_const_parsing() {
        const V: OpenSslVersion = OpenSslVersion::from_hex_const("0x1010100fL");
        const NONE: Option<OpenSslVersion> = OpenSslVersion::from_optional_hex_const("");
        assert_eq!(V.raw(), 0x1010_100f);
        assert!(NONE.is_none());
    }
}
