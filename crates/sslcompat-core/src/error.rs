//! Error types for version parsing and build-environment resolution.

use thiserror::Error;

/// Errors produced while parsing a numeric OpenSSL version encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// No hex digits were found.
    #[error("version number is empty")]
    Empty,

    /// A character outside `[0-9a-fA-F_]` was found.
    #[error("invalid hex digit {found:?} at position {position}")]
    InvalidDigit { position: usize, found: char },

    /// The value does not fit in 64 bits.
    #[error("version number does not fit in 64 bits")]
    Overflow,
}

/// Errors produced while resolving the linked library identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    /// None of the keys that carry the OpenSSL version number were set.
    ///
    /// This is what happens when no cryptographic library is linked at all.
    #[error(
        "no OpenSSL version number available (checked {}); is openssl-sys linked?",
        keys.join(", ")
    )]
    MissingVersion { keys: Vec<&'static str> },

    /// A key was set but its value is not a valid version number.
    #[error("{key} has an invalid value: {source}")]
    InvalidValue {
        key: &'static str,
        #[source]
        source: VersionParseError,
    },
}
