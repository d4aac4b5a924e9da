#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod detect;
pub mod env;
pub mod error;
pub mod report;
pub mod version;

// Re-export commonly used types for convenience
pub use detect::{
    LibraryIdentity, OPENSSL_1_1_0_RELEASE, OPENSSL_3_0_0_RELEASE, SslCapabilities, Variant,
    detect, detect_raw, libressl_in_use, openssl_1_1_api, openssl_3_0_api,
};
pub use env::{WATCHED_KEYS, is_truthy, resolve_identity};
pub use error::{DetectError, VersionParseError};
pub use report::CompatReport;
pub use version::OpenSslVersion;

// serde_json is only used by tests
#[cfg(test)]
use serde_json as _;
