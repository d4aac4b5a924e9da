//! Build-time facts about the linked OpenSSL, plus build/version metadata.
#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

// Linked for its `DEP_OPENSSL_*` metadata; build.rs does the reading.
use openssl_sys as _;

use sslcompat_core::{CompatReport, LibraryIdentity, OpenSslVersion, SslCapabilities, detect};

// ─────────────────────────────────────────────────────────────────────────────
// Linked library
// ─────────────────────────────────────────────────────────────────────────────

/// `OPENSSL_VERSION_NUMBER` of the linked library.
///
/// LibreSSL reports a frozen `0x20000000` here; see [`LIBRESSL_VERSION`].
pub const OPENSSL_VERSION: OpenSslVersion =
    OpenSslVersion::from_hex_const(env!("SSLCOMPAT_DETECTED_OPENSSL_VERSION_NUMBER"));

/// `LIBRESSL_VERSION_NUMBER`, present only when LibreSSL is linked.
pub const LIBRESSL_VERSION: Option<OpenSslVersion> =
    OpenSslVersion::from_optional_hex_const(env!("SSLCOMPAT_DETECTED_LIBRESSL_VERSION_NUMBER"));

/// Whether `openssl-sys` reported BoringSSL.
pub const BORINGSSL: bool = str_eq(env!("SSLCOMPAT_DETECTED_BORINGSSL"), "true");

pub const IDENTITY: LibraryIdentity = LibraryIdentity {
    version: OPENSSL_VERSION,
    libressl_version: LIBRESSL_VERSION,
    boringssl: BORINGSSL,
};

pub const CAPABILITIES: SslCapabilities = detect(&IDENTITY);

/// The LibreSSL fork is linked.
pub const LIBRESSL_IN_USE: bool = CAPABILITIES.libressl_in_use();

/// The OpenSSL 1.1.0 API generation is available: not LibreSSL, and
/// `OPENSSL_VERSION_NUMBER >= 0x1010000f`.
pub const OPENSSL_1_1_API: bool = CAPABILITIES.openssl_1_1_api();

/// Genuine OpenSSL 3.0.0 or later.
pub const OPENSSL_3_0_API: bool = CAPABILITIES.openssl_3_0_api();

// The build script's cfg flags and the constants come from the same identity.
const _: () = assert!(LIBRESSL_IN_USE == cfg!(libressl_in_use));
const _: () = assert!(OPENSSL_1_1_API == cfg!(openssl_1_1_api));
const _: () = assert!(OPENSSL_3_0_API == cfg!(openssl_3_0_api));

/// Summary of the linked library for display.
pub fn report() -> CompatReport {
    tracing::debug!(
        variant = %IDENTITY.variant(),
        version = %OPENSSL_VERSION.to_hex(),
        capabilities = CAPABILITIES.bits(),
        "build-time SSL detection"
    );
    CompatReport::new(&IDENTITY, CAPABILITIES)
}

/// Name of the API path this build compiled in.
#[cfg(openssl_3_0_api)]
pub const API_GENERATION: &str = "openssl-3.0";
#[cfg(all(openssl_1_1_api, not(openssl_3_0_api)))]
pub const API_GENERATION: &str = "openssl-1.1";
#[cfg(all(libressl_in_use, not(openssl_1_1_api)))]
pub const API_GENERATION: &str = "libressl";
#[cfg(not(any(libressl_in_use, openssl_1_1_api)))]
pub const API_GENERATION: &str = "openssl-legacy";

// ─────────────────────────────────────────────────────────────────────────────
// Build/version metadata
// ─────────────────────────────────────────────────────────────────────────────

/// The `SemVer` version of the build (from Cargo).
pub const SEMVER: &str = env!("CARGO_PKG_VERSION");

/// The git SHA emitted by the build script.
///
/// This is expected to be a 7-character hex string when available; otherwise it
/// is set to `"unknown"`.
pub const GIT_SHA_SHORT: &str = env!("VERGEN_GIT_SHA");

/// True if the git SHA looks like a short hex hash.
pub const HAS_GIT_SHA: bool = is_short_hex(GIT_SHA_SHORT);

const LONG_VERSION_WITH_SHA: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

/// The version string used by CLI `--version` output.
///
/// Examples:
/// - `0.3.0 (a1b2c3d)`
/// - `0.3.0` (when git data is unavailable)
pub const LONG_VERSION: &str = if HAS_GIT_SHA {
    LONG_VERSION_WITH_SHA
} else {
    SEMVER
};

const fn is_short_hex(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_hexdigit() {
            return false;
        }
        i += 1;
    }
    true
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    if a_bytes.len() != b_bytes.len() {
        return false;
    }

    let mut i = 0;
    while i < a_bytes.len() {
        if a_bytes[i] != b_bytes[i] {
            return false;
        }
        i += 1;
    }
    true
}
