//! Resolution of the linked library identity from build-time keys.
//!
//! `openssl-sys` publishes its link metadata to dependent build scripts as
//! `DEP_OPENSSL_*` variables. Packagers can pin or mask any fact with the
//! matching `SSLCOMPAT_*` override, which is consulted first.

use crate::detect::LibraryIdentity;
use crate::error::DetectError;
use crate::version::OpenSslVersion;

/// Packager override for `OPENSSL_VERSION_NUMBER`.
pub const OVERRIDE_VERSION_NUMBER: &str = "SSLCOMPAT_OPENSSL_VERSION_NUMBER";
/// Packager override for `LIBRESSL_VERSION_NUMBER`; empty or `none` masks it.
pub const OVERRIDE_LIBRESSL_VERSION_NUMBER: &str = "SSLCOMPAT_LIBRESSL_VERSION_NUMBER";
/// Packager override for the BoringSSL marker.
pub const OVERRIDE_BORINGSSL: &str = "SSLCOMPAT_BORINGSSL";

/// `cargo:version_number` emitted by `openssl-sys`.
pub const DEP_VERSION_NUMBER: &str = "DEP_OPENSSL_VERSION_NUMBER";
/// `cargo:libressl_version_number` emitted by `openssl-sys` for LibreSSL.
pub const DEP_LIBRESSL_VERSION_NUMBER: &str = "DEP_OPENSSL_LIBRESSL_VERSION_NUMBER";
/// `cargo:boringssl` emitted by `openssl-sys` for BoringSSL.
pub const DEP_BORINGSSL: &str = "DEP_OPENSSL_BORINGSSL";

const VERSION_KEYS: [&str; 2] = [OVERRIDE_VERSION_NUMBER, DEP_VERSION_NUMBER];
const LIBRESSL_KEYS: [&str; 2] = [OVERRIDE_LIBRESSL_VERSION_NUMBER, DEP_LIBRESSL_VERSION_NUMBER];
const BORINGSSL_KEYS: [&str; 2] = [OVERRIDE_BORINGSSL, DEP_BORINGSSL];

/// Every key [`resolve_identity`] may read, for `rerun-if-env-changed`.
pub const WATCHED_KEYS: [&str; 6] = [
    OVERRIDE_VERSION_NUMBER,
    DEP_VERSION_NUMBER,
    OVERRIDE_LIBRESSL_VERSION_NUMBER,
    DEP_LIBRESSL_VERSION_NUMBER,
    OVERRIDE_BORINGSSL,
    DEP_BORINGSSL,
];

/// Resolve the library identity through `lookup` (usually `env::var(k).ok()`).
///
/// A missing OpenSSL version number is an error: the library is not linked and
/// the build must say so instead of guessing.
pub fn resolve_identity<F>(lookup: F) -> Result<LibraryIdentity, DetectError>
where
    F: Fn(&str) -> Option<String>,
{
    let (key, raw) =
        first_present(&lookup, &VERSION_KEYS).ok_or_else(|| DetectError::MissingVersion {
            keys: VERSION_KEYS.to_vec(),
        })?;
    let version = parse_value(key, &raw)?;

    let libressl_version = match first_present(&lookup, &LIBRESSL_KEYS) {
        Some((_, raw)) if is_masked(&raw) => None,
        Some((key, raw)) => Some(parse_value(key, &raw)?),
        None => None,
    };

    let boringssl = first_present(&lookup, &BORINGSSL_KEYS).is_some_and(|(_, raw)| is_truthy(&raw));

    Ok(LibraryIdentity {
        version,
        libressl_version,
        boringssl,
    })
}

/// `1`, `true`, `yes` and `on`, case-insensitive.
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn is_masked(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none")
}

fn first_present<F>(lookup: &F, keys: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .find_map(|&key| lookup(key).map(|value| (key, value)))
}

fn parse_value(key: &'static str, raw: &str) -> Result<OpenSslVersion, DetectError> {
    OpenSslVersion::parse(raw).map_err(|source| DetectError::InvalidValue { key, source })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::detect::Variant;
    use crate::error::VersionParseError;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_openssl_sys_metadata() {
        let identity = resolve_identity(lookup(&[(DEP_VERSION_NUMBER, "1010100f")])).unwrap();
        assert_eq!(identity, LibraryIdentity::openssl(OpenSslVersion::new(0x1010_100f)));
    }

    #[test]
    fn test_libressl_metadata() {
        let identity = resolve_identity(lookup(&[
            (DEP_VERSION_NUMBER, "20000000"),
            (DEP_LIBRESSL_VERSION_NUMBER, "3080200f"),
        ]))
        .unwrap();
        assert_eq!(identity.variant(), Variant::LibreSsl);
        assert_eq!(identity.libressl_version, Some(OpenSslVersion::new(0x3080_200f)));
    }

    #[test]
    fn test_boringssl_metadata() {
        let identity = resolve_identity(lookup(&[
            (DEP_VERSION_NUMBER, "1010107f"),
            (DEP_BORINGSSL, "true"),
        ]))
        .unwrap();
        assert_eq!(identity.variant(), Variant::BoringSsl);
    }

    #[test]
    fn test_override_wins() {
        let identity = resolve_identity(lookup(&[
            (OVERRIDE_VERSION_NUMBER, "0x1000208fL"),
            (DEP_VERSION_NUMBER, "1010100f"),
        ]))
        .unwrap();
        assert_eq!(identity.version, OpenSslVersion::new(0x1000_208f));
    }

    #[test]
    fn test_override_can_mask_libressl() {
        for mask in ["", "none", " NONE "] {
            let identity = resolve_identity(lookup(&[
                (DEP_VERSION_NUMBER, "1010100f"),
                (OVERRIDE_LIBRESSL_VERSION_NUMBER, mask),
                (DEP_LIBRESSL_VERSION_NUMBER, "3080200f"),
            ]))
            .unwrap();
            assert_eq!(identity.libressl_version, None, "mask {mask:?}");
        }
    }

    #[test]
    fn test_boringssl_override_false() {
        let identity = resolve_identity(lookup(&[
            (DEP_VERSION_NUMBER, "1010107f"),
            (OVERRIDE_BORINGSSL, "0"),
            (DEP_BORINGSSL, "true"),
        ]))
        .unwrap();
        assert!(!identity.boringssl);
    }

    #[test]
    fn test_missing_version_is_error() {
        let err = resolve_identity(lookup(&[(DEP_LIBRESSL_VERSION_NUMBER, "3080200f")]))
            .unwrap_err();
        assert_eq!(
            err,
            DetectError::MissingVersion {
                keys: vec![OVERRIDE_VERSION_NUMBER, DEP_VERSION_NUMBER]
            }
        );
    }

    #[test]
    fn test_invalid_value_names_key() {
        let err = resolve_identity(lookup(&[
            (DEP_VERSION_NUMBER, "1010100f"),
            (DEP_LIBRESSL_VERSION_NUMBER, "3.8.2"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            DetectError::InvalidValue {
                key: DEP_LIBRESSL_VERSION_NUMBER,
                source: VersionParseError::InvalidDigit {
                    position: 1,
                    found: '.'
                },
            }
        );
    }

    #[test]
    fn test_is_truthy() {
        for yes in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(is_truthy(yes), "{yes:?}");
        }
        for no in ["", "0", "false", "off", "nope"] {
            assert!(!is_truthy(no), "{no:?}");
        }
    }
}
