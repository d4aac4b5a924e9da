//! Library variant classification and API-generation detection.
//!
//! # Invariant
//!
//! Every decision here is a pure `const fn` of the [`LibraryIdentity`]. The
//! build-info crate evaluates them once while compiling and exposes the
//! results as `pub const` items, so consumers branch on values the compiler
//! already knows.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::version::OpenSslVersion;

/// First release with the OpenSSL 1.1.0 API (`0x1010000fL`).
pub const OPENSSL_1_1_0_RELEASE: OpenSslVersion = OpenSslVersion::new(0x1010_000f);

/// First OpenSSL 3.0.0 version number (`0x30000000L`).
pub const OPENSSL_3_0_0_RELEASE: OpenSslVersion = OpenSslVersion::new(0x3000_0000);

/// Which distribution of the library is linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    OpenSsl,
    LibreSsl,
    BoringSsl,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenSsl => "OpenSSL",
            Self::LibreSsl => "LibreSSL",
            Self::BoringSsl => "BoringSSL",
        })
    }
}

/// Build-time facts about the linked library.
///
/// `libressl_version` plays the role of `LIBRESSL_VERSION_NUMBER`: LibreSSL is
/// in use exactly when it is present. LibreSSL also reports a frozen
/// `OPENSSL_VERSION_NUMBER` (`0x20000000`), kept in `version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryIdentity {
    pub version: OpenSslVersion,
    pub libressl_version: Option<OpenSslVersion>,
    pub boringssl: bool,
}

impl LibraryIdentity {
    pub const fn openssl(version: OpenSslVersion) -> Self {
        Self {
            version,
            libressl_version: None,
            boringssl: false,
        }
    }

    pub const fn libressl(version: OpenSslVersion, libressl_version: OpenSslVersion) -> Self {
        Self {
            version,
            libressl_version: Some(libressl_version),
            boringssl: false,
        }
    }

    pub const fn boringssl(version: OpenSslVersion) -> Self {
        Self {
            version,
            libressl_version: None,
            boringssl: true,
        }
    }

    /// LibreSSL takes precedence over the BoringSSL marker.
    pub const fn variant(&self) -> Variant {
        if self.libressl_version.is_some() {
            Variant::LibreSsl
        } else if self.boringssl {
            Variant::BoringSsl
        } else {
            Variant::OpenSsl
        }
    }
}

bitflags! {
    /// API capabilities derived from the linked library.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(transparent)]
    pub struct SslCapabilities: u32 {
        /// The LibreSSL fork is linked.
        const LIBRESSL_IN_USE = 0b0000_0001;

        /// The OpenSSL 1.1.0 API generation is available.
        ///
        /// Never set for LibreSSL, whatever version it reports.
        const OPENSSL_1_1_API = 0b0000_0010;

        /// Genuine OpenSSL 3.0 or later.
        const OPENSSL_3_0_API = 0b0000_0100;
    }
}

impl Default for SslCapabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for SslCapabilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SslCapabilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

impl SslCapabilities {
    pub const fn libressl_in_use(self) -> bool {
        self.contains(Self::LIBRESSL_IN_USE)
    }

    pub const fn openssl_1_1_api(self) -> bool {
        self.contains(Self::OPENSSL_1_1_API)
    }

    pub const fn openssl_3_0_api(self) -> bool {
        self.contains(Self::OPENSSL_3_0_API)
    }
}

/// `LIBRESSL_IN_USE`: the fork-identifying version number is defined.
pub const fn libressl_in_use(identity: &LibraryIdentity) -> bool {
    identity.libressl_version.is_some()
}

/// `OPENSSL_1_1_API`: not LibreSSL, and `OPENSSL_VERSION_NUMBER >= 0x1010000f`.
///
/// BoringSSL is not special-cased; it reports a 1.1.x number and gets the flag.
pub const fn openssl_1_1_api(identity: &LibraryIdentity) -> bool {
    !libressl_in_use(identity) && identity.version.at_least(OPENSSL_1_1_0_RELEASE)
}

/// Genuine OpenSSL (neither fork) at 3.0.0 or later.
pub const fn openssl_3_0_api(identity: &LibraryIdentity) -> bool {
    !libressl_in_use(identity)
        && !identity.boringssl
        && identity.version.at_least(OPENSSL_3_0_0_RELEASE)
}

/// Evaluate every capability for `identity`.
pub const fn detect(identity: &LibraryIdentity) -> SslCapabilities {
    let mut caps = SslCapabilities::empty();
    if libressl_in_use(identity) {
        caps = caps.union(SslCapabilities::LIBRESSL_IN_USE);
    }
    if openssl_1_1_api(identity) {
        caps = caps.union(SslCapabilities::OPENSSL_1_1_API);
    }
    if openssl_3_0_api(identity) {
        caps = caps.union(SslCapabilities::OPENSSL_3_0_API);
    }
    caps
}

/// Two-input form: `(LIBRESSL_IN_USE, OPENSSL_1_1_API)` for a raw
/// `OPENSSL_VERSION_NUMBER` and whether `LIBRESSL_VERSION_NUMBER` is defined.
pub const fn detect_raw(version: u64, libressl_defined: bool) -> (bool, bool) {
    let identity = LibraryIdentity {
        version: OpenSslVersion::new(version),
        // The LibreSSL number itself never affects the flags.
        libressl_version: if libressl_defined {
            Some(OpenSslVersion::new(0))
        } else {
            None
        },
        boringssl: false,
    };
    (libressl_in_use(&identity), openssl_1_1_api(&identity))
}

// Checked while compiling this crate.
const _: () = {
    // 1.1.1 and the threshold itself
    assert!(matches!(detect_raw(0x1010_100f, false), (false, true)));
    assert!(matches!(detect_raw(0x1010_000f, false), (false, true)));
    assert!(matches!(detect_raw(0x3000_0000, false), (false, true)));
    assert!(matches!(detect_raw(u64::MAX, false), (false, true)));

    // 1.0.2h and the value just below the threshold
    assert!(matches!(detect_raw(0x1000_208f, false), (false, false)));
    assert!(matches!(detect_raw(0x1010_000e, false), (false, false)));
    assert!(matches!(detect_raw(0, false), (false, false)));

    // LibreSSL, whatever it reports
    assert!(matches!(detect_raw(0x2000_0000, true), (true, false)));
    assert!(matches!(detect_raw(0x1010_100f, true), (true, false)));
    assert!(matches!(detect_raw(u64::MAX, true), (true, false)));
    assert!(matches!(detect_raw(0, true), (true, false)));
};
