//! Serializable summary of a detection result.

use serde::{Deserialize, Serialize};

use crate::detect::{LibraryIdentity, SslCapabilities, Variant, detect};

/// Human- and machine-readable view of a [`LibraryIdentity`] and its flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatReport {
    pub variant: Variant,
    pub openssl_version: String,
    pub openssl_version_number: String,
    pub libressl_version: Option<String>,
    pub libressl_version_number: Option<String>,
    pub boringssl: bool,
    pub libressl_in_use: bool,
    pub openssl_1_1_api: bool,
    pub openssl_3_0_api: bool,
}

impl CompatReport {
    pub fn from_identity(identity: &LibraryIdentity) -> Self {
        Self::new(identity, detect(identity))
    }

    /// Build a report from an identity and flags computed elsewhere.
    pub fn new(identity: &LibraryIdentity, caps: SslCapabilities) -> Self {
        Self {
            variant: identity.variant(),
            openssl_version: identity.version.to_string(),
            openssl_version_number: identity.version.to_hex(),
            libressl_version: identity.libressl_version.map(|v| v.to_string()),
            libressl_version_number: identity.libressl_version.map(|v| v.to_hex()),
            boringssl: identity.boringssl,
            libressl_in_use: caps.libressl_in_use(),
            openssl_1_1_api: caps.openssl_1_1_api(),
            openssl_3_0_api: caps.openssl_3_0_api(),
        }
    }
}
