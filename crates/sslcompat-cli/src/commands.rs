//! Subcommand definitions.

use clap::{Args, Subcommand};
use sslcompat_core::env::{
    OVERRIDE_BORINGSSL, OVERRIDE_LIBRESSL_VERSION_NUMBER, OVERRIDE_VERSION_NUMBER,
};
use sslcompat_core::{DetectError, LibraryIdentity, resolve_identity};

// DEP_OPENSSL_* only exist inside build scripts, so `eval` reads overrides only.
const OVERRIDE_KEYS: [&str; 3] = [
    OVERRIDE_VERSION_NUMBER,
    OVERRIDE_LIBRESSL_VERSION_NUMBER,
    OVERRIDE_BORINGSSL,
];

#[derive(Subcommand)]
pub enum Commands {
    /// Show the SSL library this binary was built against
    Show,

    /// Run the detector on the given version numbers
    Eval(EvalArgs),
}

/// Synthetic library identity for `eval`.
///
/// Unset arguments fall back to the `SSLCOMPAT_*` environment variables the
/// build script honours.
#[derive(Args, Debug, Default)]
pub struct EvalArgs {
    /// `OPENSSL_VERSION_NUMBER` to evaluate, e.g. 0x1010100f
    #[arg(long = "openssl-version-number", value_name = "HEX")]
    pub openssl_version_number: Option<String>,

    /// `LIBRESSL_VERSION_NUMBER`; its presence marks the LibreSSL fork
    #[arg(long = "libressl-version-number", value_name = "HEX")]
    pub libressl_version_number: Option<String>,

    /// Treat the library as BoringSSL
    #[arg(long)]
    pub boringssl: bool,
}

impl EvalArgs {
    /// Resolve the identity, consulting `env_lookup` for anything not given
    /// on the command line.
    pub fn identity<F>(&self, env_lookup: F) -> Result<LibraryIdentity, DetectError>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve_identity(|key| {
            if !OVERRIDE_KEYS.iter().any(|k| *k == key) {
                return None;
            }
            self.explicit(key).or_else(|| env_lookup(key))
        })
    }

    fn explicit(&self, key: &str) -> Option<String> {
        match key {
            OVERRIDE_VERSION_NUMBER => self.openssl_version_number.clone(),
            OVERRIDE_LIBRESSL_VERSION_NUMBER => self.libressl_version_number.clone(),
            OVERRIDE_BORINGSSL => self.boringssl.then(|| "true".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sslcompat_core::{OpenSslVersion, Variant};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_explicit_openssl() {
        let args = EvalArgs {
            openssl_version_number: Some("0x1010100f".into()),
            ..EvalArgs::default()
        };
        let identity = args.identity(no_env).unwrap();
        assert_eq!(identity, LibraryIdentity::openssl(OpenSslVersion::new(0x1010_100f)));
    }

    #[test]
    fn test_explicit_libressl() {
        let args = EvalArgs {
            openssl_version_number: Some("20000000".into()),
            libressl_version_number: Some("3080200f".into()),
            boringssl: false,
        };
        assert_eq!(args.identity(no_env).unwrap().variant(), Variant::LibreSsl);
    }

    #[test]
    fn test_env_fallback() {
        let args = EvalArgs::default();
        let identity = args
            .identity(|key| (key == OVERRIDE_VERSION_NUMBER).then(|| "1000208f".to_string()))
            .unwrap();
        assert_eq!(identity.version, OpenSslVersion::new(0x1000_208f));
    }

    #[test]
    fn test_explicit_beats_env() {
        let args = EvalArgs {
            openssl_version_number: Some("1010100f".into()),
            ..EvalArgs::default()
        };
        let identity = args
            .identity(|key| (key == OVERRIDE_VERSION_NUMBER).then(|| "1000208f".to_string()))
            .unwrap();
        assert_eq!(identity.version, OpenSslVersion::new(0x1010_100f));
    }

    #[test]
    fn test_dep_keys_are_not_consulted() {
        let args = EvalArgs::default();
        let err = args
            .identity(|key| key.starts_with("DEP_").then(|| "1010100f".to_string()))
            .unwrap_err();
        assert!(matches!(err, DetectError::MissingVersion { .. }));
    }
}
