//! `sslcompat eval`: run the detector on a synthetic identity.

use std::env;
use std::io::Write;

use sslcompat_core::{CompatReport, LibraryIdentity};

use crate::commands::EvalArgs;
use crate::error::CliError;
use crate::presentation::{OutputFormat, render};

pub fn execute(args: &EvalArgs, format: OutputFormat, out: &mut impl Write) -> Result<(), CliError> {
    let identity = args.identity(|key| env::var(key).ok())?;
    write_report(&identity, format, out)
}

fn write_report(
    identity: &LibraryIdentity,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let report = CompatReport::from_identity(identity);
    tracing::debug!(?identity, ?report, "evaluated synthetic identity");

    let heading = format!("Detection for {} {}", report.variant, report.openssl_version);
    out.write_all(render(&report, &heading, format)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sslcompat_core::OpenSslVersion;

    fn eval_json(identity: &LibraryIdentity) -> serde_json::Value {
        let mut out = Vec::new();
        write_report(identity, OutputFormat::Json, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_openssl_1_1_1() {
        let json = eval_json(&LibraryIdentity::openssl(OpenSslVersion::new(0x1010_100f)));
        assert_eq!(json["libressl_in_use"], false);
        assert_eq!(json["openssl_1_1_api"], true);
    }

    #[test]
    fn test_openssl_1_0_2h() {
        let json = eval_json(&LibraryIdentity::openssl(OpenSslVersion::new(0x1000_208f)));
        assert_eq!(json["openssl_version"], "1.0.2h");
        assert_eq!(json["openssl_1_1_api"], false);
    }

    #[test]
    fn test_explicit_args_end_to_end() {
        let args = EvalArgs {
            openssl_version_number: Some("0x1010100f".into()),
            libressl_version_number: Some("0x3080200f".into()),
            boringssl: false,
        };
        let mut out = Vec::new();
        execute(&args, OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Detection for LibreSSL"));
    }

    #[test]
    fn test_bad_hex_is_argument_error() {
        let args = EvalArgs {
            openssl_version_number: Some("1.1.1".into()),
            ..EvalArgs::default()
        };
        let err = execute(&args, OutputFormat::Text, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
