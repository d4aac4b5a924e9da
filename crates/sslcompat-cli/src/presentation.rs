//! Rendering of detection reports.

use sslcompat_core::CompatReport;

use crate::error::CliError;

// ANSI color codes for better UX
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render `report` in the requested format, newline-terminated.
pub fn render(report: &CompatReport, heading: &str, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(render_text(report, heading)),
        OutputFormat::Json => render_json(report),
    }
}

pub fn render_json(report: &CompatReport) -> Result<String, CliError> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}

pub fn render_text(report: &CompatReport, heading: &str) -> String {
    let mut out = format!("{BOLD}{heading}{RESET}\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    push_row(&mut out, "Variant", &report.variant.to_string());
    push_row(
        &mut out,
        "OPENSSL_VERSION_NUMBER",
        &format!(
            "{} ({})",
            report.openssl_version_number, report.openssl_version
        ),
    );
    if let (Some(number), Some(version)) =
        (&report.libressl_version_number, &report.libressl_version)
    {
        push_row(
            &mut out,
            "LIBRESSL_VERSION_NUMBER",
            &format!("{number} ({version})"),
        );
    }

    out.push('\n');
    push_flag(&mut out, "LIBRESSL_IN_USE", report.libressl_in_use);
    push_flag(&mut out, "OPENSSL_1_1_API", report.openssl_1_1_api);
    push_flag(&mut out, "OPENSSL_3_0_API", report.openssl_3_0_api);
    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{label:<26} {value}\n"));
}

fn push_flag(out: &mut String, label: &str, value: bool) {
    let (color, mark) = if value { (GREEN, "✓ yes") } else { (RED, "✗ no") };
    out.push_str(&format!("{label:<26} {color}{mark}{RESET}\n"));
}
