//! `sslcompat show`: the library this binary was compiled against.

use std::io::Write;

use crate::error::CliError;
use crate::presentation::{OutputFormat, render};

pub fn execute(format: OutputFormat, out: &mut impl Write) -> Result<(), CliError> {
    let report = sslcompat_build_info::report();
    tracing::info!(
        variant = %report.variant,
        api_generation = sslcompat_build_info::API_GENERATION,
        "showing build-time detection"
    );

    let heading = format!("Built against {}", report.variant);
    out.write_all(render(&report, &heading, format)?.as_bytes())?;
    Ok(())
}
