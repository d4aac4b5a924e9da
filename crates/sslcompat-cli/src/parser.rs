//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;
use crate::presentation::OutputFormat;

/// Inspect which OpenSSL flavour a build detected, or run the detector on
/// version numbers you supply.
#[derive(Parser)]
#[command(name = "sslcompat")]
#[command(about = "Inspect OpenSSL/LibreSSL API-generation detection")]
#[command(version = sslcompat_build_info::LONG_VERSION)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of a table
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub const fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}
