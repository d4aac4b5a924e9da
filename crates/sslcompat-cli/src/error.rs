//! CLI-specific error types and mappings.
//!
//! This module provides the CLI error type and its mapping to exit codes.

use sslcompat_core::DetectError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or missing version input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Rendering the output failed.
    #[error("Output error: {0}")]
    Output(String),

    /// Writing to stdout failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 74: I/O error (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,          // EX_USAGE
            Self::Output(_) | Self::Io(_) => 74, // EX_IOERR
        }
    }
}

impl From<DetectError> for CliError {
    fn from(err: DetectError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
