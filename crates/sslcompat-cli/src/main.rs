//! CLI entry point.

use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use sslcompat_cli::{Cli, Commands, handlers};

/// Log level comes from `RUST_LOG`; `--verbose` raises the default from
/// `warn` to `debug`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command()
            .print_help()
            .context("Failed to print help")?;
        return Ok(());
    };

    let format = cli.output_format();
    let mut stdout = io::stdout().lock();
    let result = match command {
        Commands::Show => handlers::show::execute(format, &mut stdout),
        Commands::Eval(args) => handlers::eval::execute(args, format, &mut stdout),
    };

    if let Err(err) = result {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
