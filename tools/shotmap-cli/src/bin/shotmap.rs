//! # Shotmap Binary
//!
//! Command-line interface for flattening game records and building shot maps.

use anyhow::Result;
use clap::Parser;
use colored::*;
use shotmap_cli::{failure_kind, initialize_logging_with_config, Cli, CliHandler};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}: {:#}", "error".red().bold(), failure_kind(&e), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;

    // Initialize logging
    initialize_logging_with_config(&config.logging)?;
    tracing::debug!("Configuration: {:?}", config);

    let handler = CliHandler::new(config);
    let mut stdout = std::io::stdout().lock();
    handler.handle_command(cli.command, &mut stdout)?;

    Ok(())
}
