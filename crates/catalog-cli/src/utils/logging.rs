//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{AdminCommands, Cli, Commands};

/// Initialize the logging subsystem based on CLI flags.
///
/// Sets the log level based on verbosity flags and suppresses info logs
/// when machine-readable output (JSON/JSONL) is requested.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let mut level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    // Keep stderr clean for machine-readable output unless verbose was requested.
    let mut machine_output = false;
    if !cli.verbose {
        let command_format = match &cli.command {
            Commands::Browse(args) => Some(args.format.resolve()),
            Commands::Categories { format, .. }
            | Commands::Stats { format }
            | Commands::Admin {
                command: AdminCommands::Preview { format, .. },
            } => Some(format.resolve()),
            _ => None,
        };

        if command_format.is_some_and(|fmt| fmt.is_machine_readable()) {
            level = Level::ERROR;
            machine_output = true;
        }
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}
