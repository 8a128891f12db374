//! catalog CLI - browse and curate AI tools, learning resources and MCP servers
//!
//! The binary in `main.rs` only maps the result of [`run`] to an exit code;
//! argument parsing, logging setup and command dispatch live here.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
pub mod error;
mod output;
mod utils;

use cli::{AdminCommands, Cli, Commands};
use commands::Context;
use utils::initialize_logging;

/// Execute the catalog CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns an error if configuration cannot be resolved or the command fails;
/// use [`error::exit_code_from_error`] to turn it into an exit code.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        commands::generate(shell, &mut std::io::stdout());
        return Ok(());
    }

    let ctx = Context::resolve(cli.config.as_ref(), cli.data.as_deref())?;
    match cli.command {
        Commands::Browse(args) => commands::browse(&ctx, &args).await,
        Commands::Categories { section, format } => {
            commands::categories(&ctx, section, &format).await
        },
        Commands::Stats { format } => commands::stats(&ctx, &format).await,
        Commands::Render { filters, out } => {
            commands::render(&ctx, &filters, out.as_deref()).await
        },
        Commands::Admin { command } => match command {
            AdminCommands::Add {
                dataset,
                record,
                dry_run,
                save,
            } => commands::add(&ctx, dataset, &record, dry_run, &save).await,
            AdminCommands::Import {
                dataset,
                file,
                save,
            } => commands::import(&ctx, dataset, &file, &save).await,
            AdminCommands::Export { dataset, save } => {
                commands::export(&ctx, dataset, &save).await
            },
            AdminCommands::Preview {
                dataset,
                last,
                format,
            } => commands::preview(&ctx, dataset, last, &format).await,
            AdminCommands::Shell => commands::shell(&ctx).await,
        },
        Commands::Completions { .. } => Ok(()),
    }
}
