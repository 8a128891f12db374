//! catalog - browse and curate AI tools, learning resources and MCP servers

use std::process::ExitCode;

use catalog_cli::error::exit_code_from_error;
use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    match catalog_cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code_from_error(&err))
        },
    }
}
