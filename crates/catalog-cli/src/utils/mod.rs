//! Shared helpers for the CLI commands.
//!
//! - [`cli_args`]: the shared `--format` argument
//! - [`formatting`]: colors and badges for text output
//! - [`logging`]: tracing subscriber and color control
//! - [`pickers`]: interactive file and save-location prompts

pub mod cli_args;
pub mod formatting;
pub mod logging;
pub mod pickers;

pub use logging::initialize_logging;
