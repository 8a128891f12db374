//! # Output Formatting
//!
//! Every command builds a value from `catalog-core` and hands it to one of the
//! printers here. The data is the same across formats; only the presentation
//! changes.
//!
//! - **Text**: colored, human-readable listing
//! - **JSON**: one pretty-printed JSON document
//! - **JSONL**: one JSON object per line, for streaming into other tools
//!
//! ```bash
//! catalog browse tools -s gpt -f json | jq '.grids[].cards[].name'
//! catalog browse learning -f jsonl | wc -l
//! ```

mod json;
mod text;

use serde::Serialize;

pub use json::{print_json, print_jsonl};
pub use text::{
    print_admin_view, print_categories, print_preview, print_section, print_stats, print_status,
};

/// Output format options supported by the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty text output (default on a terminal)
    Text,
    /// Single JSON document (default when piped)
    Json,
    /// Newline-delimited JSON
    Jsonl,
}

impl OutputFormat {
    /// Whether the format is meant for other programs.
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

/// Print `value` as JSON, or each of `items` as one JSON line.
///
/// Text output is left to the caller, which knows how to lay the value out.
pub fn print_machine<T, I>(format: OutputFormat, value: &T, items: I) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    I: IntoIterator,
    I::Item: Serialize,
{
    match format {
        OutputFormat::Jsonl => print_jsonl(items),
        _ => print_json(value),
    }
}
