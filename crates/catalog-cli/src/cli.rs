//! # CLI Structure and Argument Parsing
//!
//! The CLI is built with `clap` derive macros and follows a
//! command-subcommand pattern:
//!
//! - **Global options**: `--verbose`, `--quiet`, `--no-color`, `--config`, `--data`
//! - **Browsing**: `browse`, `categories`, `stats`, `render`
//! - **Curation**: `admin add | import | export | preview | shell`
//!
//! ```bash
//! catalog browse tools --category writing --search gpt
//! catalog --data https://example.com/catalog stats -f json
//! catalog admin add tools --name Gamma --link https://gamma.example \
//!     --description "Does things" --pricing freemium --out tools.json -y
//! ```

use std::path::PathBuf;

use catalog_core::{DatasetKind, Section};
use clap::{Args, Parser, Subcommand};

use crate::utils::cli_args::FormatArg;

/// Main CLI structure for the `catalog` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "catalog")]
#[command(version)]
#[command(about = "catalog - Browse and curate AI tools, learning resources and MCP servers", long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also honours `NO_COLOR`)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, global = true, env = "CATALOG_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog location: a directory or an http(s) base URL
    #[arg(long, global = true, env = "CATALOG_DATA", value_name = "DIR|URL")]
    pub data: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Show the cards of a section, filtered by category and search term
    Browse(BrowseArgs),

    /// List the category pills of a section
    Categories {
        /// Section to inspect
        #[arg(value_parser = parse_catalog_section, default_value = "tools")]
        section: Section,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Show headline statistics
    Stats {
        #[command(flatten)]
        format: FormatArg,
    },

    /// Render a section as an HTML fragment
    Render {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write the fragment to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Add, import, export and preview records
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Section, category and search, shared by `browse` and `render`.
#[derive(Args, Clone, Debug)]
pub struct FilterArgs {
    /// Section to show
    #[arg(value_parser = parse_catalog_section, default_value = "tools")]
    pub section: Section,

    /// Only show this category slug ("all" shows every category)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Case-insensitive search over name, description and category
    #[arg(short = 's', long, default_value = "")]
    pub search: String,
}

/// Arguments of `browse`.
#[derive(Args, Clone, Debug)]
pub struct BrowseArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub format: FormatArg,
}

/// Where an admin command writes the changed collection.
#[derive(Args, Clone, Debug, Default)]
pub struct SaveArgs {
    /// Destination file (defaults to the dataset file of a directory catalog)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Overwrite an existing destination without asking
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Fields of a new record.
#[derive(Args, Clone, Debug, Default)]
pub struct RecordArgs {
    /// Display name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Target URL
    #[arg(long, default_value = "")]
    pub link: String,

    /// One-paragraph description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Display glyph (defaults to the configured icon)
    #[arg(long, default_value = "")]
    pub icon: String,

    /// Category slug (defaults to the configured category)
    #[arg(long, default_value = "")]
    pub category: String,

    /// free, paid or freemium (tools and MCP servers)
    #[arg(long, default_value = "")]
    pub pricing: String,

    /// Hover text for the pricing badge (tools)
    #[arg(long, default_value = "")]
    pub pricing_note: String,

    /// yes or no (tools)
    #[arg(long, default_value = "")]
    pub favourite: String,

    /// beginner, intermediate, advanced or any other level (learning)
    #[arg(long, default_value = "")]
    pub difficulty: String,

    /// Resource type such as article or video (learning)
    #[arg(long = "type", default_value = "")]
    pub resource_type: String,
}

/// Admin subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum AdminCommands {
    /// Append a record to a dataset and save it
    Add {
        /// Dataset to add to
        #[arg(value_parser = parse_dataset)]
        dataset: DatasetKind,

        #[command(flatten)]
        record: RecordArgs,

        /// Validate and print the record without saving
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Replace a dataset with the records of a JSON file and save it
    Import {
        /// Dataset to replace
        #[arg(value_parser = parse_dataset)]
        dataset: DatasetKind,

        /// JSON array of records
        file: PathBuf,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Save a dataset as pretty JSON
    Export {
        /// Dataset to export
        #[arg(value_parser = parse_dataset)]
        dataset: DatasetKind,

        #[command(flatten)]
        save: SaveArgs,
    },

    /// Show the record count and last entries of a dataset
    Preview {
        /// Dataset to preview
        #[arg(value_parser = parse_dataset)]
        dataset: DatasetKind,

        /// Number of trailing entries to show
        #[arg(long, value_name = "N")]
        last: Option<usize>,

        #[command(flatten)]
        format: FormatArg,
    },

    /// Interactive browsing and editing session
    Shell,
}

fn parse_dataset(value: &str) -> Result<DatasetKind, String> {
    value.parse().map_err(|e: catalog_core::Error| e.to_string())
}

fn parse_catalog_section(value: &str) -> Result<Section, String> {
    match value.parse::<Section>() {
        Ok(Section::Admin) => Err("the admin section has no cards; use `catalog admin`".into()),
        Ok(section) => Ok(section),
        Err(e) => Err(e.to_string()),
    }
}
