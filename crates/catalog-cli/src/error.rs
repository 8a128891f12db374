//! CLI error handling with semantic exit codes.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments, configuration or record fields |
//! | 3 | `NotFound` | Dataset, file or section not found |
//! | 5 | `Network` | Remote catalog could not be fetched |
//! | 7 | `Integrity` | Dataset document is malformed |
//!
//! ```bash
//! catalog admin import tools new-tools.json --out tools.json -y
//! case $? in
//!     0) echo "Imported" ;;
//!     7) echo "File is not a valid tools dataset" ;;
//!     *) echo "Other error" ;;
//! esac
//! ```

use std::fmt;

use catalog_core::LoadFailure;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, configuration or form input (exit code 2).
    Usage = 2,

    /// Requested dataset, file or section not found (exit code 3).
    NotFound = 3,

    /// Network or fetch failure (exit code 5).
    Network = 5,

    /// Malformed dataset document (exit code 7).
    Integrity = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Integrity => "integrity error",
        }
    }

    /// Map a core error category (see `catalog_core::Error::category`).
    #[must_use]
    pub fn from_core(category: &str) -> Self {
        match category {
            "network" => Self::Network,
            "not_found" => Self::NotFound,
            "parse" | "format" => Self::Integrity,
            "config" | "cancelled" => Self::Usage,
            _ => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Fallback for errors that were neither categorized explicitly nor
    /// produced by `catalog-core`.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("http")
            || msg_lower.contains("fetch")
        {
            return Self::Network;
        }

        if msg_lower.contains("not found")
            || msg_lower.contains("no such")
            || msg_lower.contains("does not exist")
            || msg_lower.contains("unknown dataset")
            || msg_lower.contains("unknown section")
        {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid format") || msg_lower.contains("missing required field") {
            return Self::Integrity;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("required")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Internal, source)
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Create an integrity error.
    pub fn integrity(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Integrity, source)
    }

    /// Error for a dataset that failed to load.
    pub fn load_failure(failure: &LoadFailure) -> Self {
        let hint = if failure.recoverable { "; retrying may help" } else { "" };
        Self::new(
            ErrorCategory::from_core(failure.category),
            anyhow::anyhow!("{} ({}{hint})", failure.message, failure.cause),
        )
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    // `Display` already shows the wrapped error, so the chain continues below it.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.source()
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// Explicit [`CliError`]s win, then core errors anywhere in the chain, then
/// message inference.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core) = err.chain().find_map(|e| e.downcast_ref::<catalog_core::Error>()) {
        return ErrorCategory::from_core(core.category()).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}
