//! Error types and handling for catalog-core operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`]. Errors are
//! grouped into categories so callers (the CLI in particular) can map them to
//! exit codes or user-facing status messages without matching on every
//! variant.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading dataset files, writing exports
//! - **Network Errors**: fetching datasets from a remote catalog source
//! - **Format Errors**: malformed JSON, non-array documents, records missing a
//!   required field
//! - **Configuration Errors**: unreadable or invalid `config.toml`
//! - **Cancellation**: the user dismissed a file or save-location picker
//!
//! ```rust
//! use catalog_core::{Error, schema::decode_collection, Tool};
//!
//! match decode_collection::<Tool>(br#"{"name": "not an array"}"#) {
//!     Err(Error::InvalidFormat(found)) => assert_eq!(found, "object"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// The main error type for catalog-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading dataset files from a local catalog directory and writing
    /// exported collections.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed while fetching a remote dataset.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The byte source is not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The JSON document is valid but its top-level value is not an array.
    ///
    /// Carries the JSON type that was found instead (`"object"`, `"string"`, ...).
    #[error("Invalid format: expected a JSON array of records, found {0}")]
    InvalidFormat(&'static str),

    /// A record is missing one of the fields every card needs.
    #[error("Record {index} is missing required field `{field}`")]
    MissingField {
        /// Zero-based position of the record in the collection.
        index: usize,
        /// Name of the absent field.
        field: &'static str,
    },

    /// A record has the right fields but an unusable value.
    #[error("Record {index} is invalid: {reason}")]
    InvalidRecord {
        /// Zero-based position of the record in the collection.
        index: usize,
        /// Human-readable explanation.
        reason: String,
    },

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The user dismissed a picker or prompt.
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable by retrying the triggering action.
    ///
    /// Nothing in the crate retries on its own; this only tells the caller
    /// whether suggesting "try again" makes sense.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            Self::Cancelled => true,
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"io"`, `"network"`, `"parse"`, `"format"`, `"not_found"`,
    ///   `"config"`, `"serialization"`, `"cancelled"`, `"other"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::InvalidFormat(_) | Self::MissingField { .. } | Self::InvalidRecord { .. } => {
                "format"
            },
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Cancelled => "cancelled",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
