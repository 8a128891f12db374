//! In-memory catalog store.
//!
//! The store owns the three collections. It never touches the filesystem:
//! collections arrive through the [`crate::loader`] and are changed only by the
//! [`crate::admin`] editor, which is why every mutator here is crate-private.

use serde::Serialize;

use crate::error::Error;
use crate::types::{DatasetKind, LearningResource, McpServer, Record, Tool};

/// Why a dataset could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Static message shown in place of the dataset's grid.
    pub message: String,
    /// Underlying cause, for logs and `--verbose` output.
    pub cause: String,
    /// Category of the underlying error, as reported by [`Error::category`].
    pub category: &'static str,
    /// Whether loading again may succeed, as reported by [`Error::is_recoverable`].
    pub recoverable: bool,
}

impl LoadFailure {
    /// Build the failure for `kind` from the error that caused it.
    #[must_use]
    pub fn new(kind: DatasetKind, cause: impl ToString) -> Self {
        let message = match kind {
            DatasetKind::Tools => "Error loading tools data. Please try again.",
            DatasetKind::Learning => "Error loading learning resources. Please try again.",
            DatasetKind::McpServers => "Error loading MCP servers. Please try again.",
        };
        Self {
            message: message.to_string(),
            cause: cause.to_string(),
            category: "other",
            recoverable: false,
        }
    }

    /// Build the failure for `kind` from a core error, keeping its category.
    #[must_use]
    pub fn from_error(kind: DatasetKind, error: &Error) -> Self {
        Self {
            category: error.category(),
            recoverable: error.is_recoverable(),
            ..Self::new(kind, error)
        }
    }
}

/// One ordered collection of records, plus the outcome of loading it.
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Vec<R>,
    failure: Option<LoadFailure>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failure: None,
        }
    }
}

impl<R: Record> Collection<R> {
    /// A successfully loaded collection.
    #[must_use]
    pub const fn loaded(records: Vec<R>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// A collection whose load failed; it holds no records.
    #[must_use]
    pub const fn failed(failure: LoadFailure) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(failure),
        }
    }

    /// Records in display order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The load failure, if the dataset could not be loaded.
    #[must_use]
    pub const fn failure(&self) -> Option<&LoadFailure> {
        self.failure.as_ref()
    }

    pub(crate) fn push(&mut self, record: R) {
        self.records.push(record);
    }

    pub(crate) fn replace(&mut self, records: Vec<R>) {
        self.records = records;
        self.failure = None;
    }
}

/// The three catalog collections.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    pub(crate) tools: Collection<Tool>,
    pub(crate) learning: Collection<LearningResource>,
    pub(crate) mcp_servers: Collection<McpServer>,
}

impl CatalogStore {
    /// Assemble a store from already-loaded collections.
    #[must_use]
    pub const fn new(
        tools: Collection<Tool>,
        learning: Collection<LearningResource>,
        mcp_servers: Collection<McpServer>,
    ) -> Self {
        Self {
            tools,
            learning,
            mcp_servers,
        }
    }

    /// Typed access to the collection holding `R`.
    #[must_use]
    pub fn collection<R: Record>(&self) -> &Collection<R> {
        R::collection(self)
    }

    pub(crate) fn collection_mut<R: Record>(&mut self) -> &mut Collection<R> {
        R::collection_mut(self)
    }

    /// The tools collection.
    #[must_use]
    pub const fn tools(&self) -> &Collection<Tool> {
        &self.tools
    }

    /// The learning resources collection.
    #[must_use]
    pub const fn learning(&self) -> &Collection<LearningResource> {
        &self.learning
    }

    /// The MCP servers collection.
    #[must_use]
    pub const fn mcp_servers(&self) -> &Collection<McpServer> {
        &self.mcp_servers
    }

    /// Record count of a dataset.
    #[must_use]
    pub fn len_of(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Tools => self.tools.len(),
            DatasetKind::Learning => self.learning.len(),
            DatasetKind::McpServers => self.mcp_servers.len(),
        }
    }

    /// Load failure of a dataset, if any.
    #[must_use]
    pub const fn failure_of(&self, kind: DatasetKind) -> Option<&LoadFailure> {
        match kind {
            DatasetKind::Tools => self.tools.failure(),
            DatasetKind::Learning => self.learning.failure(),
            DatasetKind::McpServers => self.mcp_servers.failure(),
        }
    }
}
