//! Headline numbers for the catalog.

use serde::Serialize;

use crate::query;
use crate::store::CatalogStore;
use crate::types::DatasetKind;

/// Summary figures shown in the catalog header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogStats {
    /// Number of tools.
    pub total_tools: usize,
    /// Tools that are free or freemium.
    pub free_tools: usize,
    /// Distinct tool categories.
    pub tool_categories: usize,
    /// Number of learning resources.
    pub learning_resources: usize,
    /// Number of MCP servers.
    pub mcp_servers: usize,
}

impl CatalogStats {
    /// Compute the figures from the current store contents.
    #[must_use]
    pub fn collect(store: &CatalogStore) -> Self {
        let tools = store.tools().records();
        Self {
            total_tools: tools.len(),
            free_tools: tools.iter().filter(|t| t.pricing.has_free_tier()).count(),
            tool_categories: query::categories(tools).len(),
            learning_resources: store.len_of(DatasetKind::Learning),
            mcp_servers: store.len_of(DatasetKind::McpServers),
        }
    }

    /// Record count of one dataset.
    #[must_use]
    pub const fn count_of(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Tools => self.total_tools,
            DatasetKind::Learning => self.learning_resources,
            DatasetKind::McpServers => self.mcp_servers,
        }
    }
}
