//! Navigation and selection state.
//!
//! Exactly one [`Section`] is active at a time. Category and search only ever
//! apply to the active section; events aimed at another section are dropped.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::query::{CategoryFilter, Query};
use crate::types::DatasetKind;

/// A top-level page of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    /// Tools, split into favourites and the rest.
    #[default]
    Tools,
    /// Learning resources.
    Learning,
    /// MCP servers.
    McpServers,
    /// The admin editor.
    Admin,
}

impl Section {
    /// Every section, in navigation order.
    pub const ALL: [Self; 4] = [Self::Tools, Self::Learning, Self::McpServers, Self::Admin];

    /// Stable identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::Learning => "learning",
            Self::McpServers => "mcp-servers",
            Self::Admin => "admin",
        }
    }

    /// Dataset shown by this section; `None` for the admin section.
    #[must_use]
    pub const fn dataset(self) -> Option<DatasetKind> {
        match self {
            Self::Tools => Some(DatasetKind::Tools),
            Self::Learning => Some(DatasetKind::Learning),
            Self::McpServers => Some(DatasetKind::McpServers),
            Self::Admin => None,
        }
    }

    /// Section that shows `kind`.
    #[must_use]
    pub const fn for_dataset(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Tools => Self::Tools,
            DatasetKind::Learning => Self::Learning,
            DatasetKind::McpServers => Self::McpServers,
        }
    }

    /// Text of the outbound link on a card.
    #[must_use]
    pub const fn link_text(self) -> &'static str {
        match self {
            Self::Learning => "Learn Now →",
            _ => "Visit →",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("admin") {
            return Ok(Self::Admin);
        }
        s.parse::<DatasetKind>()
            .map(Self::for_dataset)
            .map_err(|_| Error::NotFound(format!("unknown section '{s}'")))
    }
}

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Switch to another section.
    SelectSection(Section),
    /// Pick a category pill within `section`.
    SelectCategory {
        /// Section the pill belongs to.
        section: Section,
        /// Category slug, or `"all"`.
        category: String,
    },
    /// Edit the search box of `section`.
    Search {
        /// Section the search box belongs to.
        section: Section,
        /// Current contents of the box.
        term: String,
    },
    /// A collection was appended to or replaced.
    CollectionChanged(DatasetKind),
}

/// The active section and its filters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    /// Active section.
    pub section: Section,
    /// Active category of the active section.
    pub category: CategoryFilter,
    /// Search term of the active section.
    pub search: String,
}

impl Selection {
    /// Selection showing `section` with no filters.
    #[must_use]
    pub fn new(section: Section) -> Self {
        Self {
            section,
            ..Self::default()
        }
    }

    /// Query for the active filters.
    #[must_use]
    pub fn query(&self) -> Query {
        Query::new(self.category.clone(), self.search.clone())
    }

    /// Apply `event`, returning the section that must be re-rendered.
    ///
    /// `admin_target` is the dataset the admin editor currently works on; the
    /// admin preview follows changes to it.
    pub fn apply(&mut self, event: Event, admin_target: DatasetKind) -> Option<Section> {
        match event {
            Event::SelectSection(section) => {
                self.section = section;
                self.category = CategoryFilter::All;
                self.search.clear();
                Some(section)
            },
            Event::SelectCategory { section, category } if section == self.section => {
                self.category = CategoryFilter::from(category.as_str());
                Some(section)
            },
            Event::Search { section, term } if section == self.section => {
                self.search = term;
                Some(section)
            },
            Event::CollectionChanged(kind) => {
                let shows_kind = match self.section.dataset() {
                    Some(shown) => shown == kind,
                    None => kind == admin_target,
                };
                shows_kind.then_some(self.section)
            },
            ignored => {
                debug!("ignoring event for inactive section: {ignored:?}");
                None
            },
        }
    }
}
