//! # catalog-core
//!
//! Core functionality for catalog - a browsable directory of AI tools,
//! learning resources and MCP servers backed by three JSON files.
//!
//! ## Architecture
//!
//! - **Loading**: [`Loader`] fetches the three datasets concurrently from a
//!   local directory or an HTTP base URL; each failure is isolated to its own
//!   dataset.
//! - **Store**: [`CatalogStore`] holds the collections in file order.
//! - **Query**: [`query`] filters by category and search term and splits tools
//!   into favourites and the rest.
//! - **Rendering**: [`render`] builds a surface-neutral view model;
//!   [`render::html`] turns it into an escaped HTML fragment.
//! - **State**: [`App`] owns the store, the navigation [`Selection`] and the
//!   [`AdminEditor`], which is the only writer of collections.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_core::{App, CatalogStore, Collection, Config, Event, Section, View, schema};
//!
//! let tools = schema::decode_collection(br#"[
//!     {"name": "Alpha", "icon": "A", "link": "https://alpha.example",
//!      "description": "Writing helper", "category": "writing"}
//! ]"#)?;
//! let store = CatalogStore::new(Collection::loaded(tools), Collection::default(), Collection::default());
//! let mut app = App::new(store, &Config::default());
//!
//! let view = app.dispatch(Event::Search { section: Section::Tools, term: "alp".into() });
//! assert!(matches!(view, Some(View::Catalog(v)) if v.card_count() == 1));
//! # Ok::<(), catalog_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`]. Load failures never abort
//! the whole catalog, and admin operations report a [`Status`] instead of
//! returning errors.

/// Admin editor: add, import, export and preview records
pub mod admin;
/// Application state and event dispatch
pub mod app;
/// Configuration loading and defaults
pub mod config;
/// Error types and result aliases
pub mod error;
/// Concurrent dataset loading from a directory or URL
pub mod loader;
/// Sections, selection state and events
pub mod nav;
/// Filtering, partitioning and category derivation
pub mod query;
/// View model and HTML surface
pub mod render;
/// Atomic saves and download fallback
pub mod save;
/// Dataset document validation
pub mod schema;
/// Headline statistics
pub mod stats;
/// In-memory collections
pub mod store;
/// Record types and enumerations
pub mod types;

pub use admin::{AdminEditor, AdminOutcome, FilePicker, Preview, RecordForm, Status, StatusKind};
pub use app::{AdminView, App, Update, View};
pub use config::Config;
pub use error::{Error, Result};
pub use loader::{CatalogSource, Loader};
pub use nav::{Event, Section, Selection};
pub use query::{CategoryFilter, Query};
pub use render::{Card, Grid, GridId, SectionView};
pub use save::{Exporter, FixedLocation, SaveLocationPicker, SaveOutcome};
pub use stats::CatalogStats;
pub use store::{CatalogStore, Collection, LoadFailure};
pub use types::{
    DatasetKind, Difficulty, Favourite, LearningResource, McpServer, Pricing, Record, Tool,
};
