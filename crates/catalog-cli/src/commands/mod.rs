//! Command implementations.
//!
//! Every command starts from a [`Context`]: the resolved configuration and
//! catalog source. Commands that need data load the whole catalog into an
//! [`App`] and drive it with the same events an interactive session would.

mod admin;
mod browse;
mod categories;
mod completions;
mod render;
mod shell;
mod stats;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use catalog_core::{App, CatalogSource, Config, DatasetKind, Event, Loader, SectionView, View};
use tracing::debug;

use crate::cli::FilterArgs;
use crate::error::CliError;

pub use admin::{add, export, import, preview};
pub use browse::execute as browse;
pub use categories::execute as categories;
pub use completions::generate;
pub use render::execute as render;
pub use shell::execute as shell;
pub use stats::execute as stats;

/// Resolved configuration and source shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration, with command-line overrides applied.
    pub config: Config,
    /// Where the datasets are read from.
    pub source: CatalogSource,
}

impl Context {
    /// Resolve configuration from `--config` (or the platform default) and `--data`.
    pub fn resolve(config_path: Option<&PathBuf>, data: Option<&str>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(CliError::not_found(anyhow::anyhow!(
                    "config file {} does not exist",
                    path.display()
                ))
                .into());
            },
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if let Some(location) = data {
            config.source.location = location.to_string();
        }

        let source = CatalogSource::parse(&config.source.location)
            .map_err(|e| CliError::usage(anyhow::Error::new(e)))?;
        debug!("catalog source: {source:?}");
        Ok(Self { config, source })
    }

    /// Load all three datasets into a fresh app.
    pub async fn load_app(&self) -> Result<App> {
        let loader = Loader::with_source(self.source.clone(), &self.config)
            .context("failed to set up the catalog loader")?;
        let store = loader.load_all().await;
        Ok(App::new(store, &self.config))
    }

    /// Dataset file inside a directory catalog; `None` for remote catalogs.
    pub fn dataset_path(&self, kind: DatasetKind) -> Option<PathBuf> {
        self.source
            .directory()
            .map(|dir| dir.join(self.config.file_name(kind)))
    }
}

/// Drive `app` to the section and filters in `filters` and return its view.
fn catalog_view(app: &mut App, filters: &FilterArgs) -> Result<SectionView> {
    let section = filters.section;
    let mut view = app.dispatch(Event::SelectSection(section));
    if let Some(category) = &filters.category {
        view = app.dispatch(Event::SelectCategory {
            section,
            category: category.clone(),
        });
    }
    if !filters.search.is_empty() {
        view = app.dispatch(Event::Search {
            section,
            term: filters.search.clone(),
        });
    }

    match view {
        Some(View::Catalog(view)) => Ok(view),
        _ => Err(CliError::internal(anyhow::anyhow!("section {section} produced no catalog view")).into()),
    }
}

/// The load failure behind a section view, as a CLI error.
fn view_failure(app: &App, view: &SectionView) -> Option<anyhow::Error> {
    view.error.as_ref()?;
    let kind = view.section.dataset()?;
    app.store()
        .failure_of(kind)
        .map(|failure| CliError::load_failure(failure).into())
}
