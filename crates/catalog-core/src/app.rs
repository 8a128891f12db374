//! Application state and event dispatch.
//!
//! [`App`] owns the store, the selection and the admin editor. Surfaces feed
//! it [`Event`]s and admin requests, and draw whatever [`View`] comes back.

use serde::Serialize;
use tracing::debug;

use crate::admin::{AdminEditor, FilePicker, FormField, Preview, Status};
use crate::config::Config;
use crate::nav::{Event, Section, Selection};
use crate::render::{self, SectionView};
use crate::save::Exporter;
use crate::stats::CatalogStats;
use crate::store::CatalogStore;
use crate::types::DatasetKind;

/// Admin section contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminView {
    /// Dataset the editor targets.
    pub dataset: DatasetKind,
    /// Form fields for that dataset.
    pub fields: Vec<FormField>,
    /// Count and last entries of the dataset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

/// A freshly rendered section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Tools, learning or MCP servers.
    Catalog(SectionView),
    /// The admin editor.
    Admin(AdminView),
}

/// Result of an admin request: its status and the re-rendered section, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    /// Status line.
    pub status: Status,
    /// Active section, when the request changed what it shows.
    pub view: Option<View>,
}

/// The running catalog.
#[derive(Debug, Clone)]
pub struct App {
    store: CatalogStore,
    selection: Selection,
    admin: AdminEditor,
}

impl App {
    /// App over `store`, showing the tools section.
    #[must_use]
    pub fn new(store: CatalogStore, config: &Config) -> Self {
        Self {
            store,
            selection: Selection::default(),
            admin: AdminEditor::new(config.admin.clone()),
        }
    }

    /// Current collections.
    #[must_use]
    pub const fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Active section and filters.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Admin editor state.
    #[must_use]
    pub const fn admin(&self) -> &AdminEditor {
        &self.admin
    }

    /// Admin editor state, for filling in the form.
    pub const fn admin_mut(&mut self) -> &mut AdminEditor {
        &mut self.admin
    }

    /// Headline figures.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::collect(&self.store)
    }

    /// Apply `event`; returns the re-rendered section when anything changed.
    pub fn dispatch(&mut self, event: Event) -> Option<View> {
        debug!("dispatch {event:?}");
        self.selection
            .apply(event, self.admin.target())
            .map(|section| self.render(section))
    }

    /// Render the active section.
    #[must_use]
    pub fn current_view(&self) -> View {
        self.render(self.selection.section)
    }

    fn render(&self, section: Section) -> View {
        match section.dataset() {
            Some(kind) => View::Catalog(render::render_dataset(
                &self.store,
                kind,
                &self.selection.query(),
            )),
            None => View::Admin(AdminView {
                dataset: self.admin.target(),
                fields: self.admin.fields(),
                preview: self.admin.preview(&self.store).ok(),
            }),
        }
    }

    /// Switch the admin target dataset.
    pub fn select_admin_dataset(&mut self, kind: DatasetKind) -> Option<View> {
        self.admin.select_dataset(kind);
        (self.selection.section == Section::Admin).then(|| self.current_view())
    }

    /// Add the record in the admin form.
    pub fn admin_add(&mut self) -> Update {
        let outcome = self.admin.add(&mut self.store);
        self.finish(outcome.status, outcome.changed)
    }

    /// Replace the admin target collection with the contents of `bytes`.
    pub fn admin_load_bytes(&mut self, bytes: &[u8]) -> Update {
        let outcome = self.admin.load_bytes(&mut self.store, bytes);
        self.finish(outcome.status, outcome.changed)
    }

    /// Replace the admin target collection with a picked file.
    pub fn admin_load_file(&mut self, picker: &mut dyn FilePicker) -> Update {
        let outcome = self.admin.load_file(&mut self.store, picker);
        self.finish(outcome.status, outcome.changed)
    }

    /// Save the admin target collection.
    pub fn admin_save(&self, exporter: &mut Exporter<'_>) -> Status {
        self.admin.save(&self.store, exporter)
    }

    fn finish(&mut self, status: Status, changed: Option<DatasetKind>) -> Update {
        let view = changed.and_then(|kind| self.dispatch(Event::CollectionChanged(kind)));
        Update { status, view }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::render::GridId;
    use crate::store::Collection;
    use crate::types::{Favourite, Pricing, Tool};

    fn tool(name: &str, category: &str) -> Tool {
        Tool {
            name: name.into(),
            icon: "🤖".into(),
            link: "https://example.com".into(),
            description: format!("{name} helper"),
            category: category.into(),
            pricing: Pricing::Free,
            pricing_note: None,
            personal_favourite: Favourite::No,
            extra: Default::default(),
        }
    }

    fn app() -> App {
        let store = CatalogStore::new(
            Collection::loaded(vec![tool("Alpha", "writing"), tool("Beta", "coding")]),
            Collection::default(),
            Collection::default(),
        );
        App::new(store, &Config::default())
    }

    fn catalog(view: Option<View>) -> SectionView {
        match view {
            Some(View::Catalog(view)) => view,
            other => panic!("expected a catalog view, got {other:?}"),
        }
    }

    fn names(view: &SectionView) -> Vec<String> {
        view.grid(GridId::Tools)
            .unwrap()
            .cards
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    #[test]
    fn test_search_and_category_rerender_active_section() {
        let mut app = app();
        let view = catalog(app.dispatch(Event::Search {
            section: Section::Tools,
            term: "alp".into(),
        }));
        assert_eq!(names(&view), ["Alpha"]);

        let view = catalog(app.dispatch(Event::SelectCategory {
            section: Section::Tools,
            category: "coding".into(),
        }));
        assert!(names(&view).is_empty());
        assert!(view.grid(GridId::Tools).unwrap().empty_state);
    }

    #[test]
    fn test_inactive_section_event_returns_nothing() {
        let mut app = app();
        assert!(
            app.dispatch(Event::Search {
                section: Section::Learning,
                term: "x".into(),
            })
            .is_none()
        );
    }

    #[test]
    fn test_admin_add_rerenders_active_tools_section() {
        let mut app = app();
        let form = &mut app.admin_mut().form;
        form.name = "Gamma".into();
        form.link = "https://gamma.example".into();
        form.description = "New".into();

        let update = app.admin_add();
        assert!(update.status.is_success());
        let view = catalog(update.view);
        assert_eq!(names(&view), ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_admin_section_view_tracks_target() {
        let mut app = app();
        let view = app.dispatch(Event::SelectSection(Section::Admin));
        let Some(View::Admin(admin)) = view else {
            panic!("expected admin view");
        };
        assert_eq!(admin.dataset, DatasetKind::Tools);
        assert_eq!(admin.preview.unwrap().count, 2);

        let Some(View::Admin(admin)) = app.select_admin_dataset(DatasetKind::Learning) else {
            panic!("expected admin view");
        };
        assert_eq!(admin.preview.unwrap().count, 0);

        let update = app.admin_load_bytes(b"[]");
        assert!(update.status.is_success());
        assert!(matches!(update.view, Some(View::Admin(_))));
    }
}
