//! Renderer: turns filtered records into a surface-neutral view model.
//!
//! A [`SectionView`] holds everything a surface needs to draw one section:
//! the category pills, one or more [`Grid`]s of [`Card`]s, and the empty-state
//! or load-error indicators. Surfaces ([`html`], the CLI text/JSON printers)
//! only read this model; none of them filter or sort.

pub mod html;

use serde::Serialize;
use tracing::debug;

use crate::nav::Section;
use crate::query::{self, CategoryFilter, Query, format_category_label};
use crate::store::CatalogStore;
use crate::types::{DatasetKind, LearningResource, McpServer, Pricing, Record, Tool};

/// Delay between the reveal of consecutive cards.
pub const REVEAL_STEP_MS: u64 = 50;

/// Pricing indicator shown on tool and MCP server cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingBadge {
    /// Tier the badge stands for.
    pub tier: Pricing,
    /// Badge glyph.
    pub glyph: &'static str,
    /// Badge label.
    pub label: &'static str,
    /// Hover text, from `pricingNote`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PricingBadge {
    /// Badge for a tier with an optional note.
    #[must_use]
    pub const fn new(tier: Pricing, note: Option<String>) -> Self {
        Self {
            tier,
            glyph: tier.glyph(),
            label: tier.label(),
            note,
        }
    }
}

/// Kind-specific part of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum CardDetail {
    /// Tool card: pricing badge.
    Tool {
        /// Pricing indicator.
        pricing: PricingBadge,
    },
    /// Learning card: difficulty and type badges.
    Learning {
        /// Difficulty badge text.
        difficulty: String,
        /// Type badge text.
        #[serde(rename = "type")]
        resource_type: String,
    },
    /// MCP server card: pricing badge.
    McpServer {
        /// Pricing indicator.
        pricing: PricingBadge,
    },
}

/// One rendered record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Position in the grid; also the reveal order.
    pub index: usize,
    /// Display glyph.
    pub icon: String,
    /// Display name.
    pub name: String,
    /// Raw category slug.
    pub category: String,
    /// Display label of the category.
    pub category_label: String,
    /// Card body text.
    pub description: String,
    /// Target opened in a new browsing context.
    pub link: String,
    /// Cosmetic staggered reveal: `index * REVEAL_STEP_MS`.
    pub reveal_delay_ms: u64,
    /// Kind-specific badges.
    #[serde(flatten)]
    pub detail: CardDetail,
}

/// Records that can be drawn as a card.
pub trait ToCard: Record {
    /// The kind-specific badges.
    fn detail(&self) -> CardDetail;

    /// Build the card at position `index`.
    fn to_card(&self, index: usize) -> Card {
        Card {
            index,
            icon: self.icon().to_string(),
            name: self.name().to_string(),
            category: self.category().to_string(),
            category_label: format_category_label(self.category()),
            description: self.description().to_string(),
            link: self.link().to_string(),
            reveal_delay_ms: REVEAL_STEP_MS.saturating_mul(index as u64),
            detail: self.detail(),
        }
    }
}

impl ToCard for Tool {
    fn detail(&self) -> CardDetail {
        CardDetail::Tool {
            pricing: PricingBadge::new(self.pricing, self.pricing_note.clone()),
        }
    }
}

impl ToCard for LearningResource {
    fn detail(&self) -> CardDetail {
        CardDetail::Learning {
            difficulty: self.difficulty.as_str().to_string(),
            resource_type: self.resource_type.clone(),
        }
    }
}

impl ToCard for McpServer {
    fn detail(&self) -> CardDetail {
        CardDetail::McpServer {
            pricing: PricingBadge::new(self.pricing, None),
        }
    }
}

/// Identity of a grid; each grid has its own empty-state indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridId {
    /// Favourite tools.
    Favourites,
    /// Every other tool.
    Tools,
    /// Learning resources.
    Learning,
    /// MCP servers.
    McpServers,
}

impl GridId {
    /// Stable identifier.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Favourites => "favourites",
            Self::Tools => "tools",
            Self::Learning => "learning",
            Self::McpServers => "mcp-servers",
        }
    }

    /// Heading drawn above the grid.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Favourites => "Personal Favourites",
            Self::Tools => "All Tools",
            Self::Learning => "Learning Resources",
            Self::McpServers => "MCP Servers",
        }
    }

    /// Text of the grid's "no results" indicator.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Favourites => "No favourites match your filters.",
            Self::Tools => "No tools found. Try a different search or category.",
            Self::Learning => "No learning resources found. Try a different search or category.",
            Self::McpServers => "No MCP servers found. Try a different search or category.",
        }
    }
}

/// A grid of cards, or its empty-state indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    /// Which grid this is.
    pub id: GridId,
    /// Cards in sequence order; empty whenever `empty_state` is set.
    pub cards: Vec<Card>,
    /// Whether the "no results" indicator is shown instead of cards.
    pub empty_state: bool,
}

impl Grid {
    /// Render `records` into a grid; an empty sequence turns the indicator on.
    #[must_use]
    pub fn from_records<R: ToCard>(id: GridId, records: &[&R]) -> Self {
        let cards: Vec<Card> = records
            .iter()
            .enumerate()
            .map(|(index, record)| record.to_card(index))
            .collect();
        Self {
            id,
            empty_state: cards.is_empty(),
            cards,
        }
    }
}

/// A category filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPill {
    /// Category slug, or `"all"`.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Exactly one pill among siblings is active.
    pub active: bool,
}

/// Build the pills of a section: the "all" pill first, then one per category.
#[must_use]
pub fn category_pills(
    all_label: &str,
    categories: &[String],
    active: &CategoryFilter,
) -> Vec<CategoryPill> {
    let all = CategoryPill {
        value: query::ALL_CATEGORIES.to_string(),
        label: all_label.to_string(),
        active: *active == CategoryFilter::All,
    };

    std::iter::once(all)
        .chain(categories.iter().map(|category| CategoryPill {
            active: matches!(active, CategoryFilter::Only(slug) if slug == category),
            label: format_category_label(category),
            value: category.clone(),
        }))
        .collect()
}

/// Everything needed to draw one catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    /// Section being drawn.
    pub section: Section,
    /// Filters the view was rendered with.
    pub query: Query,
    /// Category controls; empty when the dataset failed to load.
    pub pills: Vec<CategoryPill>,
    /// Grids in display order; empty when the dataset failed to load.
    pub grids: Vec<Grid>,
    /// Load error shown in place of the grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of records in the underlying collection.
    pub total: usize,
}

impl SectionView {
    /// Number of cards across all grids.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.grids.iter().map(|grid| grid.cards.len()).sum()
    }

    /// Look up a grid by id.
    #[must_use]
    pub fn grid(&self, id: GridId) -> Option<&Grid> {
        self.grids.iter().find(|grid| grid.id == id)
    }
}

/// Render the section showing `kind`.
#[must_use]
pub fn render_dataset(store: &CatalogStore, kind: DatasetKind, query: &Query) -> SectionView {
    let view = match kind {
        DatasetKind::Tools => render_tools(store, query),
        DatasetKind::Learning => render_simple::<LearningResource>(store, query, GridId::Learning),
        DatasetKind::McpServers => render_simple::<McpServer>(store, query, GridId::McpServers),
    };
    debug!(
        "rendered {} section: {} cards in {} grids",
        kind,
        view.card_count(),
        view.grids.len()
    );
    view
}

/// Render the tools section: favourites grid followed by the general grid.
///
/// The favourites grid never shows an indicator of its own. The general grid
/// shows it only when both partitions are empty under the current filters.
#[must_use]
pub fn render_tools(store: &CatalogStore, query: &Query) -> SectionView {
    let section = Section::Tools;
    let tools = store.tools();
    if let Some(failure) = tools.failure() {
        return failed_view(section, query, &failure.message);
    }

    let views = query::filter_tools(tools.records(), query);
    let mut favourites = Grid::from_records(GridId::Favourites, &views.favourites);
    favourites.empty_state = false;
    let mut general = Grid::from_records(GridId::Tools, &views.general);
    general.empty_state = views.is_empty();

    SectionView {
        section,
        query: query.clone(),
        pills: category_pills(
            DatasetKind::Tools.all_label(),
            &query::categories(tools.records()),
            &query.category,
        ),
        grids: vec![favourites, general],
        error: None,
        total: tools.len(),
    }
}

fn render_simple<R: ToCard>(store: &CatalogStore, query: &Query, id: GridId) -> SectionView {
    let section = Section::for_dataset(R::KIND);
    let collection = store.collection::<R>();
    if let Some(failure) = collection.failure() {
        return failed_view(section, query, &failure.message);
    }

    let matched = query::filter(collection.records(), query);
    SectionView {
        section,
        query: query.clone(),
        pills: category_pills(
            R::KIND.all_label(),
            &query::categories(collection.records()),
            &query.category,
        ),
        grids: vec![Grid::from_records(id, &matched)],
        error: None,
        total: collection.len(),
    }
}

fn failed_view(section: Section, query: &Query, message: &str) -> SectionView {
    SectionView {
        section,
        query: query.clone(),
        pills: Vec::new(),
        grids: Vec::new(),
        error: Some(message.to_string()),
        total: 0,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::store::{Collection, LoadFailure};
    use crate::types::{Difficulty, Favourite};

    fn tool(name: &str, category: &str, favourite: Favourite) -> Tool {
        Tool {
            name: name.into(),
            icon: "🤖".into(),
            link: format!("https://{name}.example"),
            description: format!("{name} tool"),
            category: category.into(),
            pricing: Pricing::Freemium,
            pricing_note: Some("first month free".into()),
            personal_favourite: favourite,
            extra: Default::default(),
        }
    }

    fn store_with_tools(tools: Vec<Tool>) -> CatalogStore {
        CatalogStore::new(
            Collection::loaded(tools),
            Collection::loaded(vec![LearningResource {
                name: "Prompting 101".into(),
                icon: "📘".into(),
                link: "https://learn.example".into(),
                description: "Basics".into(),
                category: "prompt-engineering".into(),
                difficulty: Difficulty::Intermediate,
                resource_type: "video".into(),
                extra: Default::default(),
            }]),
            Collection::default(),
        )
    }

    #[test]
    fn test_tool_card_contents() {
        let store = store_with_tools(vec![tool("Alpha", "machine-learning", Favourite::No)]);
        let view = render_tools(&store, &Query::default());
        let card = &view.grid(GridId::Tools).unwrap().cards[0];

        assert_eq!(card.name, "Alpha");
        assert_eq!(card.category_label, "Machine Learning");
        assert_eq!(card.reveal_delay_ms, 0);
        match &card.detail {
            CardDetail::Tool { pricing } => {
                assert_eq!(pricing.glyph, "🎯");
                assert_eq!(pricing.label, "Freemium");
                assert_eq!(pricing.note.as_deref(), Some("first month free"));
            },
            other => panic!("unexpected detail {other:?}"),
        }
    }

    #[test]
    fn test_cards_follow_sequence_order_with_staggered_delay() {
        let store = store_with_tools(vec![
            tool("A", "x", Favourite::No),
            tool("B", "x", Favourite::No),
            tool("C", "x", Favourite::No),
        ]);
        let view = render_tools(&store, &Query::default());
        let cards = &view.grid(GridId::Tools).unwrap().cards;
        let names: Vec<_> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(cards[2].index, 2);
        assert_eq!(cards[2].reveal_delay_ms, 100);
    }

    #[test]
    fn test_learning_card_badges() {
        let store = store_with_tools(Vec::new());
        let view = render_dataset(&store, DatasetKind::Learning, &Query::default());
        let card = &view.grids[0].cards[0];
        assert_eq!(
            card.detail,
            CardDetail::Learning {
                difficulty: "intermediate".into(),
                resource_type: "video".into(),
            }
        );
    }

    #[test]
    fn test_tools_empty_state_only_when_both_partitions_empty() {
        let store = store_with_tools(vec![
            tool("Fav", "coding", Favourite::Yes),
            tool("Gen", "writing", Favourite::No),
        ]);

        let only_fav = render_tools(&store, &Query::new("coding", ""));
        let favourites = only_fav.grid(GridId::Favourites).unwrap();
        let general = only_fav.grid(GridId::Tools).unwrap();
        assert_eq!(favourites.cards.len(), 1);
        assert!(general.cards.is_empty());
        assert!(!general.empty_state);

        let nothing = render_tools(&store, &Query::new("all", "zzz"));
        assert!(nothing.grid(GridId::Tools).unwrap().empty_state);
        assert!(!nothing.grid(GridId::Favourites).unwrap().empty_state);

        let again = render_tools(&store, &Query::new("all", "gen"));
        assert!(!again.grid(GridId::Tools).unwrap().empty_state);
    }

    #[test]
    fn test_single_grid_empty_state_toggles() {
        let store = store_with_tools(Vec::new());
        let empty = render_dataset(&store, DatasetKind::Learning, &Query::new("all", "nope"));
        assert!(empty.grids[0].empty_state);
        assert!(empty.grids[0].cards.is_empty());

        let full = render_dataset(&store, DatasetKind::Learning, &Query::new("all", "prompt"));
        assert!(!full.grids[0].empty_state);
    }

    #[test]
    fn test_pills_have_all_first_and_single_active() {
        let store = store_with_tools(vec![
            tool("A", "writing", Favourite::No),
            tool("B", "coding", Favourite::No),
        ]);

        let view = render_tools(&store, &Query::default());
        let values: Vec<_> = view.pills.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, ["all", "coding", "writing"]);
        assert_eq!(view.pills[0].label, "All Tools");
        assert_eq!(view.pills.iter().filter(|p| p.active).count(), 1);
        assert!(view.pills[0].active);

        let view = render_tools(&store, &Query::new("writing", ""));
        let active: Vec<_> = view.pills.iter().filter(|p| p.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].value, "writing");
    }

    #[test]
    fn test_failed_dataset_renders_error_instead_of_grids() {
        let store = CatalogStore::new(
            Collection::failed(LoadFailure::new(DatasetKind::Tools, "HTTP 500")),
            Collection::default(),
            Collection::default(),
        );
        let view = render_tools(&store, &Query::default());
        assert!(view.grids.is_empty());
        assert!(view.pills.is_empty());
        assert_eq!(view.error.as_deref(), Some("Error loading tools data. Please try again."));

        // The other datasets are unaffected.
        let mcp = render_dataset(&store, DatasetKind::McpServers, &Query::default());
        assert!(mcp.error.is_none());
        assert!(mcp.grids[0].empty_state);
    }

    #[test]
    fn test_card_serializes_flat_with_kind_tag() {
        let card = tool("Alpha", "writing", Favourite::No).to_card(1);
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["kind"], "tool");
        assert_eq!(value["pricing"]["label"], "Freemium");
        assert_eq!(value["reveal_delay_ms"], 50);
    }

    #[test]
    fn test_all_pill_label_follows_dataset() {
        let store = store_with_tools(vec![tool("Alpha", "writing", Favourite::No)]);
        let tools = render_dataset(&store, DatasetKind::Tools, &Query::default());
        let learning = render_dataset(&store, DatasetKind::Learning, &Query::default());
        assert_eq!(tools.pills[0].label, "All Tools");
        assert_eq!(learning.pills[0].label, "All Resources");
        assert!(learning.pills[0].active);
    }
}
