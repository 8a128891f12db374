//! Query engine: filtering, favourite partitioning and category derivation.
//!
//! Everything here is a pure function of its inputs. Filtering is a stable
//! subsequence selection: records are never reordered, only dropped.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::types::{Record, Tool};

/// Sentinel category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Active category of a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    All,
    /// Only records whose category equals this slug.
    Only(String),
}

impl CategoryFilter {
    /// Whether `category` passes the filter.
    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// The value carried by the matching pill (`"all"` for [`CategoryFilter::All`]).
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(slug) => slug,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<Option<&str>> for CategoryFilter {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::from)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Category plus free-text search, the two inputs of every filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Query {
    /// Active category.
    pub category: CategoryFilter,
    /// Search term; empty matches everything.
    pub search: String,
}

impl Query {
    /// Build a query from a category value and a search term.
    pub fn new(category: impl Into<CategoryFilter>, search: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
        }
    }

    /// The shared predicate applied to every collection.
    ///
    /// A record matches when its category passes the category filter and the
    /// search term is empty or a case-insensitive substring of its name,
    /// description or category.
    #[must_use]
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.category.admits(record.category()) && self.matches_text(record)
    }

    fn matches_text<R: Record>(&self, record: &R) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [record.name(), record.description(), record.category()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Filter a collection, preserving source order.
#[must_use]
pub fn filter<'a, R: Record>(records: &'a [R], query: &Query) -> Vec<&'a R> {
    let matched: Vec<&R> = records.iter().filter(|r| query.matches(*r)).collect();
    debug!(
        "{} query category={} search={:?}: {}/{} records",
        R::KIND,
        query.category,
        query.search,
        matched.len(),
        records.len()
    );
    matched
}

/// The two tool views produced from one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolViews<'a> {
    /// Tools marked `personal_favourite = yes`.
    pub favourites: Vec<&'a Tool>,
    /// Every other tool.
    pub general: Vec<&'a Tool>,
}

impl ToolViews<'_> {
    /// `true` when neither view has a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favourites.is_empty() && self.general.is_empty()
    }

    /// Total number of matching tools across both views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.favourites.len() + self.general.len()
    }
}

/// Partition tools by favourite flag, then filter each partition with the same predicate.
#[must_use]
pub fn filter_tools<'a>(tools: &'a [Tool], query: &Query) -> ToolViews<'a> {
    let (favourites, general): (Vec<&Tool>, Vec<&Tool>) =
        tools.iter().partition(|tool| tool.personal_favourite.is_yes());

    ToolViews {
        favourites: favourites.into_iter().filter(|t| query.matches(*t)).collect(),
        general: general.into_iter().filter(|t| query.matches(*t)).collect(),
    }
}

/// Distinct categories of a collection in lexicographic order.
#[must_use]
pub fn categories<R: Record>(records: &[R]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.category())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Turn a hyphenated slug into a display label.
///
/// ```rust
/// use catalog_core::query::format_category_label;
///
/// assert_eq!(format_category_label("machine-learning"), "Machine Learning");
/// assert_eq!(format_category_label("api"), "Api");
/// assert_eq!(format_category_label(""), "");
/// ```
#[must_use]
pub fn format_category_label(slug: &str) -> String {
    slug.split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Favourite, LearningResource, Pricing};
    use proptest::prelude::*;

    fn tool(name: &str, category: &str, favourite: Favourite) -> Tool {
        Tool {
            name: name.into(),
            icon: "🔧".into(),
            link: format!("https://{}.example", name.to_lowercase()),
            description: format!("{name} helps with {category}"),
            category: category.into(),
            pricing: Pricing::Free,
            pricing_note: None,
            personal_favourite: favourite,
            extra: Default::default(),
        }
    }

    fn names<'a>(records: &[&'a Tool]) -> Vec<&'a str> {
        records.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_alpha_beta_scenario() {
        let mut alpha = tool("Alpha", "writing", Favourite::No);
        alpha.description = "Drafts prose".into();
        let mut beta = tool("Beta", "coding", Favourite::Yes);
        beta.description = "Reviews code".into();
        let tools = vec![alpha, beta];

        // "beta" ends in 'a', so both names contain the term.
        assert_eq!(names(&filter(&tools, &Query::new("all", "a"))), ["Alpha", "Beta"]);
        assert_eq!(names(&filter(&tools, &Query::new("all", "alp"))), ["Alpha"]);
        assert_eq!(names(&filter(&tools, &Query::new("writing", "a"))), ["Alpha"]);

        let views = filter_tools(&tools, &Query::new("all", "a"));
        assert_eq!(names(&views.favourites), ["Beta"]);
        assert_eq!(names(&views.general), ["Alpha"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let tools = vec![
            tool("Notion", "productivity", Favourite::No),
            tool("Cursor", "coding", Favourite::No),
            tool("Midjourney", "image-generation", Favourite::No),
        ];

        assert_eq!(names(&filter(&tools, &Query::new("all", "NOTION"))), ["Notion"]);
        assert_eq!(names(&filter(&tools, &Query::new("all", "Coding"))), ["Cursor"]);
        assert_eq!(names(&filter(&tools, &Query::new("all", "image-gen"))), ["Midjourney"]);
        assert!(filter(&tools, &Query::new("all", "zzz")).is_empty());
    }

    #[test]
    fn test_category_and_search_combine() {
        let tools = vec![
            tool("Copilot", "coding", Favourite::No),
            tool("Codex", "coding", Favourite::No),
            tool("Copy.ai", "writing", Favourite::No),
        ];

        let query = Query::new("coding", "cop");
        assert_eq!(names(&filter(&tools, &query)), ["Copilot"]);
    }

    #[test]
    fn test_category_must_match_exactly() {
        let tools = vec![tool("A", "coding", Favourite::No), tool("B", "coding-tools", Favourite::No)];
        assert_eq!(names(&filter(&tools, &Query::new("coding", ""))), ["A"]);
    }

    #[test]
    fn test_filter_tools_partitions_by_favourite() {
        let tools = vec![
            tool("One", "coding", Favourite::Yes),
            tool("Two", "coding", Favourite::No),
            tool("Three", "writing", Favourite::Yes),
            tool("Four", "writing", Favourite::No),
        ];

        let views = filter_tools(&tools, &Query::default());
        assert_eq!(names(&views.favourites), ["One", "Three"]);
        assert_eq!(names(&views.general), ["Two", "Four"]);

        let views = filter_tools(&tools, &Query::new("writing", ""));
        assert_eq!(names(&views.favourites), ["Three"]);
        assert_eq!(names(&views.general), ["Four"]);
        assert_eq!(views.len(), 2);

        let views = filter_tools(&tools, &Query::new("design", ""));
        assert!(views.is_empty());
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let tools = vec![
            tool("A", "writing", Favourite::No),
            tool("B", "coding", Favourite::No),
            tool("C", "writing", Favourite::No),
            tool("D", "audio", Favourite::No),
        ];
        assert_eq!(categories(&tools), ["audio", "coding", "writing"]);
        assert!(categories::<LearningResource>(&[]).is_empty());
    }

    #[test]
    fn test_appending_new_category_adds_one_pill_in_order() {
        let mut tools = vec![tool("A", "audio", Favourite::No), tool("B", "writing", Favourite::No)];
        let before = categories(&tools);
        assert_eq!(categories(&tools), before);

        tools.push(tool("C", "coding", Favourite::No));
        let after = categories(&tools);
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after, ["audio", "coding", "writing"]);
    }

    #[test]
    fn test_format_category_label() {
        assert_eq!(format_category_label("machine-learning"), "Machine Learning");
        assert_eq!(format_category_label("api"), "Api");
        assert_eq!(format_category_label(""), "");
        assert_eq!(format_category_label("text-to-speech"), "Text To Speech");
        assert_eq!(format_category_label("éclair"), "Éclair");
    }

    #[test]
    fn test_category_filter_from_sentinel() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("coding"), CategoryFilter::Only("coding".into()));
        assert_eq!(CategoryFilter::from(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.as_str(), "all");
    }

    fn arb_tool() -> impl Strategy<Value = Tool> {
        (
            "[A-Za-z]{1,8}",
            prop::sample::select(vec!["coding", "writing", "image-generation", "audio"]),
            "[a-z ]{0,16}",
            any::<bool>(),
        )
            .prop_map(|(name, category, description, fav)| Tool {
                link: format!("https://{name}.example"),
                name,
                icon: "🔧".into(),
                description,
                category: category.to_string(),
                pricing: Pricing::Paid,
                pricing_note: None,
                personal_favourite: if fav { Favourite::Yes } else { Favourite::No },
                extra: Default::default(),
            })
    }

    fn arb_query() -> impl Strategy<Value = Query> {
        (
            prop::sample::select(vec!["all", "coding", "writing", "audio", "video"]),
            "[a-zA-Z]{0,2}",
        )
            .prop_map(|(category, search)| Query::new(category, search))
    }

    proptest! {
        #[test]
        fn prop_default_query_is_identity(tools in prop::collection::vec(arb_tool(), 0..24)) {
            let matched = filter(&tools, &Query::default());
            prop_assert_eq!(matched.len(), tools.len());
            for (a, b) in matched.iter().zip(tools.iter()) {
                prop_assert!(std::ptr::eq(*a, b));
            }
        }

        #[test]
        fn prop_filter_is_stable_exact_selection(
            tools in prop::collection::vec(arb_tool(), 0..24),
            query in arb_query(),
        ) {
            let matched = filter(&tools, &query);
            let expected: Vec<&Tool> = tools.iter().filter(|t| query.matches(*t)).collect();
            prop_assert_eq!(matched.len(), expected.len());
            for (a, b) in matched.iter().zip(expected.iter()) {
                prop_assert!(std::ptr::eq(*a, *b));
            }
            let needle = query.search.to_lowercase();
            for t in &matched {
                prop_assert!(query.category.admits(&t.category));
                prop_assert!(
                    needle.is_empty()
                        || t.name.to_lowercase().contains(&needle)
                        || t.description.to_lowercase().contains(&needle)
                        || t.category.to_lowercase().contains(&needle)
                );
            }
        }

        #[test]
        fn prop_tool_views_partition_the_filtered_result(
            tools in prop::collection::vec(arb_tool(), 0..24),
            query in arb_query(),
        ) {
            let views = filter_tools(&tools, &query);
            let all = filter(&tools, &query);
            prop_assert_eq!(views.len(), all.len());
            for t in &views.favourites {
                prop_assert!(t.personal_favourite.is_yes());
                prop_assert!(!views.general.iter().any(|g| std::ptr::eq(*g, *t)));
            }
            for t in &views.general {
                prop_assert!(!t.personal_favourite.is_yes());
            }
            for t in &all {
                let in_fav = views.favourites.iter().any(|f| std::ptr::eq(*f, *t));
                let in_gen = views.general.iter().any(|g| std::ptr::eq(*g, *t));
                prop_assert!(in_fav != in_gen);
            }
        }

        #[test]
        fn prop_categories_idempotent(tools in prop::collection::vec(arb_tool(), 0..24)) {
            let first = categories(&tools);
            prop_assert_eq!(&first, &categories(&tools));
            let mut sorted = first.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(first, sorted);
        }
    }
}
