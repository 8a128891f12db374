//! Record types of the three catalog datasets and their shared [`Record`] trait.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::{CatalogStore, Collection};
use crate::{Error, Result};

/// One of the three collections the catalog is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    /// AI tools, split into favourites and the general grid.
    Tools,
    /// Articles, videos and courses.
    Learning,
    /// MCP servers.
    McpServers,
}

impl DatasetKind {
    /// All datasets in load/display order.
    pub const ALL: [Self; 3] = [Self::Tools, Self::Learning, Self::McpServers];

    /// Stable identifier used on the command line and in JSON output.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::Learning => "learning",
            Self::McpServers => "mcp-servers",
        }
    }

    /// File the dataset is read from and exported to unless configured otherwise.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Tools => "tools.json",
            Self::Learning => "learning.json",
            Self::McpServers => "mcp.json",
        }
    }

    /// Label of the "all" category pill of the section showing this dataset.
    #[must_use]
    pub const fn all_label(self) -> &'static str {
        match self {
            Self::Tools => "All Tools",
            Self::Learning => "All Resources",
            Self::McpServers => "All Servers",
        }
    }

    /// Plural noun used in status messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::Learning => "learning resources",
            Self::McpServers => "MCP servers",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DatasetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tools" | "tool" => Ok(Self::Tools),
            "learning" | "learn" => Ok(Self::Learning),
            "mcp-servers" | "mcp" | "mcp_servers" => Ok(Self::McpServers),
            other => Err(Error::NotFound(format!("unknown dataset '{other}'"))),
        }
    }
}

/// Pricing tier of a tool or MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pricing {
    /// Free to use (first form option).
    #[default]
    Free,
    /// Paid only.
    Paid,
    /// Free tier with paid upgrades.
    Freemium,
}

impl Pricing {
    /// Form options in display order.
    pub const OPTIONS: [Self; 3] = [Self::Free, Self::Paid, Self::Freemium];

    /// JSON value of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
            Self::Freemium => "freemium",
        }
    }

    /// Glyph shown on the pricing badge.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Free => "✨",
            Self::Paid => "💎",
            Self::Freemium => "🎯",
        }
    }

    /// Label shown next to the glyph.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Paid => "Paid",
            Self::Freemium => "Freemium",
        }
    }

    /// Whether the tier can be used without paying.
    #[must_use]
    pub const fn has_free_tier(self) -> bool {
        matches!(self, Self::Free | Self::Freemium)
    }
}

impl FromStr for Pricing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::OPTIONS
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Other(format!(
                    "unknown pricing '{s}' (expected free, paid or freemium)"
                ))
            })
    }
}

/// Whether a record is one of the curator's personal favourites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Favourite {
    /// Not a favourite (first form option).
    #[default]
    No,
    /// Shown in the dedicated favourites grid.
    Yes,
}

impl Favourite {
    /// Form options in display order.
    pub const OPTIONS: [Self; 2] = [Self::No, Self::Yes];

    /// JSON value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }

    /// `true` for [`Favourite::Yes`].
    #[must_use]
    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl FromStr for Favourite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::OPTIONS
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Other(format!("unknown favourite flag '{s}' (expected yes or no)")))
    }
}

/// Difficulty of a learning resource.
///
/// The three known levels are recognised; anything else is kept verbatim so a
/// collection survives an export/import round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    /// Entry level (first form option).
    #[default]
    Beginner,
    /// Some prior knowledge expected.
    Intermediate,
    /// Expert material.
    Advanced,
    /// A level outside the known vocabulary.
    Other(String),
}

impl Difficulty {
    /// Known levels in form order.
    pub const KNOWN: [&'static str; 3] = ["beginner", "intermediate", "advanced"];

    /// JSON value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Other(level) => level,
        }
    }
}

impl From<String> for Difficulty {
    fn from(value: String) -> Self {
        let level = value.trim();
        if level.eq_ignore_ascii_case("beginner") {
            Self::Beginner
        } else if level.eq_ignore_ascii_case("intermediate") {
            Self::Intermediate
        } else if level.eq_ignore_ascii_case("advanced") {
            Self::Advanced
        } else {
            Self::Other(value)
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        match value {
            Difficulty::Other(level) => level,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default `type` for learning resources created without one.
pub const DEFAULT_RESOURCE_TYPE: &str = "article";

/// An AI tool entry (`tools.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Display name.
    pub name: String,
    /// Display glyph, usually an emoji.
    pub icon: String,
    /// Target URL.
    pub link: String,
    /// One-paragraph description.
    pub description: String,
    /// Category slug, e.g. `image-generation`.
    pub category: String,
    /// Pricing tier; `free` when absent.
    pub pricing: Pricing,
    /// Hover text for the pricing badge.
    #[serde(rename = "pricingNote", default, skip_serializing_if = "Option::is_none")]
    pub pricing_note: Option<String>,
    /// Favourite flag; `no` when absent.
    pub personal_favourite: Favourite,
    /// Fields this catalog does not interpret, kept so a save writes them back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A learning resource entry (`learning.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    /// Display name.
    pub name: String,
    /// Display glyph, usually an emoji.
    pub icon: String,
    /// Target URL.
    pub link: String,
    /// One-paragraph description.
    pub description: String,
    /// Category slug, e.g. `image-generation`.
    pub category: String,
    /// Difficulty level; `beginner` when absent.
    pub difficulty: Difficulty,
    /// Resource type such as `article` or `video`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Fields this catalog does not interpret, kept so a save writes them back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An MCP server entry (`mcp.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    /// Display name.
    pub name: String,
    /// Display glyph, usually an emoji.
    pub icon: String,
    /// Target URL.
    pub link: String,
    /// One-paragraph description.
    pub description: String,
    /// Category slug, e.g. `image-generation`.
    pub category: String,
    /// Pricing tier; `free` when absent.
    pub pricing: Pricing,
    /// Favourite flag; `no` when absent.
    pub personal_favourite: Favourite,
    /// Fields this catalog does not interpret, kept so a save writes them back.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Behaviour shared by the three record kinds.
///
/// The query engine and renderer only ever see records through this trait,
/// so the filter predicate is written once for all collections.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Collection this record kind lives in.
    const KIND: DatasetKind;

    /// Optional JSON fields and the value used when a document omits them.
    const DEFAULTS: &'static [(&'static str, &'static str)];

    /// Display name.
    fn name(&self) -> &str;
    /// Display glyph.
    fn icon(&self) -> &str;
    /// Target URL.
    fn link(&self) -> &str;
    /// One-paragraph description.
    fn description(&self) -> &str;
    /// Category slug.
    fn category(&self) -> &str;

    #[doc(hidden)]
    fn collection(store: &CatalogStore) -> &Collection<Self>;
    #[doc(hidden)]
    fn collection_mut(store: &mut CatalogStore) -> &mut Collection<Self>;
}

macro_rules! record_accessors {
    () => {
        fn name(&self) -> &str {
            &self.name
        }

        fn icon(&self) -> &str {
            &self.icon
        }

        fn link(&self) -> &str {
            &self.link
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn category(&self) -> &str {
            &self.category
        }
    };
}

impl Record for Tool {
    const KIND: DatasetKind = DatasetKind::Tools;
    const DEFAULTS: &'static [(&'static str, &'static str)] =
        &[("pricing", "free"), ("personal_favourite", "no")];

    record_accessors!();

    fn collection(store: &CatalogStore) -> &Collection<Self> {
        &store.tools
    }

    fn collection_mut(store: &mut CatalogStore) -> &mut Collection<Self> {
        &mut store.tools
    }
}

impl Record for LearningResource {
    const KIND: DatasetKind = DatasetKind::Learning;
    const DEFAULTS: &'static [(&'static str, &'static str)] =
        &[("difficulty", "beginner"), ("type", DEFAULT_RESOURCE_TYPE)];

    record_accessors!();

    fn collection(store: &CatalogStore) -> &Collection<Self> {
        &store.learning
    }

    fn collection_mut(store: &mut CatalogStore) -> &mut Collection<Self> {
        &mut store.learning
    }
}

impl Record for McpServer {
    const KIND: DatasetKind = DatasetKind::McpServers;
    const DEFAULTS: &'static [(&'static str, &'static str)] =
        &[("pricing", "free"), ("personal_favourite", "no")];

    record_accessors!();

    fn collection(store: &CatalogStore) -> &Collection<Self> {
        &store.mcp_servers
    }

    fn collection_mut(store: &mut CatalogStore) -> &mut Collection<Self> {
        &mut store.mcp_servers
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_json_field_names() {
        let tool = Tool {
            name: "Alpha".into(),
            icon: "🤖".into(),
            link: "https://alpha.example".into(),
            description: "Writes things".into(),
            category: "writing".into(),
            pricing: Pricing::Freemium,
            pricing_note: Some("10 docs/month free".into()),
            personal_favourite: Favourite::Yes,
            extra: Default::default(),
        };

        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["pricing"], "freemium");
        assert_eq!(value["pricingNote"], "10 docs/month free");
        assert_eq!(value["personal_favourite"], "yes");
    }

    #[test]
    fn test_absent_pricing_note_is_omitted() {
        let tool = Tool {
            name: "Beta".into(),
            icon: "🧪".into(),
            link: "https://beta.example".into(),
            description: "Codes things".into(),
            category: "coding".into(),
            pricing: Pricing::Paid,
            pricing_note: None,
            personal_favourite: Favourite::No,
            extra: Default::default(),
        };

        let value = serde_json::to_value(&tool).unwrap();
        assert!(value.get("pricingNote").is_none());
    }

    #[test]
    fn test_difficulty_preserves_unknown_levels() {
        let known: Difficulty = serde_json::from_str("\"advanced\"").unwrap();
        assert_eq!(known, Difficulty::Advanced);

        let shouted: Difficulty = serde_json::from_str("\"Beginner\"").unwrap();
        assert_eq!(shouted, Difficulty::Beginner);
        assert_eq!(Difficulty::from(" ADVANCED ".to_string()), Difficulty::Advanced);

        let custom: Difficulty = serde_json::from_str("\"all-levels\"").unwrap();
        assert_eq!(custom, Difficulty::Other("all-levels".into()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"all-levels\"");
    }

    #[test]
    fn test_all_pill_labels() {
        assert_eq!(DatasetKind::Tools.all_label(), "All Tools");
        assert_eq!(DatasetKind::Learning.all_label(), "All Resources");
        assert_eq!(DatasetKind::McpServers.all_label(), "All Servers");
    }

    #[test]
    fn test_learning_type_field_is_renamed() {
        let json = r#"{"name":"Intro","icon":"📘","link":"https://x","description":"d",
            "category":"basics","difficulty":"beginner","type":"video"}"#;
        let resource: LearningResource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.resource_type, "video");
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Freemium".parse::<Pricing>().unwrap(), Pricing::Freemium);
        assert!("cheap".parse::<Pricing>().is_err());
        assert_eq!(" yes ".parse::<Favourite>().unwrap(), Favourite::Yes);
        assert_eq!("mcp".parse::<DatasetKind>().unwrap(), DatasetKind::McpServers);
        assert!("videos".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn test_pricing_badges() {
        assert_eq!(Pricing::Free.glyph(), "✨");
        assert_eq!(Pricing::Paid.label(), "Paid");
        assert!(Pricing::Freemium.has_free_tier());
        assert!(!Pricing::Paid.has_free_tier());
    }
}
