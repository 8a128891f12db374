//! Configuration for the catalog.
//!
//! Configuration is stored as TOML. Every field has a default, so an absent
//! file (or an absent section) simply yields the defaults below.
//!
//! ## File Location
//!
//! - `$CATALOG_CONFIG` when set (resolved by the CLI)
//! - otherwise `<platform config dir>/catalog/config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [source]
//! location = "https://example.com/catalog"
//! tools = "tools.json"
//! learning = "learning.json"
//! mcp_servers = "mcp.json"
//! timeout_secs = 30
//!
//! [admin]
//! default_icon = "🔧"
//! default_category = "misc"
//! preview_entries = 3
//! download_dir = "/home/user/Downloads"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::DatasetKind;
use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the datasets come from.
    pub source: SourceConfig,
    /// Admin editor defaults.
    pub admin: AdminConfig,
}

/// Location and file names of the three datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// A local directory or an `http(s)://` base URL.
    pub location: String,
    /// File name of the tools dataset.
    pub tools: String,
    /// File name of the learning dataset.
    pub learning: String,
    /// File name of the MCP servers dataset.
    pub mcp_servers: String,
    /// HTTP timeout for remote sources, in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: ".".to_string(),
            tools: DatasetKind::Tools.default_file_name().to_string(),
            learning: DatasetKind::Learning.default_file_name().to_string(),
            mcp_servers: DatasetKind::McpServers.default_file_name().to_string(),
            timeout_secs: 30,
        }
    }
}

/// Defaults applied by the admin editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Icon used when the form leaves it blank.
    pub default_icon: String,
    /// Category slug used when the form leaves it blank.
    pub default_category: String,
    /// How many trailing entries the preview shows.
    pub preview_entries: usize,
    /// Where the download fallback writes exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_icon: "🔧".to_string(),
            default_category: "misc".to_string(),
            preview_entries: 3,
            download_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, or defaults if there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let toml = toml::to_string_pretty(self)?;
        fs::write(path, toml)
            .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;
        Ok(())
    }

    /// Platform default path of `config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "catalog", "catalog").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Configured file name of a dataset.
    #[must_use]
    pub fn file_name(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Tools => &self.source.tools,
            DatasetKind::Learning => &self.source.learning,
            DatasetKind::McpServers => &self.source.mcp_servers,
        }
    }

    /// Directory used by the download fallback.
    ///
    /// Falls back to the user's download directory, then the working directory.
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        self.admin
            .download_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf)))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.source.location, ".");
        assert_eq!(config.file_name(DatasetKind::Tools), "tools.json");
        assert_eq!(config.file_name(DatasetKind::McpServers), "mcp.json");
        assert_eq!(config.admin.default_category, "misc");
        assert_eq!(config.admin.preview_entries, 3);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[source]\nlocation = \"https://example.com/data\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.source.location, "https://example.com/data");
        assert_eq!(config.source.learning, "learning.json");
        assert_eq!(config.admin, AdminConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.admin.preview_entries = 5;
        config.admin.download_dir = Some(dir.path().join("downloads"));
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[admin\npreview_entries = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_explicit_download_dir_wins() {
        let mut config = Config::default();
        config.admin.download_dir = Some(PathBuf::from("/tmp/exports"));
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/exports"));
    }
}
