//! Concurrent loading of the three datasets.
//!
//! A catalog source is either a local directory or an `http(s)://` base URL;
//! the dataset file names are resolved against it. [`Loader::load_all`] issues
//! the three fetches concurrently and waits for all of them. A dataset that
//! fails to load is recorded as a [`LoadFailure`] on its own collection and
//! never blocks the other two.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::schema::decode_collection;
use crate::store::{CatalogStore, Collection, LoadFailure};
use crate::types::{DatasetKind, LearningResource, McpServer, Record, Tool};
use crate::{Error, Result};

/// Where the dataset files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A local directory.
    Directory(PathBuf),
    /// A base URL; always ends with `/` so file names join beneath it.
    Remote(Url),
}

impl CatalogSource {
    /// Interpret a configured location.
    ///
    /// Anything starting with `http://` or `https://` is a remote source,
    /// everything else a directory path.
    pub fn parse(location: &str) -> Result<Self> {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let mut url = Url::parse(trimmed)
                .map_err(|e| Error::Config(format!("invalid catalog URL '{trimmed}': {e}")))?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Remote(url))
        } else {
            Ok(Self::Directory(PathBuf::from(trimmed)))
        }
    }

    /// The local directory, when the source is one.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::Remote(_) => None,
        }
    }

    /// Human-readable location of a file within the source.
    #[must_use]
    pub fn locate(&self, file_name: &str) -> String {
        match self {
            Self::Directory(dir) => dir.join(file_name).display().to_string(),
            Self::Remote(base) => base
                .join(file_name)
                .map_or_else(|_| format!("{base}{file_name}"), |url| url.to_string()),
        }
    }
}

/// Fetches and decodes the datasets of one catalog source.
pub struct Loader {
    source: CatalogSource,
    config: Config,
    client: Client,
}

impl Loader {
    /// Create a loader for the source named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let source = CatalogSource::parse(&config.source.location)?;
        Self::with_source(source, config)
    }

    /// Create a loader for an explicit source, taking file names and timeout from `config`.
    pub fn with_source(source: CatalogSource, config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.source.timeout_secs))
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            source,
            config: config.clone(),
            client,
        })
    }

    /// The source this loader reads from.
    #[must_use]
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetch the raw bytes of one dataset.
    pub async fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>> {
        let file_name = self.config.file_name(kind);
        match &self.source {
            CatalogSource::Directory(dir) => {
                let path = dir.join(file_name);
                debug!("reading {}", path.display());
                tokio::fs::read(&path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::NotFound(format!("dataset file '{}' does not exist", path.display()))
                    } else {
                        Error::Io(e)
                    }
                })
            },
            CatalogSource::Remote(base) => {
                let url = base
                    .join(file_name)
                    .map_err(|e| Error::Config(format!("invalid dataset name '{file_name}': {e}")))?;
                debug!("fetching {}", url);
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if status == StatusCode::NOT_FOUND {
                    return Err(Error::NotFound(format!("Resource not found at '{url}'")));
                }
                let response = response.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            },
        }
    }

    /// Fetch and decode one dataset, recording any failure on the collection.
    pub async fn load<R: Record>(&self) -> Collection<R> {
        let kind = R::KIND;
        let decoded = match self.fetch(kind).await {
            Ok(bytes) => decode_collection::<R>(&bytes),
            Err(e) => Err(e),
        };

        match decoded {
            Ok(records) => {
                info!("loaded {} {} from {}", records.len(), kind.label(), self.describe(kind));
                Collection::loaded(records)
            },
            Err(e) => {
                warn!("failed to load {} from {}: {e}", kind.label(), self.describe(kind));
                Collection::failed(LoadFailure::from_error(kind, &e))
            },
        }
    }

    /// Load all three datasets concurrently.
    pub async fn load_all(&self) -> CatalogStore {
        let (tools, learning, mcp_servers) = tokio::join!(
            self.load::<Tool>(),
            self.load::<LearningResource>(),
            self.load::<McpServer>(),
        );
        CatalogStore::new(tools, learning, mcp_servers)
    }

    fn describe(&self, kind: DatasetKind) -> String {
        self.source.locate(self.config.file_name(kind))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory_source() {
        let source = CatalogSource::parse("./data").unwrap();
        assert_eq!(source.directory(), Some(Path::new("./data")));
        assert!(source.locate("tools.json").ends_with("tools.json"));
    }

    #[test]
    fn test_parse_remote_source_adds_trailing_slash() {
        let source = CatalogSource::parse("https://example.com/catalog").unwrap();
        assert_eq!(source.directory(), None);
        assert_eq!(
            source.locate("tools.json"),
            "https://example.com/catalog/tools.json"
        );
    }

    #[test]
    fn test_parse_invalid_url() {
        let err = CatalogSource::parse("https://exa mple.com").unwrap_err();
        assert_eq!(err.category(), "config");
    }
}
