//! Writing collections back to disk.
//!
//! Two save paths exist. When a [`SaveLocationPicker`] is available the user
//! chooses the destination and the file is committed atomically through a
//! temp file. Otherwise the export falls back to a "download" into the
//! download directory, never overwriting an existing file there.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Where a save ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Written to a location chosen through a picker.
    Saved {
        /// File name that was written.
        file_name: String,
        /// Full destination path.
        path: PathBuf,
    },
    /// Written into the download directory.
    Downloaded {
        /// File name that was written; may carry a ` (N)` suffix.
        file_name: String,
        /// Full destination path.
        path: PathBuf,
    },
}

impl SaveOutcome {
    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Saved { path, .. } | Self::Downloaded { path, .. } => path,
        }
    }

    /// Status line shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Saved { file_name, path } => {
                format!("Saved {file_name} to {}", path.display())
            },
            Self::Downloaded { file_name, path } => {
                format!("Downloaded {file_name} to {}", path.display())
            },
        }
    }
}

/// Asks the user where to save a file.
pub trait SaveLocationPicker {
    /// Destination for a file suggested as `suggested_name`; `None` when the
    /// user dismissed the prompt.
    fn pick(&mut self, suggested_name: &str) -> Option<PathBuf>;
}

/// A picker that always answers with the same path.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub PathBuf);

impl SaveLocationPicker for FixedLocation {
    fn pick(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Serialize records as two-space indented JSON with a trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|e| Error::Serialization(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

/// Write `contents` to `path` through a sibling temp file and a rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;

    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!("committed {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// First free name for `file_name` in `dir`: `name.json`, `name (1).json`, ...
#[must_use]
pub fn unique_download_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    (1u32..)
        .map(|n| match extension {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Saves serialized collections through a picker or the download fallback.
pub struct Exporter<'a> {
    picker: Option<&'a mut dyn SaveLocationPicker>,
    download_dir: PathBuf,
}

impl<'a> Exporter<'a> {
    /// Exporter that always uses the download fallback.
    #[must_use]
    pub const fn download(download_dir: PathBuf) -> Self {
        Self {
            picker: None,
            download_dir,
        }
    }

    /// Exporter that asks `picker` for the destination.
    #[must_use]
    pub fn with_picker(picker: &'a mut dyn SaveLocationPicker, download_dir: PathBuf) -> Self {
        Self {
            picker: Some(picker),
            download_dir,
        }
    }

    /// Save `contents` under the suggested `file_name`.
    ///
    /// Returns [`Error::Cancelled`] when the picker is dismissed.
    pub fn save(&mut self, file_name: &str, contents: &str) -> Result<SaveOutcome> {
        let outcome = if let Some(picker) = self.picker.as_deref_mut() {
            let path = picker.pick(file_name).ok_or(Error::Cancelled)?;
            write_atomic(&path, contents.as_bytes())?;
            SaveOutcome::Saved {
                file_name: display_name(&path, file_name),
                path,
            }
        } else {
            fs::create_dir_all(&self.download_dir)?;
            let path = unique_download_path(&self.download_dir, file_name);
            fs::write(&path, contents)?;
            SaveOutcome::Downloaded {
                file_name: display_name(&path, file_name),
                path,
            }
        };

        info!("{}", outcome.message());
        Ok(outcome)
    }
}

fn display_name(path: &Path, fallback: &str) -> String {
    path.file_name()
        .map_or_else(|| fallback.to_string(), |name| name.to_string_lossy().into_owned())
}
