//! File and save-location pickers backed by terminal prompts.
//!
//! A dismissed prompt (Esc, Ctrl-C or empty input) resolves to `None`, which
//! the admin editor reports as a cancelled operation.

use std::path::{Path, PathBuf};

use catalog_core::{FilePicker, SaveLocationPicker};
use inquire::{Confirm, Text};
use is_terminal::IsTerminal;
use tracing::debug;

/// Whether prompts may be shown.
pub fn is_interactive() -> bool {
    std::env::var_os("CATALOG_NON_INTERACTIVE").is_none() && std::io::stdin().is_terminal()
}

/// Ask whether `path` may be overwritten; `false` when prompts are unavailable.
pub fn confirm_overwrite(path: &Path) -> bool {
    if !is_interactive() {
        return false;
    }
    Confirm::new(&format!("{} exists. Overwrite it?", path.display()))
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

/// Prompts for the path of a dataset file to import.
#[derive(Debug, Default)]
pub struct PromptFilePicker;

impl FilePicker for PromptFilePicker {
    fn pick(&mut self) -> Option<PathBuf> {
        let answer = Text::new("Dataset file to load:")
            .with_help_message("Esc to cancel")
            .prompt_skippable()
            .ok()
            .flatten()?;
        let answer = answer.trim();
        (!answer.is_empty()).then(|| PathBuf::from(answer))
    }
}

/// Prompts for a destination, suggesting a file in `default_dir`.
#[derive(Debug)]
pub struct PromptSaveLocation {
    default_dir: PathBuf,
}

impl PromptSaveLocation {
    /// Picker suggesting files inside `default_dir`.
    pub const fn new(default_dir: PathBuf) -> Self {
        Self { default_dir }
    }
}

impl SaveLocationPicker for PromptSaveLocation {
    fn pick(&mut self, suggested_name: &str) -> Option<PathBuf> {
        let default = self.default_dir.join(suggested_name).display().to_string();
        let answer = Text::new("Save to:")
            .with_default(&default)
            .with_help_message("Esc to cancel")
            .prompt_skippable()
            .ok()
            .flatten()?;
        let path = PathBuf::from(answer.trim());
        if path.as_os_str().is_empty() {
            return None;
        }
        (!path.exists() || confirm_overwrite(&path)).then_some(path)
    }
}

/// Saves to a fixed path, asking before replacing an existing file.
#[derive(Debug)]
pub struct OverwriteGuard {
    path: PathBuf,
}

impl OverwriteGuard {
    /// Guard for `path`.
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SaveLocationPicker for OverwriteGuard {
    fn pick(&mut self, _suggested_name: &str) -> Option<PathBuf> {
        if !self.path.exists() || confirm_overwrite(&self.path) {
            Some(self.path.clone())
        } else {
            debug!("declined to overwrite {}", self.path.display());
            None
        }
    }
}
