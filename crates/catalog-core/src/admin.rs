//! Admin editor: the only writer of catalog collections.
//!
//! Every operation reports a [`Status`] and never propagates an error past
//! itself. Operations that change a collection also name the dataset that
//! changed so the caller can re-render whatever shows it.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::error::{Error, Result};
use crate::save::{Exporter, to_pretty_json};
use crate::schema;
use crate::store::CatalogStore;
use crate::types::{
    DEFAULT_RESOURCE_TYPE, DatasetKind, Difficulty, Favourite, LearningResource, McpServer,
    Pricing, Record, Tool,
};

/// Message shown when a required form field is blank.
pub const REQUIRED_MESSAGE: &str = "Name, link and description are required.";

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// The operation succeeded.
    Success,
    /// The operation failed; nothing changed.
    Error,
    /// Neutral information, e.g. a dismissed picker.
    Info,
}

/// Outcome line of an admin operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    /// Tone.
    pub kind: StatusKind,
    /// Text shown to the user.
    pub message: String,
}

impl Status {
    /// Success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    /// Error status.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    /// Informational status.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

/// Status plus the collection the operation changed, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminOutcome {
    /// What to tell the user.
    pub status: Status,
    /// Dataset that was appended to or replaced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<DatasetKind>,
}

impl AdminOutcome {
    const fn unchanged(status: Status) -> Self {
        Self {
            status,
            changed: None,
        }
    }

    const fn changed(status: Status, kind: DatasetKind) -> Self {
        Self {
            status,
            changed: Some(kind),
        }
    }
}

/// How a form field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldInput {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// One of a fixed set of values; the first is the default.
    Choice(&'static [&'static str]),
    /// Free text with suggested values; the first is the default.
    Suggest(&'static [&'static str]),
}

/// One field of the add-record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// JSON field name.
    pub key: &'static str,
    /// Form label.
    pub label: &'static str,
    /// Must be non-blank.
    pub required: bool,
    /// Input kind.
    pub input: FieldInput,
}

const fn field(key: &'static str, label: &'static str, required: bool, input: FieldInput) -> FormField {
    FormField {
        key,
        label,
        required,
        input,
    }
}

const PRICING_OPTIONS: &[&str] = &["free", "paid", "freemium"];
const FAVOURITE_OPTIONS: &[&str] = &["no", "yes"];
const TYPE_SUGGESTIONS: &[&str] = &[DEFAULT_RESOURCE_TYPE, "video", "course", "documentation"];

const COMMON_FIELDS: [FormField; 5] = [
    field("name", "Name", true, FieldInput::Text),
    field("icon", "Icon (emoji)", false, FieldInput::Text),
    field("link", "Link", true, FieldInput::Text),
    field("description", "Description", true, FieldInput::TextArea),
    field("category", "Category", false, FieldInput::Text),
];

/// Fields shown by the add-record form for `kind`, in display order.
#[must_use]
pub fn form_fields(kind: DatasetKind) -> Vec<FormField> {
    let mut fields = COMMON_FIELDS.to_vec();
    match kind {
        DatasetKind::Tools => fields.extend([
            field("pricing", "Pricing", false, FieldInput::Choice(PRICING_OPTIONS)),
            field("pricingNote", "Pricing note", false, FieldInput::Text),
            field("personal_favourite", "Personal favourite", false, FieldInput::Choice(FAVOURITE_OPTIONS)),
        ]),
        DatasetKind::Learning => fields.extend([
            field("difficulty", "Difficulty", false, FieldInput::Suggest(&Difficulty::KNOWN)),
            field("type", "Type", false, FieldInput::Suggest(TYPE_SUGGESTIONS)),
        ]),
        DatasetKind::McpServers => fields.push(field(
            "pricing",
            "Pricing",
            false,
            FieldInput::Choice(PRICING_OPTIONS),
        )),
    }
    fields
}

/// Raw contents of the add-record form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    /// Required.
    pub name: String,
    /// Blank falls back to the configured default glyph.
    pub icon: String,
    /// Required.
    pub link: String,
    /// Required.
    pub description: String,
    /// Blank falls back to the configured default slug.
    pub category: String,
    /// Tools and MCP servers.
    pub pricing: String,
    /// Tools only.
    pub pricing_note: String,
    /// Tools only.
    pub favourite: String,
    /// Learning resources only.
    pub difficulty: String,
    /// Learning resources only.
    pub resource_type: String,
}

impl RecordForm {
    /// Value of the field with JSON name `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "icon" => &self.icon,
            "link" => &self.link,
            "description" => &self.description,
            "category" => &self.category,
            "pricing" => &self.pricing,
            "pricingNote" => &self.pricing_note,
            "personal_favourite" => &self.favourite,
            "difficulty" => &self.difficulty,
            "type" => &self.resource_type,
            _ => return None,
        };
        Some(value)
    }

    /// Set the field with JSON name `key`; unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let slot = match key {
            "name" => &mut self.name,
            "icon" => &mut self.icon,
            "link" => &mut self.link,
            "description" => &mut self.description,
            "category" => &mut self.category,
            "pricing" => &mut self.pricing,
            "pricingNote" => &mut self.pricing_note,
            "personal_favourite" => &mut self.favourite,
            "difficulty" => &mut self.difficulty,
            "type" => &mut self.resource_type,
            _ => return,
        };
        *slot = value.into();
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Source of a dataset file to import.
pub trait FilePicker {
    /// Path chosen by the user, or `None` when dismissed.
    fn pick(&mut self) -> Option<PathBuf>;
}

/// Summary of the target collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    /// Dataset being previewed.
    pub dataset: DatasetKind,
    /// Number of records in the dataset.
    pub count: usize,
    /// Number of records included in `json`.
    pub shown: usize,
    /// Pretty JSON of the last records, most recent last, HTML-escaped.
    pub json: String,
}

/// Editor state: the target dataset and the add-record form.
#[derive(Debug, Clone)]
pub struct AdminEditor {
    target: DatasetKind,
    /// Current form contents.
    pub form: RecordForm,
    defaults: AdminConfig,
}

impl AdminEditor {
    /// Editor targeting tools, with the configured defaults.
    #[must_use]
    pub fn new(defaults: AdminConfig) -> Self {
        Self {
            target: DatasetKind::Tools,
            form: RecordForm::default(),
            defaults,
        }
    }

    /// Dataset the editor works on.
    #[must_use]
    pub const fn target(&self) -> DatasetKind {
        self.target
    }

    /// Switch the target dataset and clear the form.
    pub fn select_dataset(&mut self, kind: DatasetKind) {
        if self.target != kind {
            self.form.clear();
        }
        self.target = kind;
    }

    /// Fields the form shows for the current target.
    #[must_use]
    pub fn fields(&self) -> Vec<FormField> {
        form_fields(self.target)
    }

    /// Validate the form and append the record to the target collection.
    pub fn add(&mut self, store: &mut CatalogStore) -> AdminOutcome {
        let result = match self.target {
            DatasetKind::Tools => self.append::<Tool>(store),
            DatasetKind::Learning => self.append::<LearningResource>(store),
            DatasetKind::McpServers => self.append::<McpServer>(store),
        };

        match result {
            Ok(name) => {
                let message = format!("Added \"{name}\" to {} (not saved yet)", self.target.label());
                info!("{message}");
                self.form.clear();
                AdminOutcome::changed(Status::success(message), self.target)
            },
            Err(message) => AdminOutcome::unchanged(Status::error(message)),
        }
    }

    fn append<R: Record>(&self, store: &mut CatalogStore) -> std::result::Result<String, String> {
        let record = self.build_record::<R>()?;
        let name = record.name().to_string();
        store.collection_mut::<R>().push(record);
        Ok(name)
    }

    fn build_record<R: Record>(&self) -> std::result::Result<R, String> {
        let form = &self.form;
        if [&form.name, &form.link, &form.description]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(REQUIRED_MESSAGE.to_string());
        }

        let mut fields = Map::new();
        for field in form_fields(R::KIND) {
            let value = form.get(field.key).unwrap_or_default().trim();
            let value = match (field.key, value.is_empty()) {
                ("icon", true) => self.defaults.default_icon.as_str(),
                ("category", true) => self.defaults.default_category.as_str(),
                (_, true) => continue,
                ("pricing", false) => {
                    value.parse::<Pricing>().map_err(|e| e.to_string())?;
                    value
                },
                ("personal_favourite", false) => {
                    value.parse::<Favourite>().map_err(|e| e.to_string())?;
                    value
                },
                _ => value,
            };
            let value = match field.input {
                FieldInput::Choice(_) => value.to_ascii_lowercase(),
                _ => value.to_string(),
            };
            fields.insert(field.key.to_string(), Value::String(value));
        }

        let mut records = schema::decode_value::<R>(Value::Array(vec![Value::Object(fields)]))
            .map_err(|e| e.to_string())?;
        records.pop().ok_or_else(|| REQUIRED_MESSAGE.to_string())
    }

    /// Replace the target collection with the records in `bytes`.
    pub fn load_bytes(&self, store: &mut CatalogStore, bytes: &[u8]) -> AdminOutcome {
        let result = match self.target {
            DatasetKind::Tools => replace_from::<Tool>(store, bytes),
            DatasetKind::Learning => replace_from::<LearningResource>(store, bytes),
            DatasetKind::McpServers => replace_from::<McpServer>(store, bytes),
        };

        match result {
            Ok(count) => {
                let message = format!("Loaded {count} {}", self.target.label());
                info!("{message}");
                AdminOutcome::changed(Status::success(message), self.target)
            },
            Err(e) => {
                warn!("import into {} rejected: {e}", self.target);
                AdminOutcome::unchanged(Status::error(import_error_message(&e)))
            },
        }
    }

    /// Ask `picker` for a file and replace the target collection with it.
    pub fn load_file(&self, store: &mut CatalogStore, picker: &mut dyn FilePicker) -> AdminOutcome {
        let Some(path) = picker.pick() else {
            return AdminOutcome::unchanged(Status::info("Load cancelled."));
        };
        match fs::read(&path) {
            Ok(bytes) => self.load_bytes(store, &bytes),
            Err(e) => AdminOutcome::unchanged(Status::error(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Target collection as pretty JSON.
    pub fn export_json(&self, store: &CatalogStore) -> Result<String> {
        match self.target {
            DatasetKind::Tools => to_pretty_json(store.tools().records()),
            DatasetKind::Learning => to_pretty_json(store.learning().records()),
            DatasetKind::McpServers => to_pretty_json(store.mcp_servers().records()),
        }
    }

    /// File name suggested when saving the target collection.
    #[must_use]
    pub const fn suggested_file_name(&self) -> &'static str {
        self.target.default_file_name()
    }

    /// Serialize the target collection and hand it to `exporter`.
    pub fn save(&self, store: &CatalogStore, exporter: &mut Exporter<'_>) -> Status {
        let outcome = self
            .export_json(store)
            .and_then(|json| exporter.save(self.suggested_file_name(), &json));
        match outcome {
            Ok(outcome) => Status::success(outcome.message()),
            Err(Error::Cancelled) => Status::info("Save cancelled."),
            Err(e) => {
                warn!("save of {} failed: {e}", self.target);
                Status::error(format!("Save failed: {e}"))
            },
        }
    }

    /// Count and last entries of the target collection.
    pub fn preview(&self, store: &CatalogStore) -> Result<Preview> {
        let last = self.defaults.preview_entries;
        let (count, json) = match self.target {
            DatasetKind::Tools => tail_json(store.tools().records(), last)?,
            DatasetKind::Learning => tail_json(store.learning().records(), last)?,
            DatasetKind::McpServers => tail_json(store.mcp_servers().records(), last)?,
        };
        Ok(Preview {
            dataset: self.target,
            count,
            shown: count.min(last),
            json: html_escape::encode_text(&json).into_owned(),
        })
    }

    /// Override how many entries [`AdminEditor::preview`] shows.
    pub fn set_preview_entries(&mut self, entries: usize) {
        self.defaults.preview_entries = entries;
    }
}

fn replace_from<R: Record>(store: &mut CatalogStore, bytes: &[u8]) -> Result<usize> {
    let records = schema::decode_collection::<R>(bytes)?;
    let count = records.len();
    store.collection_mut::<R>().replace(records);
    Ok(count)
}

fn import_error_message(error: &Error) -> String {
    match error {
        Error::InvalidFormat(_) => error.to_string(),
        Error::Parse(detail) => format!("Error parsing JSON file: {detail}"),
        other => format!("Invalid records: {other}"),
    }
}

fn tail_json<R: Serialize>(records: &[R], last: usize) -> Result<(usize, String)> {
    let start = records.len().saturating_sub(last);
    let json = to_pretty_json(records.get(start..).unwrap_or_default())?;
    Ok((records.len(), json))
}
