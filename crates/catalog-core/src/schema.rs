//! Per-record validation for decoding dataset documents.
//!
//! Documents are decoded in two steps: the raw JSON is checked for shape
//! (array of objects carrying every required string field) and the optional
//! fields of each record kind are filled in, then the normalised object is
//! handed to serde. A record that is missing a required field fails the whole
//! document; partially-shaped records never reach the store.

use serde_json::{Map, Value};
use tracing::debug;

use crate::types::Record;
use crate::{Error, Result};

/// Fields every card needs, checked in this order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "icon", "link", "description", "category"];

/// Decode a dataset document into a typed collection.
///
/// # Errors
///
/// - [`Error::Parse`] when `bytes` is not valid JSON
/// - [`Error::InvalidFormat`] when the top-level value is not an array
/// - [`Error::MissingField`] for the first record lacking a required field
/// - [`Error::InvalidRecord`] for non-object entries or unusable field values
pub fn decode_collection<R: Record>(bytes: &[u8]) -> Result<Vec<R>> {
    let document: Value =
        serde_json::from_slice(bytes).map_err(|e| Error::Parse(e.to_string()))?;
    decode_value(document)
}

/// Decode an already-parsed JSON value into a typed collection.
pub fn decode_value<R: Record>(document: Value) -> Result<Vec<R>> {
    let Value::Array(items) = document else {
        return Err(Error::InvalidFormat(json_type(&document)));
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_record::<R>(index, item))
        .collect::<Result<Vec<_>>>()?;

    debug!("decoded {} {} records", records.len(), R::KIND);
    Ok(records)
}

fn decode_record<R: Record>(index: usize, item: Value) -> Result<R> {
    let Value::Object(mut fields) = item else {
        return Err(Error::InvalidRecord {
            index,
            reason: format!("expected an object, found {}", json_type(&item)),
        });
    };

    check_required(index, &fields)?;
    apply_defaults::<R>(&mut fields);

    serde_json::from_value(Value::Object(fields)).map_err(|e| Error::InvalidRecord {
        index,
        reason: e.to_string(),
    })
}

fn check_required(index: usize, fields: &Map<String, Value>) -> Result<()> {
    for field in REQUIRED_FIELDS {
        match fields.get(field) {
            Some(Value::String(_)) => {},
            None | Some(Value::Null) => return Err(Error::MissingField { index, field }),
            Some(other) => {
                return Err(Error::InvalidRecord {
                    index,
                    reason: format!("field `{field}` must be a string, found {}", json_type(other)),
                });
            },
        }
    }
    Ok(())
}

fn apply_defaults<R: Record>(fields: &mut Map<String, Value>) {
    for (field, default) in R::DEFAULTS {
        let absent = matches!(fields.get(*field), None | Some(Value::Null));
        if absent {
            fields.insert((*field).to_string(), Value::String((*default).to_string()));
        }
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
