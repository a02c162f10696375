//! Named-field access into untyped JSON documents returned by Reddit

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object whose fields are looked up by name on demand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonDocument(Map<String, Value>);

impl JsonDocument {
    /// Wrap a JSON value, rejecting anything that is not an object
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(FetchError::Malformed {
                details: format!("expected JSON object, got {}", kind_of(&other)),
            }),
        }
    }

    /// Textual value of a scalar field
    ///
    /// Strings are returned verbatim; numbers and booleans as their JSON text. Missing,
    /// `null`, array and object fields are absent.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Like [`text`](Self::text) but absence is a malformed document
    pub fn require_text(&self, field: &str) -> Result<String, FetchError> {
        self.text(field).ok_or_else(|| FetchError::Malformed {
            details: format!("missing or non-scalar field '{field}'"),
        })
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Interpret a value as an array of objects
///
/// Non-array input is malformed. Array elements that are not objects are dropped, since they
/// cannot carry named fields.
pub fn object_list(value: Value) -> Result<Vec<JsonDocument>, FetchError> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| JsonDocument::from_value(item).ok())
            .collect()),
        other => Err(FetchError::Malformed {
            details: format!("expected JSON array, got {}", kind_of(&other)),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
