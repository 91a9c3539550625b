//! JSON schemas a document travels in.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::document::{PageSize, PageVertices};
use crate::error::{Error, Result};

/// Key whose presence marks the legacy schema.
const LEGACY_MARKER: &str = "raw";

/// Current schema: `page_text`, `page_vertices`, `page_size`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentFormat {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub page_text: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub page_vertices: Vec<PageVertices>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub page_size: Vec<PageSize>,
}

/// Legacy (v1) schema: `raw`, `treated`, `paragraphs`, `page_size`.
///
/// `treated` is written as a copy of `raw` and ignored when reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyFormat {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub raw: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub treated: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub paragraphs: Vec<PageVertices>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub page_size: Vec<PageSize>,
}

/// A serialized document in one of the known schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum WireFormat {
    Current(CurrentFormat),
    Legacy(LegacyFormat),
}

impl WireFormat {
    /// Detect the schema of a JSON object and parse it.
    pub fn from_value(value: Value) -> Result<Self> {
        let is_legacy = match &value {
            Value::Object(map) => map.contains_key(LEGACY_MARKER),
            other => {
                return Err(Error::MalformedDocument(format!(
                    "expected a JSON object, found {}",
                    json_kind(other)
                )))
            }
        };

        if is_legacy {
            Ok(WireFormat::Legacy(serde_json::from_value(value)?))
        } else {
            Ok(WireFormat::Current(serde_json::from_value(value)?))
        }
    }

    /// Whether this is the legacy schema.
    pub fn is_legacy(&self) -> bool {
        matches!(self, WireFormat::Legacy(_))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
