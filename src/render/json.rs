//! JSON rendering for documents.

use crate::error::{Error, Result};
use crate::model::OceerDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Which schema to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireSchema {
    /// `page_text` / `page_vertices` / `page_size`
    #[default]
    Current,
    /// `raw` / `treated` / `paragraphs` / `page_size`
    Legacy,
}

/// Convert a document to a JSON string.
pub fn to_json_string(
    doc: &OceerDocument,
    schema: WireSchema,
    format: JsonFormat,
) -> Result<String> {
    let value = match schema {
        WireSchema::Current => doc.to_json(),
        WireSchema::Legacy => doc.to_v1_json(),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&value),
        JsonFormat::Compact => serde_json::to_string(&value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
