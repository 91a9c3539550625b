//! The page-indexed document produced by a conversion.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use super::wire::WireFormat;
use crate::error::{Error, Result};

/// Geometry / paragraph-boundary records for one page.
///
/// The records are produced by the converter and passed through untouched.
pub type PageVertices = Vec<Value>;

/// Dimension record for one page, passed through untouched.
pub type PageSize = Value;

/// Number of characters shown in the summary preview.
const PREVIEW_CHARS: usize = 50;

/// A converted multi-page document.
///
/// The three sequences are index-aligned by page, but only `page_text`
/// defines the page count. `page_vertices` and `page_size` may be shorter
/// (or empty) when the converter yields no geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OceerDocument {
    /// Text of each page, page 1 first.
    pub page_text: Vec<String>,

    /// Per-page vertices records.
    pub page_vertices: Vec<PageVertices>,

    /// Per-page size records.
    pub page_size: Vec<PageSize>,
}

impl OceerDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page holding text only.
    pub fn add_page(&mut self, text: impl Into<String>) {
        self.page_text.push(text.into());
    }

    /// Append a page together with its geometry.
    pub fn add_page_with_geometry(
        &mut self,
        text: impl Into<String>,
        vertices: PageVertices,
        size: PageSize,
    ) {
        self.page_text.push(text.into());
        self.page_vertices.push(vertices);
        self.page_size.push(size);
    }

    /// Number of pages, counted on the text sequence.
    pub fn length(&self) -> usize {
        self.page_text.len()
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.page_text.is_empty()
    }

    /// Get the text of a page (0-indexed) with trailing whitespace removed.
    ///
    /// With `add_indication`, the text is preceded by a
    /// `=== Page : n ===` header carrying the 1-based page number.
    pub fn get_page(&self, index: usize, add_indication: bool) -> Result<String> {
        let text = self
            .page_text
            .get(index)
            .ok_or(Error::PageOutOfRange(index, self.length()))?
            .trim_end();

        if add_indication {
            Ok(format!("=== Page : {} ===\n\n{}", index + 1, text))
        } else {
            Ok(text.to_string())
        }
    }

    /// Concatenate the pages in `start..end` with normalized punctuation.
    ///
    /// Each page is prefixed by a newline. Ellipsis characters become periods
    /// and runs of periods collapse into one. Any index past the end of the
    /// document is an error; an empty range yields an empty string.
    pub fn get_pages_by_region(
        &self,
        start: usize,
        end: usize,
        add_indication: bool,
    ) -> Result<String> {
        let mut region = String::new();
        for index in start..end {
            let page = self.get_page(index, add_indication)?;
            region.push('\n');
            region.push_str(&normalize_periods(&page));
        }
        Ok(region)
    }

    /// Append every page of `other` to this document.
    ///
    /// Each sequence is extended independently, so mismatched lengths in
    /// `other` carry over as they are.
    pub fn merge(&mut self, other: &OceerDocument) {
        self.page_text.extend(other.page_text.iter().cloned());
        self.page_vertices.extend(other.page_vertices.iter().cloned());
        self.page_size.extend(other.page_size.iter().cloned());
    }

    /// Build a new document from the pages in `start..end`.
    ///
    /// Bounds are checked per sequence: an index missing from one sequence
    /// is skipped for that sequence only, never reported as an error.
    pub fn cut(&self, start: usize, end: usize) -> OceerDocument {
        let mut document = OceerDocument::new();
        for index in start..end {
            if let Some(text) = self.page_text.get(index) {
                document.page_text.push(text.clone());
            }
            if let Some(vertices) = self.page_vertices.get(index) {
                document.page_vertices.push(vertices.clone());
            }
            if let Some(size) = self.page_size.get(index) {
                document.page_size.push(size.clone());
            }
        }
        document
    }

    /// Independent copy of the document.
    pub fn copy(&self) -> OceerDocument {
        self.clone()
    }

    /// Serialize to the current schema.
    pub fn to_json(&self) -> Value {
        json!({
            "page_text": self.page_text,
            "page_vertices": self.page_vertices,
            "page_size": self.page_size,
        })
    }

    /// Serialize to the legacy schema, where `treated` mirrors `raw`.
    pub fn to_v1_json(&self) -> Value {
        json!({
            "raw": self.page_text,
            "treated": self.page_text,
            "paragraphs": self.page_vertices,
            "page_size": self.page_size,
        })
    }

    /// Read a document in either schema.
    ///
    /// The legacy schema is recognized by the presence of a `raw` key.
    /// Missing keys default to empty sequences.
    pub fn from_json(data: Value) -> Result<Self> {
        Ok(WireFormat::from_value(data)?.into())
    }

    /// Parse a JSON string in either schema.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(value)
    }

    fn text_preview(&self) -> Option<String> {
        let text = self.page_text.iter().find(|text| !text.trim().is_empty())?;
        let preview: String = text.trim_start().chars().take(PREVIEW_CHARS).collect();
        if preview.chars().count() >= PREVIEW_CHARS {
            Some(format!("{}...", preview))
        } else {
            Some(preview)
        }
    }
}

impl From<WireFormat> for OceerDocument {
    fn from(format: WireFormat) -> Self {
        match format {
            WireFormat::Current(current) => Self {
                page_text: current.page_text,
                page_vertices: current.page_vertices,
                page_size: current.page_size,
            },
            WireFormat::Legacy(legacy) => Self {
                page_text: legacy.raw,
                page_vertices: legacy.paragraphs,
                page_size: legacy.page_size,
            },
        }
    }
}

impl Serialize for OceerDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Borrowed<'a> {
            page_text: &'a [String],
            page_vertices: &'a [PageVertices],
            page_size: &'a [PageSize],
        }

        Borrowed {
            page_text: &self.page_text,
            page_vertices: &self.page_vertices,
            page_size: &self.page_size,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OceerDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        OceerDocument::from_json(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for OceerDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OceerDocument:")?;
        writeln!(f, "Number of pages: {}", self.length())?;
        match self.text_preview() {
            Some(preview) => writeln!(f, "Text Preview: {}", preview)?,
            None => writeln!(f, "Text Preview: No text available")?,
        }
        if self.page_vertices.is_empty() {
            write!(f, "Number of vertices: No vertices available")
        } else {
            write!(f, "Number of vertices: {}", self.page_vertices.len())
        }
    }
}

/// Replace ellipses with periods and collapse runs of periods.
fn normalize_periods(text: &str) -> String {
    static PERIOD_RUN: OnceLock<Regex> = OnceLock::new();
    let period_run =
        PERIOD_RUN.get_or_init(|| Regex::new(r"\.{2,}").expect("period run pattern is valid"));

    let text = text.replace('…', ".");
    period_run.replace_all(&text, ".").into_owned()
}
