//! Document model for converted PDF content.
//!
//! A document is three page-indexed sequences (text, vertices, size) that
//! can be merged, cut into sub-ranges and moved between the current and
//! legacy JSON schemas.

mod document;
mod wire;

pub use document::{OceerDocument, PageSize, PageVertices};
pub use wire::{CurrentFormat, LegacyFormat, WireFormat};
