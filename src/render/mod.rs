//! Rendering module for writing documents out as JSON or Markdown.

mod json;
mod markdown;

pub use json::{to_json_string, JsonFormat, WireSchema};
pub use markdown::{to_markdown, MarkdownOptions};
