//! Markdown rendering: all pages of a document as one blob.

use crate::model::OceerDocument;

/// Options for joining pages into a single Markdown string.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Prefix each page with a `=== Page : n ===` header
    pub page_indication: bool,

    /// Text placed between consecutive pages
    pub separator: String,
}

impl MarkdownOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable page headers.
    pub fn with_page_indication(mut self, enabled: bool) -> Self {
        self.page_indication = enabled;
        self
    }

    /// Set the page separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            page_indication: false,
            separator: "\n\n".to_string(),
        }
    }
}

/// Join every page of the document, in order.
pub fn to_markdown(doc: &OceerDocument, options: &MarkdownOptions) -> String {
    (0..doc.length())
        .filter_map(|index| doc.get_page(index, options.page_indication).ok())
        .collect::<Vec<_>>()
        .join(&options.separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_markdown_default() {
        let mut doc = OceerDocument::new();
        doc.add_page("# Title\n\nIntro  \n");
        doc.add_page("Body");

        let markdown = to_markdown(&doc, &MarkdownOptions::default());
        assert_eq!(markdown, "# Title\n\nIntro\n\nBody");
    }

    #[test]
    fn test_to_markdown_with_page_indication() {
        let mut doc = OceerDocument::new();
        doc.add_page("a");
        doc.add_page("b");

        let options = MarkdownOptions::new()
            .with_page_indication(true)
            .with_separator("\n");
        let markdown = to_markdown(&doc, &options);
        assert_eq!(markdown, "=== Page : 1 ===\n\na\n=== Page : 2 ===\n\nb");
    }

    #[test]
    fn test_to_markdown_empty() {
        assert_eq!(to_markdown(&OceerDocument::new(), &MarkdownOptions::default()), "");
    }
}
