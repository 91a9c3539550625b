//! PDF page converter backed by lopdf.

use rayon::prelude::*;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{OceerDocument, PageVertices};

use super::backend::{LopdfBackend, PageId, TextBox};
use super::{ConvertOptions, ErrorMode, PageConverter};

/// PDF converter.
///
/// Produces one text entry per page, in page order, and optionally the
/// page size and text-object vertices of each page.
#[derive(Debug, Clone, Default)]
pub struct PdfConverter {
    _private: (),
}

impl PdfConverter {
    /// Create a new PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn extract_texts(
        &self,
        backend: &LopdfBackend,
        pages: &[(u32, PageId)],
        options: &ConvertOptions,
    ) -> Vec<Result<String>> {
        if options.parallel {
            pages
                .par_iter()
                .map(|(page_num, _)| backend.page_text(*page_num))
                .collect()
        } else {
            pages
                .iter()
                .map(|(page_num, _)| backend.page_text(*page_num))
                .collect()
        }
    }

    fn page_vertices(
        &self,
        backend: &LopdfBackend,
        page_num: u32,
        page_id: PageId,
        mode: ErrorMode,
    ) -> Result<PageVertices> {
        let boxes = recover(backend.text_boxes(page_id), mode, page_num, "vertices")?;
        Ok(boxes.iter().map(TextBox::to_record).collect())
    }
}

impl PageConverter for PdfConverter {
    fn name(&self) -> &str {
        "pdf"
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<OceerDocument> {
        let header = detect_format_from_bytes(bytes)?;
        let backend = LopdfBackend::load_bytes(bytes)?;

        let pages: Vec<(u32, PageId)> = backend.pages().into_iter().collect();
        if pages.is_empty() {
            return Err(Error::EmptyDocument);
        }
        log::debug!(
            "Converting {} ({} bytes, lopdf reports {}) with {} pages",
            header,
            bytes.len(),
            backend.version(),
            pages.len()
        );

        let texts = self.extract_texts(&backend, &pages, options);

        let mut document = OceerDocument::new();
        for ((page_num, page_id), text) in pages.iter().zip(texts) {
            let text = recover(text, options.error_mode, *page_num, "text")?;

            if options.geometry {
                let vertices =
                    self.page_vertices(&backend, *page_num, *page_id, options.error_mode)?;
                let size = backend.page_geometry(*page_id).to_record();
                document.add_page_with_geometry(text, vertices, size);
            } else {
                document.add_page(text);
            }
        }

        Ok(document)
    }
}

/// Apply the error mode to a per-page result.
fn recover<T: Default>(result: Result<T>, mode: ErrorMode, page_num: u32, what: &str) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if mode == ErrorMode::Lenient => {
            log::warn!("Failed to extract {} from page {}: {}", what, page_num, e);
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}
