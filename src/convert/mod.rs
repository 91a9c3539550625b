//! Conversion of raw PDF bytes into an [`OceerDocument`].
//!
//! The converter is the only piece that touches PDF internals. It yields an
//! ordered sequence of page texts (and, on request, page geometry) that is
//! appended page by page to a fresh document.
//!
//! # Example
//!
//! ```no_run
//! use oceer::convert::{ConvertOptions, PageConverter, PdfConverter};
//!
//! fn main() -> oceer::Result<()> {
//!     let bytes = std::fs::read("document.pdf")?;
//!     let options = ConvertOptions::new().with_geometry(true);
//!     let doc = PdfConverter::new().convert_bytes(&bytes, &options)?;
//!     println!("{}", doc);
//!     Ok(())
//! }
//! ```

mod backend;
mod options;
mod pdf;

pub use backend::{PageGeometry, TextBox};
pub use options::{ConvertOptions, ErrorMode};
pub use pdf::PdfConverter;

use crate::error::Result;
use crate::model::OceerDocument;
use std::path::Path;

/// Trait for page converters.
///
/// Implement this trait to plug a different extraction engine behind the
/// same document model.
pub trait PageConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert in-memory file content.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<OceerDocument>;

    /// Convert a file at the given path.
    fn convert_file(&self, path: &Path, options: &ConvertOptions) -> Result<OceerDocument> {
        let bytes = std::fs::read(path)?;
        self.convert_bytes(&bytes, options)
    }
}
