//! # oceer
//!
//! Page-indexed document model for converted PDFs.
//!
//! A PDF is converted into an [`OceerDocument`]: one text entry per page,
//! plus optional per-page geometry. Documents can be merged, cut into
//! page ranges, read back as normalized region text, and moved over the
//! wire in the current or the legacy JSON schema.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> oceer::Result<()> {
//!     let doc = oceer::convert_file("document.pdf")?;
//!
//!     // Pages 1 and 2, with period runs collapsed
//!     let intro = doc.get_pages_by_region(0, 2, true)?;
//!     println!("{}", intro);
//!
//!     // Wire format
//!     let json = doc.to_json();
//!     let back = oceer::OceerDocument::from_json(json)?;
//!     assert_eq!(back, doc);
//!     Ok(())
//! }
//! ```

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, ErrorMode, PageConverter, PdfConverter};
pub use detect::{detect_format_from_bytes, is_pdf_bytes, PdfHeader};
pub use error::{Error, Result};
pub use model::{CurrentFormat, LegacyFormat, OceerDocument, PageSize, PageVertices, WireFormat};
pub use render::{JsonFormat, MarkdownOptions, WireSchema};

use std::io::Read;
use std::path::Path;

/// Convert PDF bytes into a document.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("document.pdf").unwrap();
/// let doc = oceer::convert_bytes(&data).unwrap();
/// println!("Pages: {}", doc.length());
/// ```
pub fn convert_bytes(data: &[u8]) -> Result<OceerDocument> {
    convert_bytes_with_options(data, &ConvertOptions::default())
}

/// Convert PDF bytes into a document with custom options.
pub fn convert_bytes_with_options(data: &[u8], options: &ConvertOptions) -> Result<OceerDocument> {
    PdfConverter::new().convert_bytes(data, options)
}

/// Convert a PDF file into a document.
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<OceerDocument> {
    convert_file_with_options(path, &ConvertOptions::default())
}

/// Convert a PDF file into a document with custom options.
///
/// # Example
///
/// ```no_run
/// use oceer::{convert_file_with_options, ConvertOptions};
///
/// let options = ConvertOptions::new().lenient().with_geometry(true);
/// let doc = convert_file_with_options("document.pdf", &options).unwrap();
/// ```
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<OceerDocument> {
    PdfConverter::new().convert_file(path.as_ref(), options)
}

/// Convert a PDF from a reader.
pub fn convert_reader<R: Read>(mut reader: R) -> Result<OceerDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    convert_bytes(&data)
}

/// Convert PDF bytes on tokio's blocking pool.
///
/// Conversion is CPU bound; this keeps it off the async executor.
#[cfg(feature = "async")]
pub async fn convert_bytes_async(data: Vec<u8>, options: ConvertOptions) -> Result<OceerDocument> {
    tokio::task::spawn_blocking(move || convert_bytes_with_options(&data, &options))
        .await
        .map_err(|e| Error::Other(format!("conversion task failed: {}", e)))?
}
