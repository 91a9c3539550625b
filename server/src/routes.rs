//! Route handlers.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use oceer::render::{to_markdown, MarkdownOptions};
use oceer::{ConvertOptions, OceerDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Multipart field names accepted for the uploaded PDF.
const UPLOAD_FIELDS: &[&str] = &["file", "uploaded_file", "pdf"];

/// Shared handler state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub options: ConvertOptions,
}

impl AppState {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    oceer_document: Value,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    markdown: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    /// `v1` selects the legacy schema.
    format: Option<String>,
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Convert an uploaded PDF and answer with the document JSON.
pub async fn process_pdf(
    State(state): State<AppState>,
    Query(query): Query<ProcessQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let legacy = match query.format.as_deref() {
        None | Some("current") => false,
        Some("v1") => true,
        Some(other) => {
            return Err(ApiError::BadRequest(format!("Unknown format: {}", other)));
        }
    };

    let upload = read_upload(multipart, |_| Ok(())).await?;
    let document = convert(&state, upload).await?;
    log::info!(
        "Converted '{}' into {} pages",
        document.filename,
        document.document.length()
    );
    log::debug!("{}", document.document);

    let oceer_document = if legacy {
        document.document.to_v1_json()
    } else {
        document.document.to_json()
    };
    Ok(Json(DocumentResponse { oceer_document }))
}

/// Convert an uploaded PDF into a single Markdown blob.
pub async fn convert_pdf(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MarkdownResponse>, ApiError> {
    let upload = read_upload(multipart, require_pdf_extension).await?;
    let converted = convert(&state, upload).await?;
    let markdown = to_markdown(&converted.document, &MarkdownOptions::default());
    Ok(Json(MarkdownResponse { markdown }))
}

struct Converted {
    filename: String,
    document: OceerDocument,
}

async fn convert(state: &AppState, upload: Upload) -> Result<Converted, ApiError> {
    log::info!(
        "Converting upload '{}' ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );
    let document =
        oceer::convert_bytes_async(upload.bytes.to_vec(), state.options.clone()).await?;
    Ok(Converted {
        filename: upload.filename,
        document,
    })
}

fn require_pdf_extension(filename: &str) -> Result<(), ApiError> {
    if filename.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Only PDF files are supported.".to_string()))
    }
}

/// Pull the first file field out of a multipart body.
///
/// `check_filename` runs before the field data is read.
async fn read_upload<F>(
    multipart: Result<Multipart, MultipartRejection>,
    check_filename: F,
) -> Result<Upload, ApiError>
where
    F: Fn(&str) -> Result<(), ApiError>,
{
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(ApiError::from_multipart)?
    {
        let name = field.name().unwrap_or("").to_string();
        if !UPLOAD_FIELDS.contains(&name.as_str()) {
            log::debug!("Skipping multipart field '{}'", name);
            continue;
        }

        let filename = field.file_name().unwrap_or("").to_string();
        check_filename(&filename)?;

        let bytes = field.bytes().await.map_err(ApiError::from_multipart)?;
        if bytes.is_empty() {
            break;
        }
        return Ok(Upload { filename, bytes });
    }

    Err(ApiError::BadRequest("No file content provided.".to_string()))
}
