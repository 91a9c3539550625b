//! HTTP boundary for oceer: upload a PDF, get a document back as JSON.

pub mod config;
pub mod error;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

pub use config::ServerConfig;
pub use routes::AppState;

/// Build the router with the given upload limit in bytes.
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/process-pdf", post(routes::process_pdf))
        .route("/convert-pdf", post(routes::convert_pdf))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
