//! End-to-end tests for the HTTP routes.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use oceer::ConvertOptions;
use oceer_server::{app, AppState};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "oceer-test-boundary";

fn create_test_pdf(page_texts: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut page_ids: Vec<Object> = Vec::new();
    for text in page_texts {
        let content = format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET", text);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        page_ids.push(page_id.into());
    }

    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// One-field multipart body.
fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn test_app() -> Router {
    app(AppState::new(ConvertOptions::default()), 10 * 1024 * 1024)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_process_pdf_current_schema() {
    let pdf = create_test_pdf(&["First", "Second"]);
    let request = upload_request("/process-pdf", multipart_body("file", "report.pdf", &pdf));
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let document = &json["oceer_document"];
    let pages = document["page_text"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert!(pages[0].as_str().unwrap().contains("First"));
    assert!(pages[1].as_str().unwrap().contains("Second"));
    assert!(document["page_vertices"].as_array().unwrap().is_empty());
    assert!(document["page_size"].as_array().unwrap().is_empty());
    assert!(document.get("raw").is_none());
}

#[tokio::test]
async fn test_process_pdf_legacy_schema() {
    let pdf = create_test_pdf(&["Only page"]);
    let request = upload_request(
        "/process-pdf?format=v1",
        multipart_body("uploaded_file", "report.pdf", &pdf),
    );
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let document = &json["oceer_document"];
    assert_eq!(document["raw"], document["treated"]);
    assert_eq!(document["raw"].as_array().unwrap().len(), 1);
    assert!(document["paragraphs"].is_array());
    assert!(document.get("page_text").is_none());
}

#[tokio::test]
async fn test_process_pdf_with_geometry() {
    let router = app(
        AppState::new(ConvertOptions::new().with_geometry(true)),
        10 * 1024 * 1024,
    );
    let pdf = create_test_pdf(&["Sized"]);
    let request = upload_request("/process-pdf", multipart_body("file", "a.pdf", &pdf));
    let (status, json) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    let size = &json["oceer_document"]["page_size"][0];
    assert_eq!(size["width"].as_f64(), Some(612.0));
    assert_eq!(size["height"].as_f64(), Some(792.0));
}

#[tokio::test]
async fn test_process_pdf_unknown_format_query() {
    let pdf = create_test_pdf(&["x"]);
    let request = upload_request(
        "/process-pdf?format=v9",
        multipart_body("file", "a.pdf", &pdf),
    );
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("v9"));
}

#[tokio::test]
async fn test_process_pdf_empty_upload() {
    let request = upload_request("/process-pdf", multipart_body("file", "empty.pdf", b""));
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file content provided.");
}

#[tokio::test]
async fn test_process_pdf_missing_file_field() {
    let request = upload_request("/process-pdf", multipart_body("notes", "a.pdf", b"%PDF-1.4"));
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file content provided.");
}

#[tokio::test]
async fn test_process_pdf_not_a_pdf() {
    let request = upload_request(
        "/process-pdf",
        multipart_body("file", "page.pdf", b"<html><body>nope</body></html>"),
    );
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_process_pdf_without_multipart() {
    let request = Request::builder()
        .method("POST")
        .uri("/process-pdf")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_process_pdf_broken_pdf_is_internal_error() {
    let request = upload_request(
        "/process-pdf",
        multipart_body("file", "broken.pdf", b"%PDF-1.4\nthis is not a real pdf body"),
    );
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("An unexpected error occurred:"));
}

#[tokio::test]
async fn test_convert_pdf_markdown() {
    let pdf = create_test_pdf(&["Alpha", "Beta"]);
    let request = upload_request("/convert-pdf", multipart_body("file", "Notes.PDF", &pdf));
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let markdown = json["markdown"].as_str().unwrap();
    let alpha = markdown.find("Alpha").unwrap();
    let beta = markdown.find("Beta").unwrap();
    assert!(alpha < beta);
}

#[tokio::test]
async fn test_convert_pdf_rejects_other_extensions() {
    let pdf = create_test_pdf(&["Alpha"]);
    let request = upload_request("/convert-pdf", multipart_body("file", "notes.txt", &pdf));
    let (status, json) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Only PDF files are supported.");
}

#[tokio::test]
async fn test_process_pdf_over_upload_limit() {
    let router = app(AppState::new(ConvertOptions::default()), 1024);
    let mut content = b"%PDF-1.4\n".to_vec();
    content.resize(4096, b'x');
    let request = upload_request("/process-pdf", multipart_body("file", "big.pdf", &content));
    let (status, json) = send(router, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"], "Upload exceeds the maximum allowed size.");
}

#[tokio::test]
async fn test_convert_pdf_checks_extension_before_reading() {
    let router = app(AppState::new(ConvertOptions::default()), 1024);
    let content = vec![b'x'; 4096];
    let request = upload_request("/convert-pdf", multipart_body("file", "notes.txt", &content));
    let (status, json) = send(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Only PDF files are supported.");
}
