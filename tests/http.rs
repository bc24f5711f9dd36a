//! HTTP integration tests for the convertd service.
//!
//! Every test drives the real router through `axum_test::TestServer`, the
//! same way a browser submits the upload form. Fixtures are generated in
//! memory (PNG via the `image` crate, DOCX via `docx-rs`) so the suite has
//! no file dependencies, and generated PDFs are parsed back with `lopdf` to
//! assert on their actual content rather than just their magic bytes.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use convertd::{router, ServiceConfig};
use docx_rs::{Docx, Paragraph, Run};
use image::{DynamicImage, Rgba, RgbaImage};
use std::future::IntoFuture;
use std::io::Cursor;

// ── Test helpers ─────────────────────────────────────────────────────────────

fn test_server() -> TestServer {
    TestServer::new(router(ServiceConfig::default())).expect("router must start")
}

fn raster_fixture(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([200, 40, 40, 255]),
    ));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("encode image fixture");
    buf
}

fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    raster_fixture(width, height, image::ImageFormat::Png)
}

fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for p in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
    }
    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).expect("pack DOCX fixture");
    buf.into_inner()
}

fn upload(tag: &str, file: Vec<u8>, filename: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("typeOfFile", tag)
        .add_part("file", Part::bytes(file).file_name(filename))
}

fn pdf_text(bytes: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("response must be a valid PDF");
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    assert!(!pages.is_empty(), "PDF must have at least one page");
    doc.extract_text(&pages).expect("PDF text must extract")
}

// ── Form and probe ───────────────────────────────────────────────────────────

#[tokio::test]
async fn index_serves_the_upload_form() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"name="typeOfFile""#));
    assert!(html.contains(r#"name="file""#));
    for value in ["text", "image", "docx", "doc"] {
        assert!(
            html.contains(&format!(r#"value="{value}""#)),
            "form must offer the {value} option"
        );
    }
}

#[tokio::test]
async fn healthz_responds_ok() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

// ── Text path ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn text_upload_returns_a_pdf_attachment() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("text", b"Hello, world!".to_vec(), "hello.txt"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=output.pdf"
    );

    let body = response.as_bytes().to_vec();
    assert!(body.starts_with(b"%PDF"), "body must be a PDF");
    assert!(pdf_text(&body).contains("Hello, world!"));
}

#[tokio::test]
async fn text_conversion_is_idempotent_modulo_metadata() {
    let server = test_server();
    let input = b"same input, same output".to_vec();

    let first = server
        .post("/convert")
        .multipart(upload("text", input.clone(), "a.txt"))
        .await;
    let second = server
        .post("/convert")
        .multipart(upload("text", input, "a.txt"))
        .await;
    first.assert_status_ok();
    second.assert_status_ok();

    // printpdf embeds a creation timestamp and document identifiers, so
    // byte equality does not hold; content equality must.
    let a = first.as_bytes().to_vec();
    let b = second.as_bytes().to_vec();
    assert_eq!(pdf_text(&a), pdf_text(&b));
    assert_eq!(
        lopdf::Document::load_mem(&a).unwrap().get_pages().len(),
        lopdf::Document::load_mem(&b).unwrap().get_pages().len()
    );
}

// ── Image path ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn image_upload_returns_resized_jpeg() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("image", png_fixture(400, 300), "photo.png"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=output.jpg"
    );

    let decoded = image::load_from_memory(&response.as_bytes()).expect("body must be a JPEG");
    assert_eq!(decoded.width(), 200);
    assert_eq!(decoded.height(), 150);
}

#[tokio::test]
async fn gif_and_bmp_uploads_also_convert() {
    let server = test_server();

    for (format, filename) in [
        (image::ImageFormat::Gif, "anim.gif"),
        (image::ImageFormat::Bmp, "scan.bmp"),
    ] {
        let response = server
            .post("/convert")
            .multipart(upload("image", raster_fixture(400, 300, format), filename))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "image/jpeg",
            "content type for {filename}"
        );
        let decoded = image::load_from_memory(&response.as_bytes())
            .unwrap_or_else(|e| panic!("body for {filename} must be a JPEG: {e}"));
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 150);
    }
}

#[tokio::test]
async fn image_conversion_is_byte_idempotent() {
    let server = test_server();
    let fixture = png_fixture(123, 77);

    let first = server
        .post("/convert")
        .multipart(upload("image", fixture.clone(), "a.png"))
        .await;
    let second = server
        .post("/convert")
        .multipart(upload("image", fixture, "a.png"))
        .await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[tokio::test]
async fn malformed_image_is_rejected() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("image", b"not an image at all".to_vec(), "broken.png"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Error decoding image"));
}

// ── DOCX path ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn docx_upload_preserves_paragraph_order() {
    let server = test_server();
    let fixture = docx_fixture(&["OrderedOne", "OrderedTwo", "OrderedThree"]);

    let response = server
        .post("/convert")
        .multipart(upload("docx", fixture, "report.docx"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/pdf"
    );

    let text = pdf_text(&response.as_bytes());
    let one = text.find("OrderedOne").expect("first paragraph");
    let two = text.find("OrderedTwo").expect("second paragraph");
    let three = text.find("OrderedThree").expect("third paragraph");
    assert!(one < two && two < three, "paragraph order lost: {text:?}");
}

#[tokio::test]
async fn invalid_docx_is_rejected() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("docx", b"not a zip container".to_vec(), "fake.docx"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Error reading the DOCX file"));
}

// ── Dispatch errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn bogus_type_tag_is_a_bad_request() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("bogus", b"whatever".to_vec(), "file.bin"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Invalid file type"));
}

#[tokio::test]
async fn missing_type_tag_is_a_bad_request() {
    let server = test_server();
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"some bytes".to_vec()).file_name("file.txt"),
    );
    let response = server.post("/convert").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("Invalid file type"));
}

#[tokio::test]
async fn missing_file_field_is_a_bad_request() {
    let server = test_server();
    let form = MultipartForm::new().add_text("typeOfFile", "text");
    let response = server.post("/convert").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("missing 'file' field"));
}

#[tokio::test]
async fn legacy_doc_is_rejected_explicitly() {
    let server = test_server();
    let response = server
        .post("/convert")
        .multipart(upload("doc", b"\xd0\xcf\x11\xe0old word".to_vec(), "old.doc"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.text().contains("not supported"));
}

// ── Limits and concurrency ───────────────────────────────────────────────────

#[tokio::test]
async fn oversized_upload_is_rejected_before_conversion() {
    let config = ServiceConfig::builder()
        .max_upload_bytes(1024)
        .build()
        .unwrap();
    let server = TestServer::new(router(config)).unwrap();

    let response = server
        .post("/convert")
        .multipart(upload("text", vec![b'x'; 64 * 1024], "big.txt"))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn concurrent_conversions_do_not_cross_contaminate() {
    let server = test_server();

    let text_req = server
        .post("/convert")
        .multipart(upload("text", b"text request marker".to_vec(), "a.txt"));
    let docx_req = server.post("/convert").multipart(upload(
        "docx",
        docx_fixture(&["docx request marker"]),
        "b.docx",
    ));

    let (text_resp, docx_resp) = tokio::join!(text_req, docx_req);
    text_resp.assert_status_ok();
    docx_resp.assert_status_ok();

    let text_out = pdf_text(&text_resp.as_bytes());
    let docx_out = pdf_text(&docx_resp.as_bytes());

    assert!(text_out.contains("text request marker"));
    assert!(!text_out.contains("docx request marker"));
    assert!(docx_out.contains("docx request marker"));
    assert!(!docx_out.contains("text request marker"));
}

#[tokio::test]
async fn bounded_concurrency_still_serves_all_requests() {
    let config = ServiceConfig::builder()
        .max_concurrent_conversions(1)
        .build()
        .unwrap();
    let server = TestServer::new(router(config)).unwrap();

    let reqs: Vec<_> = (0..4)
        .map(|i| {
            server
                .post("/convert")
                .multipart(upload(
                    "text",
                    format!("request number {i}").into_bytes(),
                    "n.txt",
                ))
                .into_future()
        })
        .collect();

    for (i, resp) in futures::future::join_all(reqs).await.into_iter().enumerate() {
        resp.assert_status_ok();
        assert!(pdf_text(&resp.as_bytes()).contains(&format!("request number {i}")));
    }
}
