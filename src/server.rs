//! HTTP front end: upload form, conversion endpoint, liveness probe.
//!
//! ## Why spawn_blocking?
//!
//! PDF serialisation, image resampling, and zip parsing are all CPU-bound
//! and synchronous. Running them inline would stall the async workers for
//! every in-flight request, so each conversion moves onto the blocking
//! thread pool, gated by a semaphore sized from
//! [`ServiceConfig::max_concurrent_conversions`] so a burst of uploads
//! queues instead of buffering without bound.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::pipeline::{self, FileType};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state for the conversion handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<ServiceConfig>,
    /// Backpressure for CPU-bound conversions; see module docs.
    conversion_permits: Arc<Semaphore>,
}

/// Build the application router for the given configuration.
///
/// Exposed separately from [`serve`] so tests can drive the router without
/// binding a socket.
pub fn router(config: ServiceConfig) -> Router {
    let state = AppState {
        conversion_permits: Arc::new(Semaphore::new(config.max_concurrent_conversions)),
        config: Arc::new(config),
    };
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/convert", post(convert))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve conversions until the process exits.
pub async fn serve(addr: SocketAddr, config: ServiceConfig) -> std::io::Result<()> {
    info!(?config, "starting convertd");
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

/// `POST /convert`: multipart form with `typeOfFile` and `file` fields.
///
/// The whole upload is buffered (the DOCX parser needs random access), the
/// matching pipeline runs on the blocking pool, and the converted bytes go
/// straight back out as the response body. No output file ever touches disk,
/// so concurrent requests cannot cross-contaminate.
async fn convert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ConvertError> {
    let mut tag: Option<String> = None;
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "typeOfFile" => tag = Some(field.text().await.map_err(multipart_error)?),
            "file" => file = Some(field.bytes().await.map_err(multipart_error)?),
            other => debug!(field = other, "ignoring unknown multipart field"),
        }
    }

    // Missing file data fails before any converter is selected.
    let data = file.ok_or(ConvertError::MissingFile)?;
    let file_type: FileType = tag.as_deref().unwrap_or("").parse()?;

    let _permit = state
        .conversion_permits
        .clone()
        .acquire_owned()
        .await
        .map_err(|_| ConvertError::Internal("conversion limiter closed".into()))?;

    info!(%file_type, size = data.len(), "converting upload");
    let config = Arc::clone(&state.config);
    let converted =
        tokio::task::spawn_blocking(move || pipeline::convert(file_type, &data, &config))
            .await
            .map_err(|e| ConvertError::Internal(format!("conversion task panicked: {e}")))??;

    Ok((
        [
            (header::CONTENT_TYPE, converted.media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", converted.filename),
            ),
        ],
        converted.bytes,
    )
        .into_response())
}

/// Preserve 413 from the body-limit layer; everything else about a broken
/// multipart body is the client's 400.
fn multipart_error(e: MultipartError) -> ConvertError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ConvertError::PayloadTooLarge
    } else {
        ConvertError::InvalidMultipart {
            detail: e.body_text(),
        }
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>File Converter</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 600px;
            margin: 0 auto;
            background-color: #fff;
            padding: 20px;
            border-radius: 5px;
            box-shadow: 0 2px 5px rgba(0, 0, 0, 0.2);
        }
        h1 {
            color: #333;
            text-align: center;
        }
        form {
            margin-top: 20px;
        }
        label {
            display: block;
            margin-bottom: 5px;
            font-weight: bold;
        }
        input[type="radio"] {
            margin-right: 5px;
        }
        input[type="file"] {
            margin-top: 5px;
        }
        button[type="submit"] {
            background-color: #007bff;
            color: #fff;
            padding: 10px 20px;
            border: none;
            border-radius: 5px;
            cursor: pointer;
        }
        button[type="submit"]:hover {
            background-color: #0056b3;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Select File Type to Convert</h1>
        <form action="/convert" method="post" enctype="multipart/form-data">
            <label>
                <input type="radio" name="typeOfFile" value="text" required> Convert Text to PDF
            </label>
            <label>
                <input type="radio" name="typeOfFile" value="image"> Convert Image to JPEG
            </label>
            <label>
                <input type="radio" name="typeOfFile" value="docx"> Convert DOCX to PDF
            </label>
            <label>
                <input type="radio" name="typeOfFile" value="doc"> Convert DOC to PDF
            </label>
            <input type="file" name="file" required>
            <button type="submit">Convert</button>
        </form>
    </div>
</body>
</html>
"#;
