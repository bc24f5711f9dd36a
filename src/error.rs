//! Error types for the convertd library.
//!
//! One taxonomy, [`ConvertError`], covers every failure a conversion request
//! can hit, from a malformed multipart body down to a PDF serialisation
//! failure. The variants split along the client/server fault line:
//!
//! * Client faults (missing field, unknown type tag, bytes that do not
//!   decode as the claimed format) map to 4xx responses.
//! * Server faults (output serialisation, task panics, local I/O) map to 5xx.
//!
//! The HTTP mapping itself lives in [`ConvertError::status_code`] and the
//! `IntoResponse` impl, so handlers can simply `?` their way out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// All errors returned by the conversion pipelines and the HTTP handlers.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Request errors ────────────────────────────────────────────────────
    /// The multipart body carried no `file` field.
    #[error("Error uploading the file: missing 'file' field")]
    MissingFile,

    /// The multipart body could not be parsed at all.
    #[error("Malformed multipart body: {detail}")]
    InvalidMultipart { detail: String },

    /// The request body exceeded the configured upload limit.
    #[error("Upload exceeds the maximum allowed size")]
    PayloadTooLarge,

    /// The `typeOfFile` tag is not one of the known values.
    #[error("Invalid file type '{tag}': expected one of text, image, docx, doc")]
    InvalidFileType { tag: String },

    /// The tag is known but no converter exists for it (legacy `doc`).
    #[error("File type '{tag}' is not supported: convert the document to .docx first")]
    UnsupportedFileType { tag: String },

    // ── Decode errors ─────────────────────────────────────────────────────
    /// The uploaded bytes are not a raster format the `image` crate knows.
    #[error("Error decoding image: {source}")]
    ImageDecode {
        #[source]
        source: image::ImageError,
    },

    /// The uploaded bytes are not a valid DOCX container.
    #[error("Error reading the DOCX file: {detail}")]
    DocxParse { detail: String },

    // ── Encode errors ─────────────────────────────────────────────────────
    /// JPEG re-encoding failed.
    #[error("Error encoding image: {source}")]
    JpegEncode {
        #[source]
        source: image::ImageError,
    },

    /// PDF document serialisation failed.
    #[error("Error writing PDF output: {detail}")]
    PdfEncode { detail: String },

    // ── Server errors ─────────────────────────────────────────────────────
    /// Local read/write failure.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error (task join, closed semaphore).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::MissingFile
            | ConvertError::InvalidMultipart { .. }
            | ConvertError::InvalidFileType { .. }
            | ConvertError::UnsupportedFileType { .. }
            | ConvertError::ImageDecode { .. }
            | ConvertError::DocxParse { .. } => StatusCode::BAD_REQUEST,
            ConvertError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ConvertError::JpegEncode { .. }
            | ConvertError::PdfEncode { .. }
            | ConvertError::Io { .. }
            | ConvertError::InvalidConfig(_)
            | ConvertError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A short plain-text message safe to return to the client.
    ///
    /// Client-fault errors echo their full message so the caller can fix the
    /// request; server-fault messages stay generic and the detail goes to the
    /// log instead.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::JpegEncode { .. } => "Error encoding image".to_string(),
            ConvertError::PdfEncode { .. } => "Error writing PDF output".to_string(),
            ConvertError::Io { .. } => "Error reading the file".to_string(),
            ConvertError::InvalidConfig(_) | ConvertError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        // Full detail stays server-side; severity tracks the fault line.
        match &self {
            ConvertError::JpegEncode { .. }
            | ConvertError::PdfEncode { .. }
            | ConvertError::Io { .. }
            | ConvertError::InvalidConfig(_)
            | ConvertError::Internal(_) => {
                tracing::error!("conversion failed: {:#}", self);
            }
            _ => {
                tracing::debug!("client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}
