//! # convertd
//!
//! A small HTTP service that converts uploaded files: plain text to PDF,
//! arbitrary raster images to resized JPEG, and DOCX documents to PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! multipart upload
//!  │
//!  ├─ 1. Parse     read `typeOfFile` tag and `file` bytes
//!  ├─ 2. Dispatch  closed FileType enum → exactly one converter
//!  ├─ 3. Convert   decode → transform → encode (blocking pool, bounded)
//!  └─ 4. Respond   in-memory bytes + attachment headers
//! ```
//!
//! Converted output never touches disk: each request's result lives only in
//! its own response body, so concurrent conversions cannot observe each
//! other.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use convertd::{serve, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServiceConfig::default();
//!     serve("0.0.0.0:8080".parse().unwrap(), config).await
//! }
//! ```
//!
//! The pipelines are also usable without the HTTP layer:
//!
//! ```rust
//! use convertd::{convert, FileType, ServiceConfig};
//!
//! let out = convert(FileType::Text, b"Hello, world!", &ServiceConfig::default())?;
//! assert!(out.bytes.starts_with(b"%PDF"));
//! # Ok::<(), convertd::ConvertError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `convertd` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::ConvertError;
pub use pipeline::{convert, ConvertedFile, FileType};
pub use server::{router, serve};
