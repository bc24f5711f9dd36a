//! CLI binary for convertd.
//!
//! A thin shim over the library crate that maps CLI flags and environment
//! variables to a `ServiceConfig` and starts the server.

use anyhow::{Context, Result};
use clap::Parser;
use convertd::{serve, ServiceConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "convertd", version, about = "HTTP file-conversion service")]
struct Cli {
    /// Socket address to listen on.
    #[arg(long, env = "CONVERTD_BIND", default_value = "0.0.0.0:8080")]
    bind: SocketAddr,

    /// Tracing filter directive, e.g. `convertd=debug,tower_http=debug`.
    #[arg(long, env = "CONVERTD_LOG", default_value = "convertd=info,tower_http=info")]
    log: String,

    /// Output width in pixels for image conversions.
    #[arg(long, env = "CONVERTD_TARGET_WIDTH", default_value_t = 200)]
    target_width: u32,

    /// JPEG encoding quality (1-100) for image conversions.
    #[arg(long, env = "CONVERTD_JPEG_QUALITY", default_value_t = 100)]
    jpeg_quality: u8,

    /// Font size in points for PDF output.
    #[arg(long, env = "CONVERTD_FONT_SIZE", default_value_t = 16.0)]
    font_size: f32,

    /// Maximum accepted upload size in bytes.
    #[arg(long, env = "CONVERTD_MAX_UPLOAD_BYTES", default_value_t = 10 * 1024 * 1024)]
    max_upload_bytes: usize,

    /// Maximum number of conversions running at once.
    #[arg(long, env = "CONVERTD_MAX_CONCURRENT", default_value_t = 4)]
    max_concurrent: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServiceConfig::builder()
        .target_width(cli.target_width)
        .jpeg_quality(cli.jpeg_quality)
        .font_size(cli.font_size)
        .max_upload_bytes(cli.max_upload_bytes)
        .max_concurrent_conversions(cli.max_concurrent)
        .build()
        .context("invalid configuration")?;

    serve(cli.bind, config)
        .await
        .with_context(|| format!("server failed on {}", cli.bind))
}
