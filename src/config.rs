//! Configuration for the conversion service.
//!
//! Every knob lives in one [`ServiceConfig`] struct, built via its
//! [`ServiceConfigBuilder`]. Keeping the knobs together makes it trivial to
//! share the config across handlers, serialise it for logging, and diff two
//! deployments to understand why their outputs differ.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};

/// Configuration for conversions and the HTTP surface around them.
///
/// Built via [`ServiceConfig::builder()`] or [`ServiceConfig::default()`].
///
/// # Example
/// ```rust
/// use convertd::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .target_width(320)
///     .max_concurrent_conversions(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Output width in pixels for image conversions. Default: 200.
    ///
    /// Height is derived from the source aspect ratio, so this single value
    /// fully determines the output dimensions.
    pub target_width: u32,

    /// JPEG encoder quality, 1–100. Default: 100.
    pub jpeg_quality: u8,

    /// Font size in points for PDF output. Default: 16.0.
    pub font_size: f32,

    /// Maximum accepted request body in bytes. Default: 10 MiB.
    ///
    /// Enforced before buffering, so an oversized upload is rejected with
    /// 413 instead of exhausting memory. Conversions need the whole input in
    /// memory (DOCX parsing requires random access), which is why the limit
    /// guards the body and not just the decoded output.
    pub max_upload_bytes: usize,

    /// Upper bound on conversions running at once. Default: 4.
    ///
    /// Decode/encode work is CPU-bound and runs on the blocking thread pool;
    /// without a bound, a burst of uploads could queue an unbounded amount
    /// of buffered input. Requests over the bound wait on a semaphore.
    pub max_concurrent_conversions: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            target_width: 200,
            jpeg_quality: 100,
            font_size: 16.0,
            max_upload_bytes: 10 * 1024 * 1024,
            max_concurrent_conversions: 4,
        }
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn target_width(mut self, px: u32) -> Self {
        self.config.target_width = px;
        self
    }

    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn font_size(mut self, pt: f32) -> Self {
        self.config.font_size = pt;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn max_concurrent_conversions(mut self, n: usize) -> Self {
        self.config.max_concurrent_conversions = n.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, ConvertError> {
        let c = &self.config;
        if c.target_width == 0 {
            return Err(ConvertError::InvalidConfig(
                "target_width must be ≥ 1".into(),
            ));
        }
        if !(c.font_size.is_finite() && c.font_size > 0.0) {
            return Err(ConvertError::InvalidConfig(format!(
                "font_size must be positive, got {}",
                c.font_size
            )));
        }
        if c.max_upload_bytes == 0 {
            return Err(ConvertError::InvalidConfig(
                "max_upload_bytes must be ≥ 1".into(),
            ));
        }
        if !(1..=100).contains(&c.jpeg_quality) {
            return Err(ConvertError::InvalidConfig(format!(
                "jpeg_quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        Ok(self.config)
    }
}
