//! Image-to-JPEG conversion.
//!
//! Any raster format the `image` crate is compiled with (PNG, JPEG, GIF,
//! BMP, TIFF, WebP) decodes into a `DynamicImage`, gets resized to the
//! configured target width with Lanczos3, and re-encodes as JPEG.
//!
//! ## Why Lanczos3?
//!
//! Downscaling from camera resolutions to 200 px is a large ratio; nearest
//! and triangle filters alias badly at that scale. Lanczos3 is the slowest
//! filter the crate offers but the target is small enough that the cost is
//! negligible next to the decode.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::pipeline::{ConvertedFile, JPEG_FILENAME, MEDIA_TYPE_JPEG};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Decode an arbitrary raster image, resize it to the configured width
/// preserving aspect ratio, and re-encode as JPEG.
pub fn image_to_jpeg(input: &[u8], config: &ServiceConfig) -> Result<ConvertedFile, ConvertError> {
    let img = image::load_from_memory(input)
        .map_err(|source| ConvertError::ImageDecode { source })?;

    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(ConvertError::Internal(format!(
            "decoder produced a degenerate {w}x{h} image"
        )));
    }

    let target_w = config.target_width;
    let target_h = ((h as f64 * target_w as f64 / w as f64).round() as u32).max(1);
    debug!(
        from = format!("{w}x{h}"),
        to = format!("{target_w}x{target_h}"),
        "resizing image"
    );

    let resized = img.resize_exact(target_w, target_h, FilterType::Lanczos3);
    // JPEG has no alpha channel; flatten whatever the decoder produced.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), config.jpeg_quality);
    rgb.write_with_encoder(encoder)
        .map_err(|source| ConvertError::JpegEncode { source })?;

    Ok(ConvertedFile {
        bytes,
        media_type: MEDIA_TYPE_JPEG,
        filename: JPEG_FILENAME,
    })
}
