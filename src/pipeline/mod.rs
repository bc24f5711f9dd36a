//! Conversion pipelines and their dispatcher.
//!
//! Each pipeline is a pure `decode → transform → encode` function from input
//! bytes to a [`ConvertedFile`]; no state survives a call. Dispatch is an
//! exhaustive match over the closed [`FileType`] enum, so adding a format
//! means the compiler walks you to every place that must handle it. There
//! is no string comparison with a silent fallthrough anywhere.

pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

pub(crate) const MEDIA_TYPE_PDF: &str = "application/pdf";
pub(crate) const MEDIA_TYPE_JPEG: &str = "image/jpeg";
pub(crate) const PDF_FILENAME: &str = "output.pdf";
pub(crate) const JPEG_FILENAME: &str = "output.jpg";

/// The client-declared source type of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Plain text, rendered to PDF.
    Text,
    /// Any decodable raster image, re-encoded as JPEG.
    Image,
    /// DOCX container, paragraph text rendered to PDF.
    Docx,
    /// Legacy binary Word format. Recognised but unsupported: the upload
    /// form has always offered it, so the tag gets a precise rejection
    /// instead of the generic invalid-type message.
    Doc,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Text => "text",
            FileType::Image => "image",
            FileType::Docx => "docx",
            FileType::Doc => "doc",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = ConvertError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "text" => Ok(FileType::Text),
            "image" => Ok(FileType::Image),
            "docx" => Ok(FileType::Docx),
            "doc" => Ok(FileType::Doc),
            other => Err(ConvertError::InvalidFileType {
                tag: other.to_string(),
            }),
        }
    }
}

/// The in-memory result of one conversion.
///
/// Nothing is ever written to disk: the bytes live only for the duration of
/// the request, so concurrent conversions cannot observe each other.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    /// The converted document or image.
    pub bytes: Vec<u8>,
    /// `application/pdf` or `image/jpeg`.
    pub media_type: &'static str,
    /// Download name used in the `Content-Disposition` header.
    pub filename: &'static str,
}

/// Route input bytes to the converter matching `file_type`.
///
/// Fails without side effects for [`FileType::Doc`]; every other variant
/// delegates to exactly one pipeline.
pub fn convert(
    file_type: FileType,
    input: &[u8],
    config: &ServiceConfig,
) -> Result<ConvertedFile, ConvertError> {
    match file_type {
        FileType::Text => text::text_to_pdf(input, config),
        FileType::Image => image::image_to_jpeg(input, config),
        FileType::Docx => docx::docx_to_pdf(input, config),
        FileType::Doc => Err(ConvertError::UnsupportedFileType {
            tag: FileType::Doc.as_str().to_string(),
        }),
    }
}
