//! Text-to-PDF conversion.
//!
//! The input is interpreted as UTF-8 with lossy replacement: the service
//! promises "text-ish" handling, not encoding validation, so invalid byte
//! sequences become U+FFFD rather than failing the request. Each input line
//! becomes one word-wrapped block in the output document.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::pipeline::pdf::PdfWriter;
use crate::pipeline::{ConvertedFile, MEDIA_TYPE_PDF, PDF_FILENAME};
use tracing::debug;

/// Render raw text bytes into a paginated PDF.
pub fn text_to_pdf(input: &[u8], config: &ServiceConfig) -> Result<ConvertedFile, ConvertError> {
    let text = String::from_utf8_lossy(input);
    debug!(bytes = input.len(), "rendering text to PDF");

    let mut writer = PdfWriter::new("Converted text", config.font_size)?;
    for line in text.lines() {
        writer.write_paragraph(line);
    }

    Ok(ConvertedFile {
        bytes: writer.finish()?,
        media_type: MEDIA_TYPE_PDF,
        filename: PDF_FILENAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_is_a_pdf() {
        let out = text_to_pdf(b"Hello, world!", &ServiceConfig::default()).unwrap();
        assert_eq!(out.media_type, "application/pdf");
        assert_eq!(out.filename, "output.pdf");
        assert!(out.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_input_yields_single_page() {
        let out = text_to_pdf(b"", &ServiceConfig::default()).unwrap();
        let doc = lopdf::Document::load_mem(&out.bytes).expect("valid PDF");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let out = text_to_pdf(&[0x66, 0x6f, 0xff, 0xfe, 0x6f], &ServiceConfig::default());
        assert!(out.is_ok());
    }

    #[test]
    fn rendered_text_survives_round_trip() {
        let out = text_to_pdf(b"magic marker sentence", &ServiceConfig::default()).unwrap();
        let doc = lopdf::Document::load_mem(&out.bytes).unwrap();
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
        let text = doc.extract_text(&pages).unwrap();
        assert!(text.contains("magic marker sentence"), "got: {text:?}");
    }

    #[test]
    fn long_input_does_not_fail() {
        let big = "lorem ipsum dolor sit amet ".repeat(5_000);
        let out = text_to_pdf(big.as_bytes(), &ServiceConfig::default()).unwrap();
        let doc = lopdf::Document::load_mem(&out.bytes).expect("valid PDF");
        assert!(doc.get_pages().len() > 1);
    }
}
