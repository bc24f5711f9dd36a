//! DOCX-to-PDF conversion.
//!
//! The container must be fully buffered: DOCX is a zip archive and the
//! parser needs random access plus a known length, so there is no streaming
//! variant of this pipeline. Paragraphs are walked in document order and the
//! text of every run is concatenated. Run boundaries carry formatting, and
//! formatting is exactly what this conversion discards.

use crate::config::ServiceConfig;
use crate::error::ConvertError;
use crate::pipeline::pdf::PdfWriter;
use crate::pipeline::{ConvertedFile, MEDIA_TYPE_PDF, PDF_FILENAME};
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};
use tracing::debug;

/// Parse a DOCX container and render its paragraph text into a PDF.
pub fn docx_to_pdf(input: &[u8], config: &ServiceConfig) -> Result<ConvertedFile, ConvertError> {
    let docx = read_docx(input).map_err(|e| ConvertError::DocxParse {
        detail: e.to_string(),
    })?;

    let mut writer = PdfWriter::new("Converted document", config.font_size)?;
    let mut paragraphs = 0usize;
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            writer.write_paragraph(&paragraph_text(para));
            paragraphs += 1;
        }
    }
    debug!(paragraphs, "rendered DOCX paragraphs");

    Ok(ConvertedFile {
        bytes: writer.finish()?,
        media_type: MEDIA_TYPE_PDF,
        filename: PDF_FILENAME,
    })
}

/// Concatenate the text of every run in a paragraph.
///
/// Tabs become a literal tab (collapsed to a space by the word-wrapper);
/// non-text run children (breaks, drawings, fields) are dropped.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
