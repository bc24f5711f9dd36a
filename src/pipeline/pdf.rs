//! Shared paginated PDF writer used by the text and DOCX pipelines.
//!
//! ## Why a character budget instead of glyph metrics?
//!
//! The output uses the built-in Helvetica face, which viewers supply
//! themselves, so no font file is embedded and no exact advance widths are
//! available at render time. A wrap budget derived from the average advance
//! width of Helvetica prose (≈ 0.5 em) keeps lines comfortably inside the
//! printable area without shipping a font metrics table. Slightly ragged
//! right margins are an accepted trade-off for a dependency-free font.

use crate::error::ConvertError;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use tracing::trace;

// A4 portrait.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;

const PT_TO_MM: f32 = 0.352_778;

/// Average Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;

/// An auto-paginating, word-wrapping PDF document under construction.
///
/// Paragraphs are appended top-to-bottom; a new page is started whenever the
/// cursor would drop below the bottom margin. Call [`PdfWriter::finish`] to
/// serialise the document to bytes.
pub struct PdfWriter {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    layer: PdfLayerReference,
    font_size: f32,
    line_height_mm: f32,
    cursor_y_mm: f32,
    max_chars_per_line: usize,
    page_count: usize,
}

impl PdfWriter {
    /// Start a new A4 portrait document with the given title and font size.
    pub fn new(title: &str, font_size: f32) -> Result<Self, ConvertError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ConvertError::PdfEncode {
                detail: format!("builtin font: {e}"),
            })?;
        let layer = doc.get_page(page).get_layer(layer);

        let line_height_mm = font_size * 1.25 * PT_TO_MM;
        let usable_width_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let glyph_width_mm = font_size * AVG_GLYPH_EM * PT_TO_MM;
        let max_chars_per_line = ((usable_width_mm / glyph_width_mm).floor() as usize).max(1);

        Ok(Self {
            doc,
            font,
            layer,
            font_size,
            line_height_mm,
            cursor_y_mm: PAGE_HEIGHT_MM - MARGIN_MM - line_height_mm,
            max_chars_per_line,
            page_count: 1,
        })
    }

    /// Append one paragraph as a word-wrapped block.
    ///
    /// An empty paragraph still consumes one blank line so vertical spacing
    /// between source paragraphs survives the conversion.
    pub fn write_paragraph(&mut self, text: &str) {
        for line in wrap_line(text, self.max_chars_per_line) {
            if self.cursor_y_mm < MARGIN_MM {
                self.start_page();
            }
            if !line.is_empty() {
                self.layer.use_text(
                    line,
                    self.font_size,
                    Mm(MARGIN_MM),
                    Mm(self.cursor_y_mm),
                    &self.font,
                );
            }
            self.cursor_y_mm -= self.line_height_mm;
        }
    }

    /// Serialise the document. Page count is always ≥ 1, even for no input.
    pub fn finish(self) -> Result<Vec<u8>, ConvertError> {
        trace!(pages = self.page_count, "serialising PDF");
        self.doc
            .save_to_bytes()
            .map_err(|e| ConvertError::PdfEncode {
                detail: e.to_string(),
            })
    }

    fn start_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "text");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_y_mm = PAGE_HEIGHT_MM - MARGIN_MM - self.line_height_mm;
        self.page_count += 1;
    }
}

/// Greedy word wrap against a character budget.
///
/// Whitespace runs collapse to single spaces; words longer than a whole line
/// are hard-split at character boundaries rather than overflowing the page.
/// An empty input yields exactly one empty line.
fn wrap_line(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > max_chars {
            // Hard-split: flush whatever is pending, then emit full chunks.
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == max_chars {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}
