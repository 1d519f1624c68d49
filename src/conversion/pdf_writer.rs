//! Plain text to PDF using a built-in Helvetica face
//!
//! Layout is a single column on A4 with word wrapping and automatic page
//! breaks. Built-in fonts only cover Latin-1, so anything else is dropped
//! and counted.

use crate::config::ConversionConfig;
use crate::conversion::split_lines;
use crate::error::{LumoraError, Result};
use log::{debug, warn};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MM_PER_PT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Layer 1";

/// Rendered PDF plus the number of characters that could not be encoded
#[derive(Debug, Clone)]
pub struct PdfOutput {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub dropped_chars: usize,
}

pub struct PdfWriter {
    config: ConversionConfig,
}

impl PdfWriter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn write(&self, title: &str, text: &str) -> Result<PdfOutput> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| LumoraError::Conversion(format!("Failed to load built-in font: {}", e)))?;

        let mut cursor = PageCursor {
            layer: doc.get_page(page).get_layer(layer),
            y: self.top(),
            pages: 1,
        };

        let max_width = PAGE_WIDTH_MM - 2.0 * self.config.margin_mm;
        let mut dropped_chars = 0;

        for line in split_lines(text) {
            let (encoded, dropped) = to_latin1(&line);
            dropped_chars += dropped;

            for row in wrap_line(&encoded, max_width, self.config.font_size_pt) {
                self.write_row(&doc, &mut cursor, &font, &row);
            }
        }

        if dropped_chars > 0 {
            warn!("Dropped {} characters outside Latin-1 while writing PDF", dropped_chars);
        }
        debug!("Wrote {} PDF page(s)", cursor.pages);

        let pages = cursor.pages;
        let bytes = doc
            .save_to_bytes()
            .map_err(|e| LumoraError::Conversion(format!("Failed to write PDF: {}", e)))?;

        Ok(PdfOutput {
            bytes,
            pages,
            dropped_chars,
        })
    }

    fn top(&self) -> f32 {
        PAGE_HEIGHT_MM - self.config.margin_mm
    }

    fn write_row(
        &self,
        doc: &PdfDocumentReference,
        cursor: &mut PageCursor,
        font: &IndirectFontRef,
        row: &str,
    ) {
        let line_height = self.config.line_height_mm;

        if cursor.y - line_height < self.config.bottom_margin_mm {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            cursor.layer = doc.get_page(page).get_layer(layer);
            cursor.y = self.top();
            cursor.pages += 1;
        }

        if !row.is_empty() {
            // baseline sits in the lower part of the cell
            let baseline = cursor.y - line_height * 0.75;
            cursor.layer.use_text(
                row,
                self.config.font_size_pt,
                Mm(self.config.margin_mm),
                Mm(baseline),
                font,
            );
        }
        cursor.y -= line_height;
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

struct PageCursor {
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

/// Keep printable Latin-1, returning the kept text and the number of
/// characters dropped. Tabs become a single space.
pub fn to_latin1(line: &str) -> (String, usize) {
    let mut kept = String::with_capacity(line.len());
    let mut dropped = 0;

    for c in line.chars() {
        match c {
            '\t' => kept.push(' '),
            ' '..='~' | '\u{a0}'..='\u{ff}' => kept.push(c),
            _ => dropped += 1,
        }
    }

    (kept, dropped)
}

/// Approximate Helvetica advance width in em units
fn glyph_width_em(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '\'' | '|' | '.' | ',' | ':' | ';' | '!' => 0.28,
        ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.85,
        'A'..='Z' => 0.70,
        '0'..='9' => 0.56,
        _ => 0.56,
    }
}

fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let em_mm = font_size_pt * MM_PER_PT;
    text.chars().map(|c| glyph_width_em(c) * em_mm).sum()
}

/// Greedy word wrap. Words wider than a full row are split by character.
/// An empty line yields a single empty row.
pub fn wrap_line(line: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();

    for word in line.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width_mm(&candidate, font_size_pt) <= max_width_mm {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if text_width_mm(&current, font_size_pt) > max_width_mm && current.chars().count() > 1 {
                current.pop();
                rows.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    rows.push(current);
    rows
}
