//! Plain text to .docx

use crate::conversion::split_lines;
use crate::error::{LumoraError, Result};
use docx_rs::{Docx, Paragraph, Run, Style, StyleType};
use std::io::Cursor;

pub const CONVERTED_HEADING: &str = "Converted from PDF (text-only)";

const HEADING_STYLE_ID: &str = "Heading1";

/// Build a Word document: one heading, then one paragraph per line of `text`.
/// Blank lines become empty paragraphs.
pub fn build_word_document(text: &str) -> Result<Vec<u8>> {
    let heading_style = Style::new(HEADING_STYLE_ID, StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold();

    let mut docx = Docx::new().add_style(heading_style).add_paragraph(
        Paragraph::new()
            .style(HEADING_STYLE_ID)
            .add_run(Run::new().add_text(CONVERTED_HEADING)),
    );

    for line in split_lines(text) {
        let paragraph = if line.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(xml_safe(&line)))
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| LumoraError::Conversion(format!("Failed to write Word document: {}", e)))?;

    Ok(buf.into_inner())
}

/// Drop control characters that XML 1.0 cannot carry
fn xml_safe(line: &str) -> String {
    line.chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}
