//! Text-only conversion between PDF and Word
//!
//! Both directions extract plain text first and rebuild a fresh document
//! from it. Layout, fonts and images never survive.

pub mod pdf_writer;
pub mod word_writer;

use crate::config::ConversionConfig;
use crate::error::{LumoraError, Result};
use crate::input::document::Document;
use crate::input::file_detector::DocumentFormat;
use crate::input::text_extractor::DocumentExtractor;
use log::info;
use pdf_writer::PdfWriter;

const PDF_TITLE: &str = "Converted from Word (text-only)";

/// A converted document and how many characters were lost on the way
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: Document,
    pub encoding_loss: usize,
}

pub struct Converter {
    extractor: DocumentExtractor,
    pdf_writer: PdfWriter,
}

impl Converter {
    pub fn new(extractor: DocumentExtractor, config: ConversionConfig) -> Self {
        Self {
            extractor,
            pdf_writer: PdfWriter::new(config),
        }
    }

    /// Convert in whichever direction the declared format implies
    pub fn convert(&self, document: &Document) -> Result<Conversion> {
        match document.format() {
            DocumentFormat::Pdf => self.pdf_to_word(document),
            DocumentFormat::Word => self.word_to_pdf(document),
            DocumentFormat::Unknown => Err(LumoraError::UnsupportedFormat(
                "Only PDF and Word documents can be converted".to_string(),
            )),
        }
    }

    pub fn pdf_to_word(&self, document: &Document) -> Result<Conversion> {
        expect_format(document, DocumentFormat::Pdf)?;

        let text = self.extractor.extract(document)?;
        let bytes = word_writer::build_word_document(text.as_str())?;
        info!("Converted PDF to Word ({} -> {} bytes)", document.len(), bytes.len());

        Ok(Conversion {
            document: Document::word(bytes),
            encoding_loss: 0,
        })
    }

    pub fn word_to_pdf(&self, document: &Document) -> Result<Conversion> {
        expect_format(document, DocumentFormat::Word)?;

        let text = self.extractor.extract(document)?;
        let output = self.pdf_writer.write(PDF_TITLE, text.as_str())?;
        info!(
            "Converted Word to PDF ({} -> {} bytes, {} page(s))",
            document.len(),
            output.bytes.len(),
            output.pages
        );

        Ok(Conversion {
            document: Document::pdf(output.bytes),
            encoding_loss: output.dropped_chars,
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DocumentExtractor::default(), ConversionConfig::default())
    }
}

fn expect_format(document: &Document, expected: DocumentFormat) -> Result<()> {
    if document.format() == expected {
        Ok(())
    } else {
        Err(LumoraError::UnsupportedFormat(format!(
            "Expected a {} document, got {}",
            expected,
            document.format()
        )))
    }
}

/// Split text into lines on the same separators as Python's `splitlines`
/// (`\n`, `\r\n`, `\r`, vertical tab, form feed, file/group/record
/// separators, NEL, and the Unicode line/paragraph separators).
/// A trailing separator does not produce a final empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                lines.push(std::mem::take(&mut current));
            }
            '\n' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}' => lines.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Convert PDF bytes to .docx bytes
pub fn pdf_to_word(bytes: &[u8]) -> Result<Vec<u8>> {
    Converter::default()
        .pdf_to_word(&Document::pdf(bytes.to_vec()))
        .map(|c| c.document.into_bytes())
}

/// Convert .docx bytes to PDF bytes
pub fn word_to_pdf(bytes: &[u8]) -> Result<Vec<u8>> {
    Converter::default()
        .word_to_pdf(&Document::word(bytes.to_vec()))
        .map(|c| c.document.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::staging::Staging;

    #[test]
    fn test_split_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\n\r\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("page1\u{0c}page2"), vec!["page1", "page2"]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_wrong_declared_format_rejected() {
        let converter = Converter::new(
            DocumentExtractor::with_staging(Staging::Memory),
            ConversionConfig::default(),
        );
        let word = Document::word(Vec::new());

        assert!(matches!(
            converter.pdf_to_word(&word),
            Err(LumoraError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            converter.convert(&Document::new(Vec::new(), DocumentFormat::Unknown)),
            Err(LumoraError::UnsupportedFormat(_))
        ));
    }
}
