//! Text extraction from PDF and Word documents

use crate::error::{LumoraError, Result};
use crate::input::document::Document;
use crate::input::file_detector::DocumentFormat;
use crate::input::staging::{StagedInput, Stager, Staging};
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use log::{debug, info, warn};

pub trait TextExtractor {
    fn format(&self) -> DocumentFormat;
    fn extract(&self, staged: &StagedInput<'_>) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, staged: &StagedInput<'_>) -> Result<String> {
        let text = match staged.path() {
            Some(path) => pdf_extract::extract_text(path),
            None => pdf_extract::extract_text_from_mem(&staged.bytes()?),
        }
        .map_err(|e| {
            LumoraError::parse(
                DocumentFormat::Pdf,
                format!("Failed to extract text from PDF: {}", e),
            )
        })?;

        Ok(text)
    }
}

pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Word
    }

    fn extract(&self, staged: &StagedInput<'_>) -> Result<String> {
        let bytes = staged.bytes()?;
        let docx = docx_rs::read_docx(&bytes).map_err(|e| {
            LumoraError::parse(DocumentFormat::Word, format!("Failed to read Word document: {}", e))
        })?;

        // Top-level body paragraphs only; tables and other containers are skipped
        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();

        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&paragraph.children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            // soft line break (Shift+Enter) stays a line break
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub format: DocumentFormat,
}

impl ExtractedText {
    /// True when extraction produced nothing usable, e.g. an image-only PDF
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Dispatches documents to the extractor for their declared format
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    stager: Stager,
}

impl DocumentExtractor {
    pub fn new(stager: Stager) -> Self {
        Self { stager }
    }

    pub fn with_staging(staging: Staging) -> Self {
        Self::new(Stager::new(staging))
    }

    pub fn extract(&self, document: &Document) -> Result<ExtractedText> {
        let format = document.format();
        let text = match format {
            DocumentFormat::Pdf => self.run(&PdfExtractor, document)?,
            DocumentFormat::Word => self.run(&WordExtractor, document)?,
            DocumentFormat::Unknown => {
                debug!("Unrecognised document format, returning empty text");
                String::new()
            }
        };

        let extracted = ExtractedText { text, format };
        if format != DocumentFormat::Unknown && extracted.is_blank() {
            warn!("No extractable text found in {} document ({} bytes)", format, document.len());
        }
        Ok(extracted)
    }

    fn run<E: TextExtractor>(&self, extractor: &E, document: &Document) -> Result<String> {
        info!("Extracting text from {} document ({} bytes)", extractor.format(), document.len());

        // Dropping `staged` releases the transient resource on every path
        let staged = self.stager.stage(document.bytes(), extractor.format())?;
        let text = extractor.extract(&staged)?;
        staged.release();

        debug!("Extracted {} characters", text.chars().count());
        Ok(text)
    }
}

/// Extract plain text from a document using the default staging strategy.
///
/// Unrecognised formats yield an empty string.
pub fn extract_plain_text(document: &Document) -> Result<String> {
    DocumentExtractor::default()
        .extract(document)
        .map(ExtractedText::into_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{BreakType, Docx};
    use std::io::Cursor;

    fn build_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_word_paragraphs_joined_by_newline() {
        let doc = Document::word(build_docx(&["Jane Doe", "", "Experience"]));
        let extractor = DocumentExtractor::with_staging(Staging::Memory);

        let extracted = extractor.extract(&doc).unwrap();
        assert_eq!(extracted.as_str(), "Jane Doe\n\nExperience");
        assert!(!extracted.is_blank());
    }

    #[test]
    fn test_word_runs_and_tabs() {
        let docx = Docx::new().add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Skills:"))
                .add_run(Run::new().add_tab().add_text("Rust")),
        );
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let text = extract_plain_text(&Document::word(buf.into_inner())).unwrap();
        assert_eq!(text, "Skills:\tRust");
    }

    #[test]
    fn test_word_line_break_inside_run() {
        let docx = Docx::new().add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text("Jane Doe")
                    .add_break(BreakType::TextWrapping)
                    .add_text("Python Engineer"),
            ),
        );
        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();

        let text = extract_plain_text(&Document::word(buf.into_inner())).unwrap();
        assert_eq!(text, "Jane Doe\nPython Engineer");

        let result = crate::processing::score_cv(&text, None, 30);
        assert_eq!(result.matched, vec!["python"]);
        assert_eq!(result.word_count, 4);
    }

    #[test]
    fn test_unknown_format_is_empty_not_error() {
        let doc = Document::new(b"just text".to_vec(), DocumentFormat::Unknown);
        assert_eq!(extract_plain_text(&doc).unwrap(), "");
    }

    #[test]
    fn test_malformed_word_is_parse_error() {
        let doc = Document::word(b"definitely not a zip".to_vec());
        let err = DocumentExtractor::with_staging(Staging::Memory)
            .extract(&doc)
            .unwrap_err();

        assert!(matches!(
            err,
            LumoraError::DocumentParse { format: DocumentFormat::Word, .. }
        ));
    }

    #[test]
    fn test_malformed_pdf_is_parse_error() {
        let doc = Document::pdf(b"%PDF-garbage".to_vec());
        let err = DocumentExtractor::with_staging(Staging::Memory)
            .extract(&doc)
            .unwrap_err();

        assert!(matches!(
            err,
            LumoraError::DocumentParse { format: DocumentFormat::Pdf, .. }
        ));
    }

    #[test]
    fn test_staged_file_released_after_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = DocumentExtractor::new(Stager::new(Staging::TempFile).in_dir(dir.path()));

        let result = extractor.extract(&Document::word(b"broken".to_vec()));
        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_staged_file_released_after_success() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = DocumentExtractor::new(Stager::new(Staging::TempFile).in_dir(dir.path()));

        let extracted = extractor
            .extract(&Document::word(build_docx(&["Hello"])))
            .unwrap();
        assert_eq!(extracted.as_str(), "Hello");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
