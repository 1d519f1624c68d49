//! Document blobs handed to the extractor and converter

use crate::input::file_detector::DocumentFormat;
use std::path::Path;

/// Raw document bytes with a declared format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    bytes: Vec<u8>,
    format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self { bytes, format }
    }

    pub fn pdf(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DocumentFormat::Pdf)
    }

    pub fn word(bytes: Vec<u8>) -> Self {
        Self::new(bytes, DocumentFormat::Word)
    }

    /// Declare the format from a file name, falling back to the magic bytes
    /// when the extension is not recognised.
    pub fn from_named_bytes(bytes: Vec<u8>, name: &Path) -> Self {
        let format = match DocumentFormat::from_path(name) {
            DocumentFormat::Unknown => DocumentFormat::sniff(&bytes),
            known => known,
        };
        Self::new(bytes, format)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins_over_magic() {
        let doc = Document::from_named_bytes(b"PK\x03\x04".to_vec(), Path::new("cv.pdf"));
        assert_eq!(doc.format(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_magic_used_for_unknown_extension() {
        let doc = Document::from_named_bytes(b"%PDF-1.5".to_vec(), Path::new("upload"));
        assert_eq!(doc.format(), DocumentFormat::Pdf);
        assert_eq!(doc.len(), 8);
    }
}
