//! File type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Word,
    Unknown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "docx" => DocumentFormat::Word,
            _ => DocumentFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unknown)
    }

    /// Guess the format from leading magic bytes.
    ///
    /// Any zip container is reported as Word; the docx reader rejects
    /// archives that are not actually Word documents.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(PDF_MAGIC) {
            DocumentFormat::Pdf
        } else if bytes.starts_with(ZIP_MAGIC) {
            DocumentFormat::Word
        } else {
            DocumentFormat::Unknown
        }
    }

    /// File suffix used when staging the document on disk
    pub fn suffix(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Word => ".docx",
            DocumentFormat::Unknown => ".bin",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Word => "word",
            DocumentFormat::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
