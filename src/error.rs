//! Error handling for lumora

use crate::input::file_detector::DocumentFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LumoraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes do not parse as the declared format
    #[error("Failed to parse {format} document: {message}")]
    DocumentParse {
        format: DocumentFormat,
        message: String,
    },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large ({size_mb:.1} MB). Max {max_mb} MB.")]
    FileTooLarge { size_mb: f64, max_mb: u64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl LumoraError {
    pub fn parse(format: DocumentFormat, message: impl Into<String>) -> Self {
        LumoraError::DocumentParse {
            format,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LumoraError>;
