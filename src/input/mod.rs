//! Input processing module
//! Handles format detection, staging, text extraction, and input policy

pub mod document;
pub mod file_detector;
pub mod manager;
pub mod staging;
pub mod text_extractor;

pub use document::Document;
pub use file_detector::DocumentFormat;
pub use text_extractor::{extract_plain_text, ExtractedText};
