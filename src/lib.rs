//! Lumora library: ATS-style resume scoring and text-only PDF/Word conversion

pub mod cli;
pub mod config;
pub mod conversion;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use conversion::{pdf_to_word, word_to_pdf, Conversion, Converter};
pub use error::{LumoraError, Result};
pub use input::{extract_plain_text, Document, DocumentFormat, ExtractedText};
pub use processing::{score_cv, select_keywords, ScoreResult, DEFAULT_KEYWORD_LIMIT, DEFAULT_TOP_K};
