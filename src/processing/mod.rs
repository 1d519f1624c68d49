//! Text processing and scoring module

pub mod keywords;
pub mod scorer;
pub mod suggestions;
pub mod text_processor;

pub use keywords::{select_keywords, DEFAULT_KEYWORD_LIMIT};
pub use scorer::{score_cv, ScoreResult, Scorer, DEFAULT_TOP_K};
pub use suggestions::{suggestions, ScoreBand, Suggestion};
pub use text_processor::tokenize;
