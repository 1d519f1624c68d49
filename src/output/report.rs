//! Analysis report assembled from a score result

use crate::processing::scorer::{KeywordSource, ScoreResult};
use crate::processing::suggestions::{suggestions, ScoreBand, Suggestion, LOOKS_SOLID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: ScoreResult,

    pub band: ScoreBand,

    /// Empty when nothing needs fixing
    pub suggestions: Vec<SuggestionEntry>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub kind: Suggestion,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_file: String,

    /// Job description file, `inline` for text given on the command line
    pub job_source: Option<String>,

    pub keyword_source: KeywordSource,

    /// False when extraction found no usable text (e.g. a scanned PDF)
    pub text_extracted: bool,

    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub tool_version: String,
}

impl AnalysisReport {
    pub fn new(
        result: ScoreResult,
        resume_file: impl Into<String>,
        job_source: Option<String>,
        text_extracted: bool,
        processing_time_ms: u64,
    ) -> Self {
        let suggestions = suggestions(&result)
            .into_iter()
            .map(|kind| SuggestionEntry {
                kind,
                message: kind.message().to_string(),
            })
            .collect();

        let metadata = ReportMetadata {
            resume_file: resume_file.into(),
            job_source,
            keyword_source: result.keyword_source,
            text_extracted,
            generated_at: Utc::now(),
            processing_time_ms,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Self {
            band: ScoreBand::from_score(result.score),
            result,
            suggestions,
            metadata,
        }
    }

    /// Suggestion lines, or the all-clear message when there are none
    pub fn suggestion_lines(&self) -> Vec<&str> {
        if self.suggestions.is_empty() {
            vec![LOOKS_SOLID]
        } else {
            self.suggestions.iter().map(|s| s.message.as_str()).collect()
        }
    }
}
