//! Improvement suggestions and score banding

use crate::processing::scorer::ScoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this many words the CV is considered thin
const MIN_CONTENT_WORDS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    AddContactInfo,
    AddSections,
    AddMoreContent,
    MirrorKeywords,
}

impl Suggestion {
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::AddContactInfo => "Add email and phone at the top.",
            Suggestion::AddSections => "Include Experience, Education, and Skills sections.",
            Suggestion::AddMoreContent => "Add more bullet points with metrics and outcomes.",
            Suggestion::MirrorKeywords => {
                "Mirror keywords from the job description naturally in your CV."
            }
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Shown when no suggestion applies
pub const LOOKS_SOLID: &str = "Looks solid! Fine-tune phrasing and quantify achievements.";

pub fn suggestions(result: &ScoreResult) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if !result.has_contact {
        out.push(Suggestion::AddContactInfo);
    }
    if !result.has_sections {
        out.push(Suggestion::AddSections);
    }
    if result.word_count < MIN_CONTENT_WORDS {
        out.push(Suggestion::AddMoreContent);
    }
    if result.matched.is_empty() {
        out.push(Suggestion::MirrorKeywords);
    }
    out
}

/// Coarse rating of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Fair,
    Strong,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=49 => ScoreBand::Low,
            50..=74 => ScoreBand::Fair,
            _ => ScoreBand::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Low => "NEEDS WORK",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Strong => "STRONG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::{score_cv, DEFAULT_TOP_K};

    #[test]
    fn test_empty_cv_gets_every_suggestion() {
        let result = score_cv("", None, DEFAULT_TOP_K);
        assert_eq!(
            suggestions(&result),
            vec![
                Suggestion::AddContactInfo,
                Suggestion::AddSections,
                Suggestion::AddMoreContent,
                Suggestion::MirrorKeywords,
            ]
        );
    }

    #[test]
    fn test_complete_cv_gets_none() {
        let cv = format!("Skills: python. Contact a@b.com. {}", vec!["detail"; 160].join(" "));
        let result = score_cv(&cv, None, DEFAULT_TOP_K);
        assert!(suggestions(&result).is_empty());
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(74), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(75), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Strong);
    }
}
