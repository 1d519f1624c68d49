//! ATS-style scoring: keyword overlap, contact info, section headers and
//! document length combined into a 0-100 score.

use crate::processing::keywords::{rank_keywords, GENERIC_KEYWORDS};
use crate::processing::text_processor::TextProcessor;
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default number of job-description keywords scored against
pub const DEFAULT_TOP_K: usize = 30;

pub const KEYWORD_WEIGHT: f64 = 60.0;
pub const CONTACT_WEIGHT: u32 = 20;
pub const SECTIONS_WEIGHT: u32 = 20;

/// Word-count tiers as (minimum words, points), highest first
const WORD_COUNT_TIERS: [(usize, u32); 2] = [(300, 10), (150, 5)];

const SECTION_MARKERS: [&str; 6] = [
    "experience",
    "education",
    "skills",
    "projects",
    "summary",
    "work",
];

/// Where the keyword set came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordSource {
    JobDescription,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Composite score, 0-100
    pub score: u32,
    pub kw_score: u32,
    pub contact_score: u32,
    pub sections_score: u32,
    pub wc_score: u32,
    /// Matched keywords in lexicographic order
    pub matched: Vec<String>,
    pub kw_count: usize,
    pub kw_total: usize,
    pub has_contact: bool,
    pub has_sections: bool,
    pub word_count: usize,
    pub keyword_source: KeywordSource,
}

pub struct Scorer {
    processor: TextProcessor,
    email_regex: Regex,
    phone_regex: Regex,
    section_matcher: AhoCorasick,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"\b[\w.-]+@[\w.-]+\.\w{2,}\b").expect("Invalid email regex");

        // Loose phone heuristic: any run of seven or more digits
        let phone_regex = Regex::new(r"\b\d{7,}\b").expect("Invalid phone regex");

        let section_matcher = AhoCorasick::new(SECTION_MARKERS).expect("Invalid section markers");

        Self {
            processor: TextProcessor::new(),
            email_regex,
            phone_regex,
            section_matcher,
        }
    }

    /// Score a CV against a job description, or the generic keyword set when
    /// no usable job description is given.
    pub fn score(&self, cv_text: &str, job_text: Option<&str>, top_k: usize) -> ScoreResult {
        let lowered = cv_text.to_lowercase();
        let tokens_cv: HashSet<String> = self.processor.tokenize(&lowered).into_iter().collect();

        let (keywords, keyword_source) = self.keyword_set(job_text, top_k);

        let mut matched: Vec<String> = keywords
            .iter()
            .filter(|keyword| tokens_cv.contains(*keyword))
            .cloned()
            .collect();
        matched.sort();

        let kw_total = keywords.len();
        let ratio = matched.len() as f64 / kw_total.max(1) as f64;
        let kw_score = (ratio * KEYWORD_WEIGHT).min(100.0) as u32;

        let has_contact = self.email_regex.is_match(cv_text) || self.phone_regex.is_match(cv_text);
        let has_sections = self.section_matcher.is_match(&lowered);
        let contact_score = if has_contact { CONTACT_WEIGHT } else { 0 };
        let sections_score = if has_sections { SECTIONS_WEIGHT } else { 0 };

        let word_count = self.processor.word_count(cv_text);
        let wc_score = word_count_score(word_count);

        let score = (kw_score + contact_score + sections_score + wc_score).min(100);

        debug!(
            "Scored CV: total={} kw={} ({}/{}) contact={} sections={} words={}",
            score,
            kw_score,
            matched.len(),
            kw_total,
            contact_score,
            sections_score,
            word_count
        );

        ScoreResult {
            score,
            kw_score,
            contact_score,
            sections_score,
            wc_score,
            kw_count: matched.len(),
            matched,
            kw_total,
            has_contact,
            has_sections,
            word_count,
            keyword_source,
        }
    }

    fn keyword_set(
        &self,
        job_text: Option<&str>,
        top_k: usize,
    ) -> (HashSet<String>, KeywordSource) {
        let selected: HashSet<String> = match job_text {
            Some(job) if !job.trim().is_empty() => {
                rank_keywords(&self.processor, job, top_k).into_iter().collect()
            }
            _ => HashSet::new(),
        };

        if selected.is_empty() {
            let generic = GENERIC_KEYWORDS.iter().map(|k| k.to_string()).collect();
            (generic, KeywordSource::Generic)
        } else {
            (selected, KeywordSource::JobDescription)
        }
    }
}

fn word_count_score(word_count: usize) -> u32 {
    WORD_COUNT_TIERS
        .iter()
        .find(|(min_words, _)| word_count >= *min_words)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Score a CV with a fresh [`Scorer`]
pub fn score_cv(cv_text: &str, job_text: Option<&str>, top_k: usize) -> ScoreResult {
    Scorer::new().score(cv_text, job_text, top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_generic_keywords_example() {
        let cv = "I use Python and Docker daily, work experience 5 years, email me at a@b.com";
        let result = score_cv(cv, None, DEFAULT_TOP_K);

        assert!(result.has_contact);
        assert!(result.has_sections);
        assert_eq!(result.matched, vec!["docker", "python"]);
        assert_eq!(result.keyword_source, KeywordSource::Generic);
        assert_eq!(result.kw_total, GENERIC_KEYWORDS.len());
        assert_eq!(result.kw_score, 6);
        assert_eq!(result.word_count, 16);
        assert_eq!(result.wc_score, 0);
        assert_eq!(result.score, 46);
    }

    #[test]
    fn test_empty_cv() {
        let result = score_cv("", None, DEFAULT_TOP_K);

        assert_eq!(result.word_count, 0);
        assert!(!result.has_contact);
        assert!(!result.has_sections);
        assert!(result.matched.is_empty());
        assert_eq!(result.kw_score, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_job_description_keywords() {
        let cv = "Backend engineer: Rust services";
        let result = score_cv(cv, Some("rust kafka spark airflow"), DEFAULT_TOP_K);

        assert_eq!(result.keyword_source, KeywordSource::JobDescription);
        assert_eq!(result.kw_total, 4);
        assert_eq!(result.matched, vec!["rust"]);
        assert_eq!(result.kw_score, 15);
    }

    #[test]
    fn test_top_k_bounds_keyword_set() {
        let result = score_cv("zig", Some("rust rust go go zig"), 2);
        assert_eq!(result.kw_total, 2);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn test_blank_or_stopword_job_falls_back_to_generic() {
        let blank = score_cv("python", Some("   \n"), DEFAULT_TOP_K);
        assert_eq!(blank.keyword_source, KeywordSource::Generic);

        let stop_only = score_cv("python", Some("the and for with you"), DEFAULT_TOP_K);
        assert_eq!(stop_only.keyword_source, KeywordSource::Generic);
        assert_eq!(stop_only.matched, vec!["python"]);
    }

    #[test]
    fn test_contact_heuristics() {
        let scorer = Scorer::new();
        assert!(scorer.score("reach me: jane.doe@mail.example.org", None, 30).has_contact);
        assert!(scorer.score("Phone 5551234567", None, 30).has_contact);
        assert!(!scorer.score("Phone 555-123-4567", None, 30).has_contact);
        assert!(!scorer.score("user@localhost", None, 30).has_contact);
    }

    #[test]
    fn test_section_markers_case_insensitive() {
        let scorer = Scorer::new();
        assert!(scorer.score("EDUCATION\nBSc", None, 30).has_sections);
        assert!(scorer.score("Teamwork", None, 30).has_sections);
        assert!(!scorer.score("Hobbies: chess", None, 30).has_sections);
    }

    #[test]
    fn test_word_count_tiers() {
        let scorer = Scorer::new();
        assert_eq!(scorer.score(&words(149), None, 30).wc_score, 0);
        assert_eq!(scorer.score(&words(150), None, 30).wc_score, 5);
        assert_eq!(scorer.score(&words(299), None, 30).wc_score, 5);
        assert_eq!(scorer.score(&words(300), None, 30).wc_score, 10);
    }

    #[test]
    fn test_total_is_capped() {
        let cv = format!("rust skills a@b.com {}", words(300));
        let result = score_cv(&cv, Some("rust"), DEFAULT_TOP_K);

        assert_eq!(result.kw_score, 60);
        assert_eq!(result.contact_score, 20);
        assert_eq!(result.sections_score, 20);
        assert_eq!(result.wc_score, 10);
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_deterministic() {
        let cv = "Python, SQL, AWS. Experience at Acme. Call 01234567890.";
        let job = "Looking for SQL and AWS engineers with Python and dbt; SQL heavy role";
        assert_eq!(score_cv(cv, Some(job), 5), score_cv(cv, Some(job), 5));
    }

    #[test]
    fn test_bounds_hold() {
        let samples = [
            ("", None),
            ("python docker aws sql linux git", None),
            ("x", Some("x y z")),
            ("education work skills a@b.io 1234567", Some("education")),
        ];
        for (cv, job) in samples {
            let cv = format!("{} {}", cv, words(320));
            let r = score_cv(&cv, job, DEFAULT_TOP_K);
            assert!(r.score <= 100);
            assert!(r.kw_score <= 60);
            assert!([0, 20].contains(&r.contact_score));
            assert!([0, 20].contains(&r.sections_score));
            assert!([0, 5, 10].contains(&r.wc_score));
            assert_eq!(
                r.score,
                (r.kw_score + r.contact_score + r.sections_score + r.wc_score).min(100)
            );
        }
    }
}
