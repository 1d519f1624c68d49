//! Keyword selection from job descriptions

use crate::processing::text_processor::TextProcessor;
use std::collections::HashMap;

/// Default number of keywords returned by [`select_keywords`]
pub const DEFAULT_KEYWORD_LIMIT: usize = 50;

const STOP_WORDS: [&str; 17] = [
    "the", "and", "for", "with", "that", "this", "from", "your", "you", "are", "a", "an", "to",
    "in", "on", "of", "or",
];

/// Generic technology terms used when no job description is available
pub const GENERIC_KEYWORDS: [&str; 18] = [
    "python", "aws", "docker", "sql", "linux", "git", "javascript", "java", "c++", "html", "css",
    "kubernetes", "node", "react", "data", "analysis", "machine", "learning",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Rank the tokens of `text` by frequency and return the top `limit`.
///
/// Stop words and all-digit tokens are discarded. Equal counts keep the
/// order in which the tokens first appear.
pub fn rank_keywords(processor: &TextProcessor, text: &str, limit: usize) -> Vec<String> {
    let tokens = processor.tokenize(text);

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in &tokens {
        match index.get(token.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }

    counts.retain(|(token, _)| !is_stop_word(token) && !token.chars().all(|c| c.is_ascii_digit()));

    // stable sort: ties stay in first-occurrence order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(token, _)| token.to_string())
        .collect()
}

/// Select up to `limit` keywords from a job description
pub fn select_keywords(job_text: &str, limit: usize) -> Vec<String> {
    rank_keywords(&TextProcessor::new(), job_text, limit)
}
