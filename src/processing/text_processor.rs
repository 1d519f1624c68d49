//! Tokenization and word counting

use regex::Regex;

/// Technology-friendly token: letters, digits and `+ # . _ -`, at least two
/// characters, anchored on word boundaries.
const TOKEN_PATTERN: &str = r"\b[a-z0-9+#._-]{2,}\b";
const WORD_PATTERN: &str = r"\w+";

pub struct TextProcessor {
    token_regex: Regex,
    word_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let token_regex = Regex::new(TOKEN_PATTERN).expect("Invalid token regex");
        let word_regex = Regex::new(WORD_PATTERN).expect("Invalid word regex");

        Self {
            token_regex,
            word_regex,
        }
    }

    /// Lowercase `text` and split it into tokens. Duplicates are kept.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Count `\w+` runs in the original-case text
    pub fn word_count(&self, text: &str) -> usize {
        self.word_regex.find_iter(text).count()
    }
}

/// Tokenize with a throwaway [`TextProcessor`]
pub fn tokenize(text: &str) -> Vec<String> {
    TextProcessor::new().tokenize(text)
}
