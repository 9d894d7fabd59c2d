//! Keyword normalization for the ATS overlap score

use std::collections::{BTreeSet, HashSet};

/// Normalized word tokens of a document
pub type KeywordSet = BTreeSet<String>;

/// Standard English stop words (the NLTK list)
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing",
    "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't",
    "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Lowercases, strips ASCII punctuation, splits on whitespace and drops stop words
pub struct KeywordNormalizer {
    stop_words: HashSet<String>,
}

impl Default for KeywordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordNormalizer {
    pub fn new() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    pub fn with_stop_words<'a>(stop_words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stop_words: stop_words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    pub fn normalize(&self, text: &str) -> KeywordSet {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let normalizer = KeywordNormalizer::new();
        let keywords = normalizer.normalize("We need a Python developer, with SQL (and Excel)!");

        let expected: KeywordSet = ["need", "python", "developer", "sql", "excel"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let normalizer = KeywordNormalizer::new();
        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize(" ... !!! -- ").is_empty());
    }

    #[test]
    fn test_punctuation_removed_inside_tokens() {
        let normalizer = KeywordNormalizer::new();
        let keywords = normalizer.normalize("Node.js C++ don't");

        assert!(keywords.contains("nodejs"));
        assert!(keywords.contains("c"));
        // "don't" loses its apostrophe before the stop-word check
        assert!(keywords.contains("dont"));
    }

    #[test]
    fn test_deterministic() {
        let normalizer = KeywordNormalizer::new();
        let text = "Machine learning engineer building data pipelines";
        assert_eq!(normalizer.normalize(text), normalizer.normalize(text));
    }

    #[test]
    fn test_stop_word_list() {
        let normalizer = KeywordNormalizer::new();
        assert_eq!(normalizer.stop_word_count(), 179);
        assert!(normalizer.is_stop_word("the"));
        assert!(!normalizer.is_stop_word("python"));
    }
}
