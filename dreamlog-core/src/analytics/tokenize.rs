//! Word tokenization for frequency tables.
//!
//! Text is split on whitespace, each piece is lower-cased and stripped of
//! punctuation, and short words and stop words are dropped. Tokens come out
//! lazily in original word order with duplicates retained.

use std::collections::HashSet;
use std::str::SplitWhitespace;
use std::sync::OnceLock;

/// Tokens shorter than this (in characters) are discarded.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 4;

/// Articles, pronouns, common prepositions and conjunctions.
///
/// Words below the minimum length are filtered anyway; they are listed so a
/// tokenizer built with a smaller minimum still drops them.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "for", "nor", "so", "yet", "of", "to", "in", "on", "at",
    "by", "as", "is", "it", "i", "me", "my", "we", "us", "he", "she", "her", "him", "his", "you",
    "was", "were", "are", "be", "been", "being", "had", "has", "have", "that", "this", "these",
    "those", "with", "from", "there", "then", "than", "they", "them", "their", "what", "when",
    "where", "which", "while", "who", "whom", "into", "onto", "over", "under", "about", "after",
    "before", "some", "just", "also", "very", "would", "could", "should", "will", "your", "our",
    "its", "did", "does", "not", "all", "out", "up", "down", "like", "felt",
];

/// Configurable tokenizer: minimum length plus a stop-word set.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_len: usize,
    stop_words: HashSet<String>,
}

impl Tokenizer {
    /// Tokenizer with the default stop words and minimum length.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_MIN_TOKEN_LEN, DEFAULT_STOP_WORDS.iter().copied())
    }

    /// Tokenizer with a custom stop-word set.
    pub fn with_stop_words<I, S>(min_len: usize, stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            min_len,
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Shared default tokenizer.
    pub fn shared() -> &'static Tokenizer {
        static DEFAULT: OnceLock<Tokenizer> = OnceLock::new();
        DEFAULT.get_or_init(Tokenizer::new)
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lazily tokenize `text`. Clone the iterator to walk it again.
    pub fn tokenize<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            words: text.split_whitespace(),
            tokenizer: self,
        }
    }

    fn clean(&self, raw: &str) -> Option<String> {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        if word.chars().count() < self.min_len || self.is_stop_word(&word) {
            return None;
        }
        Some(word)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy token sequence produced by [`Tokenizer::tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: SplitWhitespace<'a>,
    tokenizer: &'a Tokenizer,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for raw in self.words.by_ref() {
            if let Some(word) = self.tokenizer.clean(raw) {
                return Some(word);
            }
        }
        None
    }
}

/// Tokenize with the default tokenizer.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokenizer::shared().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_fold_and_filter() {
        let tokenizer = Tokenizer::with_stop_words(4, ["a", "had", "with"]);
        let tokens: Vec<String> = tokenizer
            .tokenize("I had a Scary Dream with a Dragon")
            .collect();
        assert_eq!(tokens, vec!["scary", "dream", "dragon"]);
    }

    #[test]
    fn test_default_tokenizer() {
        let tokens: Vec<String> = tokenize("I had a Scary Dream with a Dragon").collect();
        assert_eq!(tokens, vec!["scary", "dream", "dragon"]);
    }

    #[test]
    fn test_required_stop_words() {
        for word in [
            "the", "and", "was", "were", "that", "this", "with", "from", "have", "had", "there",
            "then", "than", "but", "for",
        ] {
            assert!(Tokenizer::shared().is_stop_word(word), "{}", word);
        }
        let tokens: Vec<String> = tokenize("There was that house, then this garden").collect();
        assert_eq!(tokens, vec!["house", "garden"]);
    }

    #[test]
    fn test_punctuation_stripped() {
        let tokens: Vec<String> = tokenize("Dragon! dragon, (DRAGON) sky-high").collect();
        assert_eq!(tokens, vec!["dragon", "dragon", "dragon", "skyhigh"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   \n ").count(), 0);
        assert_eq!(tokenize("... !!! ?").count(), 0);
    }

    #[test]
    fn test_restartable() {
        let tokens = tokenize("flying over golden water");
        let first: Vec<String> = tokens.clone().collect();
        let second: Vec<String> = tokens.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["flying", "golden", "water"]);
    }

    #[test]
    fn test_unicode_length_counts_chars() {
        let tokens: Vec<String> = tokenize("Ärger über café").collect();
        assert_eq!(tokens, vec!["ärger", "über", "café"]);
    }
}
