//! Sentiment classification for dream descriptions.
//!
//! Scoring is pluggable behind [`SentimentScorer`]; the built-in
//! [`LexiconScorer`] sums word valences from a fixed lexicon and squashes the
//! sum into (-1, 1) with `x / sqrt(x^2 + 15)`. It is a squashed sum, not an
//! average over the words: unknown words add nothing, so a long neutral
//! passage does not dilute one strong word. Because the squash is strictly
//! increasing in the sum and every word contributes independently, swapping a
//! neutral word for a positive one can only raise the score (and a negative
//! one only lower it).
//!
//! The label is never chosen by a scorer: it always comes from
//! [`SentimentLabel::from_polarity`].

use std::collections::HashMap;

use crate::config::SentimentConfig;
use crate::types::{Sentiment, SentimentLabel};

/// Normalisation constant for the valence sum (same role as VADER's alpha).
const SQUASH_ALPHA: f64 = 15.0;

/// Added to the magnitude of a word following an intensifier.
const INTENSIFIER_BOOST: f64 = 0.293;

/// Built-in word valences on a roughly -4..4 scale.
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("happy", 2.7),
    ("happiness", 2.6),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("beautiful", 2.9),
    ("wonderful", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("peaceful", 2.2),
    ("calm", 1.3),
    ("fun", 2.3),
    ("good", 1.9),
    ("great", 3.1),
    ("nice", 1.8),
    ("safe", 1.9),
    ("warm", 0.9),
    ("free", 1.6),
    ("freedom", 3.2),
    ("laugh", 2.6),
    ("laughing", 2.2),
    ("smile", 1.5),
    ("smiling", 1.8),
    ("excited", 1.9),
    ("exciting", 2.2),
    ("relaxed", 2.2),
    ("bright", 1.9),
    ("glad", 2.0),
    ("hope", 1.9),
    ("friendly", 2.2),
    ("comfortable", 1.5),
    ("delight", 2.9),
    ("magical", 2.0),
    ("win", 2.8),
    ("won", 2.7),
    ("proud", 2.1),
    ("kind", 2.4),
    ("gentle", 1.9),
    ("pleasant", 2.3),
    ("serene", 2.0),
    ("fantastic", 2.6),
    ("perfect", 2.7),
    // negative
    ("scared", -1.9),
    ("scary", -2.2),
    ("afraid", -2.0),
    ("fear", -2.2),
    ("terrified", -3.0),
    ("terrible", -2.1),
    ("horrible", -2.5),
    ("awful", -2.0),
    ("bad", -2.5),
    ("sad", -2.1),
    ("angry", -2.3),
    ("anxious", -1.0),
    ("anxiety", -0.7),
    ("dark", -1.4),
    ("nightmare", -2.4),
    ("monster", -1.9),
    ("lost", -1.3),
    ("death", -2.9),
    ("dead", -3.3),
    ("die", -2.9),
    ("dying", -2.8),
    ("cry", -2.1),
    ("crying", -2.1),
    ("hurt", -2.4),
    ("pain", -2.3),
    ("panic", -2.6),
    ("trapped", -2.4),
    ("alone", -1.0),
    ("lonely", -1.6),
    ("confused", -1.3),
    ("worried", -1.2),
    ("worry", -1.9),
    ("hate", -2.7),
    ("kill", -3.7),
    ("killed", -3.5),
    ("attack", -2.1),
    ("attacked", -2.0),
    ("drowning", -2.0),
    ("stuck", -1.3),
    ("ugly", -3.1),
    ("evil", -3.4),
    ("scream", -1.7),
    ("screaming", -1.7),
    ("chased", -1.0),
    ("falling", -0.5),
    ("broken", -1.9),
    ("frightening", -2.3),
];

/// Words that amplify the next word's valence.
const INTENSIFIERS: &[&str] = &[
    "very",
    "really",
    "extremely",
    "so",
    "incredibly",
    "totally",
    "super",
    "absolutely",
    "completely",
    "deeply",
    "truly",
];

/// A deterministic text → polarity scorer.
///
/// Implementations must return the same value for the same text on every
/// call. Out-of-range values are clamped by [`SentimentClassifier`].
pub trait SentimentScorer: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Polarity in [-1.0, 1.0].
    fn polarity(&self, text: &str) -> f64;
}

/// Lexicon-based scorer (word valences summed, then squashed).
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Scorer over the built-in lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
        }
    }

    /// Built-in lexicon with entries added or replaced.
    ///
    /// Words are lower-cased; when two entries fold to the same word the one
    /// whose original key sorts last wins, whatever order they arrive in.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a f64)>) -> Self {
        let mut overrides: Vec<(&String, &f64)> = overrides.into_iter().collect();
        overrides.sort_by(|a, b| a.0.cmp(b.0));

        let mut scorer = Self::new();
        for (word, valence) in overrides {
            let word = word.trim().to_lowercase();
            if word.is_empty() || !valence.is_finite() || is_intensifier(&word) {
                tracing::warn!(word = %word, valence, "Ignoring unusable lexicon override");
                continue;
            }
            scorer.lexicon.insert(word, *valence);
        }
        scorer
    }

    /// Valence of a single (lower-case) word, 0.0 when unknown.
    pub fn valence(&self, word: &str) -> f64 {
        self.lexicon.get(word).copied().unwrap_or(0.0)
    }

    /// Sum of word valences, with intensifier boosts applied.
    fn valence_sum(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut boosted = false;

        for word in words(text) {
            if is_intensifier(&word) {
                boosted = true;
                continue;
            }
            let mut valence = self.valence(&word);
            if boosted && valence != 0.0 {
                valence += INTENSIFIER_BOOST * valence.signum();
            }
            sum += valence;
            boosted = false;
        }
        sum
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> f64 {
        let sum = self.valence_sum(text);
        if sum == 0.0 {
            return 0.0;
        }
        sum / (sum * sum + SQUASH_ALPHA).sqrt()
    }
}

fn is_intensifier(word: &str) -> bool {
    INTENSIFIERS.contains(&word)
}

/// Lower-cased words, split on anything that is not a letter, digit or apostrophe.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Maps free text to a polarity score and a three-way label.
pub struct SentimentClassifier {
    scorer: Box<dyn SentimentScorer>,
}

impl SentimentClassifier {
    /// Classifier backed by a custom scorer.
    pub fn new(scorer: Box<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Lexicon classifier with the configured overrides applied.
    pub fn from_config(config: &SentimentConfig) -> Self {
        Self::new(Box::new(LexiconScorer::with_overrides(&config.lexicon)))
    }

    /// Name of the scorer in use.
    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Classify a piece of text. Empty or whitespace-only text is neutral.
    pub fn classify(&self, text: &str) -> Sentiment {
        if text.trim().is_empty() {
            return Sentiment::neutral();
        }
        let sentiment = Sentiment::from_polarity(self.scorer.polarity(text));
        tracing::trace!(
            scorer = self.scorer.name(),
            polarity = sentiment.polarity,
            label = %sentiment.label,
            "Classified text"
        );
        sentiment
    }

    /// Convenience for callers that only need the label.
    pub fn label(&self, text: &str) -> SentimentLabel {
        self.classify(text).label
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Box::new(LexiconScorer::new()))
    }
}

impl std::fmt::Debug for SentimentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentClassifier")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}
