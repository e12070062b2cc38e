//! Core domain types for dreamlog
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Dream record** | One logged dream entry with its metadata; immutable once created |
//! | **Emotion** | Free string label from an open, configurable vocabulary |
//! | **Polarity** | Signed sentiment strength in [-1.0, 1.0], derived from the description |
//! | **Sentiment label** | Positive / Negative / Neutral, derived from polarity by fixed thresholds |
//! | **Lucid dream** | A dream in which the dreamer reports awareness of dreaming |
//!
//! A [`DreamRecord`] only comes into existence through [`DreamRecord::create`]
//! (or by deserialising a stored record, which re-checks the same invariants),
//! so its sentiment label can never disagree with its polarity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::sentiment::SentimentClassifier;
use crate::error::{Error, Result};

/// Lowest valid sleep quality score.
pub const MIN_SLEEP_QUALITY: u8 = 1;
/// Highest valid sleep quality score.
pub const MAX_SLEEP_QUALITY: u8 = 10;

// ============================================
// Sentiment
// ============================================

/// Three-way sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Polarity strictly above this is positive.
    pub const POSITIVE_THRESHOLD: f64 = 0.1;
    /// Polarity strictly below this is negative.
    pub const NEGATIVE_THRESHOLD: f64 = -0.1;

    /// Derive the label from a polarity score.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > Self::POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < Self::NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Returns the identifier used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Returns the display name for this label
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            _ => Err(format!("unknown sentiment label: {}", s)),
        }
    }
}

/// Polarity paired with its derived label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sentiment {
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl Sentiment {
    /// Build from a polarity, clamping to [-1, 1]; NaN is treated as 0.
    pub fn from_polarity(polarity: f64) -> Self {
        let polarity = if polarity.is_nan() {
            0.0
        } else {
            polarity.clamp(-1.0, 1.0)
        };
        Self {
            polarity,
            label: SentimentLabel::from_polarity(polarity),
        }
    }

    pub fn neutral() -> Self {
        Self::from_polarity(0.0)
    }
}

// ============================================
// Tags
// ============================================

/// Normalize tags: trim, lower-case, drop empties, collapse duplicates.
///
/// First occurrence wins so the stored order stays the order the dreamer typed.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Split a comma-separated tag string (as typed into a form) into normalized tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

// ============================================
// New dream (input form)
// ============================================

/// A dream entry as collected from the input layer, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDream {
    pub title: String,
    pub description: String,
    pub emotion: String,
    pub is_lucid: bool,
    pub tags: Vec<String>,
    pub sleep_quality: u8,
}

impl NewDream {
    /// Start an entry with the required text fields; lucid=false, no tags, sleep 5.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        emotion: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            emotion: emotion.into(),
            is_lucid: false,
            tags: Vec::new(),
            sleep_quality: 5,
        }
    }

    pub fn lucid(mut self, is_lucid: bool) -> Self {
        self.is_lucid = is_lucid;
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = tags.into_iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    pub fn sleep_quality(mut self, sleep_quality: u8) -> Self {
        self.sleep_quality = sleep_quality;
        self
    }

    /// Reject entries the engine must never see.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("please enter a dream title".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(
                "please enter a dream description".to_string(),
            ));
        }
        if self.emotion.trim().is_empty() {
            return Err(Error::Validation("please choose an emotion".to_string()));
        }
        check_sleep_quality(self.sleep_quality)
    }
}

fn check_sleep_quality(sleep_quality: u8) -> Result<()> {
    if !(MIN_SLEEP_QUALITY..=MAX_SLEEP_QUALITY).contains(&sleep_quality) {
        return Err(Error::Validation(format!(
            "sleep quality must be between {} and {}, got {}",
            MIN_SLEEP_QUALITY, MAX_SLEEP_QUALITY, sleep_quality
        )));
    }
    Ok(())
}

// ============================================
// Dream record
// ============================================

/// One logged dream.
///
/// Serialises to the persisted journal shape:
/// `id, timestamp, title, description, emotion, is_lucid, tags,
/// sleep_quality, sentiment_polarity, sentiment_label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDream")]
pub struct DreamRecord {
    id: String,
    timestamp: DateTime<Utc>,
    title: String,
    description: String,
    emotion: String,
    is_lucid: bool,
    tags: Vec<String>,
    sleep_quality: u8,
    sentiment_polarity: f64,
    sentiment_label: SentimentLabel,
}

impl DreamRecord {
    /// Validate an entry and turn it into a record stamped with the current time.
    pub fn create(new: NewDream, classifier: &SentimentClassifier) -> Result<Self> {
        Self::create_at(new, classifier, Utc::now())
    }

    /// Like [`DreamRecord::create`] with an explicit creation time.
    pub fn create_at(
        new: NewDream,
        classifier: &SentimentClassifier,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        new.validate()?;

        let description = new.description.trim().to_string();
        let sentiment = classifier.classify(&description);

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            title: new.title.trim().to_string(),
            description,
            emotion: new.emotion.trim().to_string(),
            is_lucid: new.is_lucid,
            tags: normalize_tags(&new.tags),
            sleep_quality: new.sleep_quality,
            sentiment_polarity: sentiment.polarity,
            sentiment_label: sentiment.label,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn emotion(&self) -> &str {
        &self.emotion
    }

    pub fn is_lucid(&self) -> bool {
        self.is_lucid
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn sleep_quality(&self) -> u8 {
        self.sleep_quality
    }

    pub fn sentiment_polarity(&self) -> f64 {
        self.sentiment_polarity
    }

    pub fn sentiment_label(&self) -> SentimentLabel {
        self.sentiment_label
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment {
            polarity: self.sentiment_polarity,
            label: self.sentiment_label,
        }
    }

    /// Date portion of the timestamp for display (e.g., "2024-03-09").
    pub fn date_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Wire form of a stored record, checked before it becomes a [`DreamRecord`].
#[derive(Deserialize)]
struct StoredDream {
    id: String,
    timestamp: DateTime<Utc>,
    title: String,
    description: String,
    emotion: String,
    is_lucid: bool,
    #[serde(default)]
    tags: Vec<String>,
    sleep_quality: u8,
    sentiment_polarity: f64,
    sentiment_label: SentimentLabel,
}

impl TryFrom<StoredDream> for DreamRecord {
    type Error = Error;

    fn try_from(stored: StoredDream) -> Result<Self> {
        check_sleep_quality(stored.sleep_quality)?;

        if !stored.sentiment_polarity.is_finite()
            || !(-1.0..=1.0).contains(&stored.sentiment_polarity)
        {
            return Err(Error::Validation(format!(
                "dream {}: sentiment polarity {} outside [-1, 1]",
                stored.id, stored.sentiment_polarity
            )));
        }

        let expected = SentimentLabel::from_polarity(stored.sentiment_polarity);
        if expected != stored.sentiment_label {
            return Err(Error::Validation(format!(
                "dream {}: sentiment label {} does not match polarity {} (expected {})",
                stored.id, stored.sentiment_label, stored.sentiment_polarity, expected
            )));
        }

        Ok(Self {
            id: stored.id,
            timestamp: stored.timestamp,
            title: stored.title,
            description: stored.description,
            emotion: stored.emotion,
            is_lucid: stored.is_lucid,
            tags: normalize_tags(&stored.tags),
            sleep_quality: stored.sleep_quality,
            sentiment_polarity: stored.sentiment_polarity,
            sentiment_label: stored.sentiment_label,
        })
    }
}
