//! Summary statistics for a dream collection.
//!
//! [`summarize`] is the single entry point: counts, lucidity, sleep quality,
//! emotion / sentiment / tag / word frequencies, plus the sleep-quality trend
//! used by the insight rules. Empty input gives an all-zero summary.

use serde::Serialize;

use super::frequency::{serialize_ranked, FrequencyTable};
use super::tokenize::Tokenizer;
use crate::config::AnalysisConfig;
use crate::types::{DreamRecord, SentimentLabel};

/// Sizes of the ranked tables in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Number of tags kept
    pub top_tags: usize,
    /// Number of description words kept
    pub top_words: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            top_tags: 5,
            top_words: 10,
        }
    }
}

impl From<&AnalysisConfig> for SummaryOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            top_tags: config.top_tags,
            top_words: config.top_words,
        }
    }
}

/// Records per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn get(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }

    fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Summary statistics for one snapshot of the journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    /// Number of records
    pub total: usize,
    /// Number of lucid dreams
    pub lucid_count: usize,
    /// 100 * lucid / total, 0.0 for an empty journal
    pub lucid_percentage: f64,
    /// Arithmetic mean of sleep quality, 0.0 for an empty journal
    pub mean_sleep_quality: f64,
    /// Records per emotion label, first-seen order
    pub emotion_counts: FrequencyTable<String>,
    /// Records per sentiment label
    pub sentiment_counts: SentimentCounts,
    /// Most used tags, ranked
    #[serde(serialize_with = "serialize_ranked")]
    pub tag_counts: Vec<(String, u64)>,
    /// Most used description words (stop words excluded), ranked
    #[serde(serialize_with = "serialize_ranked")]
    pub word_counts: Vec<(String, u64)>,
    /// Mean sleep quality of the newer half minus the older half
    /// (by timestamp); `None` below two records
    pub sleep_quality_trend: Option<f64>,
}

impl StatisticsSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Most frequent emotion and its count (ties: first seen).
    pub fn most_common_emotion(&self) -> Option<(&str, u64)> {
        self.emotion_counts
            .most_common()
            .map(|(label, count)| (label.as_str(), count))
    }

    /// Share of records (0-100) carrying the most frequent emotion.
    pub fn dominant_emotion_percentage(&self) -> f64 {
        match self.most_common_emotion() {
            Some((_, count)) => percentage(count as usize, self.total),
            None => 0.0,
        }
    }

    /// Share of records (0-100) with a given sentiment label.
    pub fn sentiment_percentage(&self, label: SentimentLabel) -> f64 {
        percentage(self.sentiment_counts.get(label), self.total)
    }

    /// Share of positive records (0-100).
    pub fn positive_percentage(&self) -> f64 {
        self.sentiment_percentage(SentimentLabel::Positive)
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

/// Summarize with default table sizes and tokenizer.
pub fn summarize(records: &[DreamRecord]) -> StatisticsSummary {
    summarize_with(records, &SummaryOptions::default(), Tokenizer::shared())
}

/// Summarize with explicit table sizes and tokenizer.
pub fn summarize_with(
    records: &[DreamRecord],
    options: &SummaryOptions,
    tokenizer: &Tokenizer,
) -> StatisticsSummary {
    let total = records.len();
    let lucid_count = records.iter().filter(|r| r.is_lucid()).count();
    let sleep_sum: u64 = records.iter().map(|r| u64::from(r.sleep_quality())).sum();
    let mean_sleep_quality = if total == 0 {
        0.0
    } else {
        sleep_sum as f64 / total as f64
    };

    let emotion_counts: FrequencyTable<String> =
        records.iter().map(|r| r.emotion().to_string()).collect();

    let mut sentiment_counts = SentimentCounts::default();
    for record in records {
        sentiment_counts.record(record.sentiment_label());
    }

    let tags: FrequencyTable<String> = records
        .iter()
        .flat_map(|r| r.tags().iter().cloned())
        .collect();

    // Each description is tokenized on its own so no token spans two records.
    let words: FrequencyTable<String> = records
        .iter()
        .flat_map(|r| tokenizer.tokenize(r.description()))
        .collect();

    let summary = StatisticsSummary {
        total,
        lucid_count,
        lucid_percentage: percentage(lucid_count, total),
        mean_sleep_quality,
        emotion_counts,
        sentiment_counts,
        tag_counts: tags.top_n(options.top_tags),
        word_counts: words.top_n(options.top_words),
        sleep_quality_trend: sleep_quality_trend(records),
    };

    tracing::debug!(
        records = total,
        lucid = lucid_count,
        emotions = summary.emotion_counts.len(),
        distinct_tags = tags.len(),
        distinct_words = words.len(),
        "Summarized dream journal"
    );

    summary
}

/// Newer-half mean minus older-half mean of sleep quality.
///
/// Records are ordered by timestamp (ties by id, so the result does not
/// depend on input order). With an odd count the middle record is left out.
fn sleep_quality_trend(records: &[DreamRecord]) -> Option<f64> {
    if records.len() < 2 {
        return None;
    }
    let mut ordered: Vec<&DreamRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        a.timestamp()
            .cmp(&b.timestamp())
            .then_with(|| a.id().cmp(b.id()))
    });

    let half = ordered.len() / 2;
    let mean = |slice: &[&DreamRecord]| {
        slice
            .iter()
            .map(|r| f64::from(r.sleep_quality()))
            .sum::<f64>()
            / slice.len() as f64
    };
    let older = mean(&ordered[..half]);
    let newer = mean(&ordered[ordered.len() - half..]);
    Some(newer - older)
}
