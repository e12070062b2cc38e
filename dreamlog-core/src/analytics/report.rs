//! Full analysis of a journal snapshot and its text / markdown renderings.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::frequency::serialize_ranked;
use super::insights::{InsightGenerator, InsightSet};
use super::summary::{summarize_with, StatisticsSummary, SummaryOptions};
use super::themes::theme_weights_with;
use super::tokenize::Tokenizer;
use super::trends::{build_emotion_timeline, build_sleep_quality_series, recent, TrendPoint};
use crate::config::AnalysisConfig;
use crate::format::{format_counter, format_delta};
use crate::types::{DreamRecord, SentimentLabel};

/// Shown when no insight rule fires.
pub const NO_INSIGHTS_MESSAGE: &str = "Keep recording dreams to unlock more insights!";

/// Shown instead of a report for an empty journal.
pub const EMPTY_JOURNAL_MESSAGE: &str = "No dreams recorded yet. Start by adding some dreams!";

/// Short reference to a recent dream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentDream {
    pub id: String,
    pub title: String,
    pub emotion: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&DreamRecord> for RecentDream {
    fn from(record: &DreamRecord) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.title().to_string(),
            emotion: record.emotion().to_string(),
            timestamp: record.timestamp(),
        }
    }
}

/// Everything the presentation layer needs for one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub summary: StatisticsSummary,
    pub insights: InsightSet,
    pub recent: Vec<RecentDream>,
    pub emotion_timeline: Vec<TrendPoint<String>>,
    pub sleep_quality_series: Vec<TrendPoint<u8>>,
    #[serde(serialize_with = "serialize_ranked")]
    pub themes: Vec<(String, u64)>,
}

impl AnalysisReport {
    /// Run every engine component over `records`.
    pub fn build(
        records: &[DreamRecord],
        config: &AnalysisConfig,
        generator: &InsightGenerator,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let tokenizer = Tokenizer::shared();
        let summary = summarize_with(records, &SummaryOptions::from(config), tokenizer);
        let insights = generator.generate(&summary, records.len());

        Self {
            generated_at,
            insights,
            recent: recent(records, config.recent_count)
                .into_iter()
                .map(RecentDream::from)
                .collect(),
            emotion_timeline: build_emotion_timeline(records),
            sleep_quality_series: build_sleep_quality_series(records),
            themes: theme_weights_with(records, config.theme_words, tokenizer),
            summary,
        }
    }

    /// Insight messages, or the fallback line when none fired.
    pub fn insight_lines(&self) -> Vec<&str> {
        if self.insights.is_empty() {
            vec![NO_INSIGHTS_MESSAGE]
        } else {
            self.insights.messages()
        }
    }

    /// Plain-text report.
    pub fn render_text(&self) -> String {
        let s = &self.summary;
        if s.is_empty() {
            return EMPTY_JOURNAL_MESSAGE.to_string();
        }

        let mut out = String::new();
        let (top_emotion, top_count) = s.most_common_emotion().unwrap_or(("None", 0));

        // Writing into a String cannot fail.
        let _ = writeln!(out, "DREAM JOURNAL ANALYSIS");
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(out);
        let _ = writeln!(out, "BASIC STATISTICS:");
        let _ = writeln!(out, "• Total Dreams Recorded: {}", s.total);
        let _ = writeln!(
            out,
            "• Lucid Dreams: {} ({:.1}%)",
            s.lucid_count, s.lucid_percentage
        );
        let _ = writeln!(
            out,
            "• Average Sleep Quality: {:.1}/10",
            s.mean_sleep_quality
        );
        if let Some(delta) = s.sleep_quality_trend {
            let _ = writeln!(
                out,
                "• Sleep Quality Trend: {} (recent vs earlier)",
                format_delta(delta)
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "EMOTIONAL PATTERNS:");
        let _ = writeln!(
            out,
            "• Most Common Emotion: {} ({} times)",
            top_emotion, top_count
        );
        let _ = writeln!(out, "• Emotion Distribution:");
        let _ = writeln!(out, "{}", format_counter(s.emotion_counts.iter(), 2));
        let _ = writeln!(out);
        let _ = writeln!(out, "SENTIMENT ANALYSIS:");
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Negative,
            SentimentLabel::Neutral,
        ] {
            let _ = writeln!(
                out,
                "• {} Dreams: {}",
                label.display_name(),
                s.sentiment_counts.get(label)
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "COMMON THEMES (Tags):");
        if s.tag_counts.is_empty() {
            let _ = writeln!(out, "  No tags found");
        } else {
            let _ = writeln!(out, "{}", format_counter(ranked(&s.tag_counts), 2));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "FREQUENT WORDS IN DREAMS:");
        let _ = writeln!(out, "{}", format_counter(ranked(&s.word_counts), 2));
        let _ = writeln!(out);
        let _ = writeln!(out, "RECENT DREAM TITLES:");
        for dream in &self.recent {
            let _ = writeln!(
                out,
                "• {} ({})",
                dream.title,
                dream.timestamp.format("%Y-%m-%d")
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "INSIGHTS:");
        for line in self.insight_lines() {
            let _ = writeln!(out, "• {}", line);
        }
        out
    }

    /// Markdown report.
    pub fn render_markdown(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();

        let _ = writeln!(out, "# Dream Journal Analysis");
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "*Generated on {}*",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(out);

        if s.is_empty() {
            let _ = writeln!(out, "*{}*", EMPTY_JOURNAL_MESSAGE);
            return out;
        }

        let _ = writeln!(out, "## Summary");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Metric | Value |");
        let _ = writeln!(out, "|--------|-------|");
        let _ = writeln!(out, "| Dreams | {} |", s.total);
        let _ = writeln!(
            out,
            "| Lucid | {} ({:.1}%) |",
            s.lucid_count, s.lucid_percentage
        );
        let _ = writeln!(
            out,
            "| Average sleep quality | {:.1}/10 |",
            s.mean_sleep_quality
        );
        let _ = writeln!(out, "| Positive | {} |", s.sentiment_counts.positive);
        let _ = writeln!(out, "| Negative | {} |", s.sentiment_counts.negative);
        let _ = writeln!(out, "| Neutral | {} |", s.sentiment_counts.neutral);
        let _ = writeln!(out);

        let _ = writeln!(out, "## Emotions");
        let _ = writeln!(out);
        for (emotion, count) in s.emotion_counts.iter() {
            let _ = writeln!(out, "- **{}**: {}", emotion, count);
        }
        let _ = writeln!(out);

        if !s.tag_counts.is_empty() {
            let _ = writeln!(out, "## Common Themes");
            let _ = writeln!(out);
            for (i, (tag, count)) in s.tag_counts.iter().enumerate() {
                let _ = writeln!(out, "{}. **{}** - {}", i + 1, tag, count);
            }
            let _ = writeln!(out);
        }

        if !s.word_counts.is_empty() {
            let _ = writeln!(out, "## Frequent Words");
            let _ = writeln!(out);
            let words: Vec<String> = s
                .word_counts
                .iter()
                .map(|(w, c)| format!("{} ({})", w, c))
                .collect();
            let _ = writeln!(out, "{}", words.join(", "));
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "## Recent Dreams");
        let _ = writeln!(out);
        for dream in &self.recent {
            let _ = writeln!(
                out,
                "- {} - *{}* ({})",
                dream.timestamp.format("%Y-%m-%d"),
                dream.title,
                dream.emotion
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Insights");
        let _ = writeln!(out);
        for line in self.insight_lines() {
            let _ = writeln!(out, "- {}", line);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out, "*Generated by dreamlog*");
        out
    }
}

fn ranked(entries: &[(String, u64)]) -> impl Iterator<Item = (&str, u64)> {
    entries.iter().map(|(k, c)| (k.as_str(), *c))
}
