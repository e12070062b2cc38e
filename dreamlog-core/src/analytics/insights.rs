//! Natural-language insights derived from summary statistics.
//!
//! An [`InsightGenerator`] holds an ordered list of [`InsightRule`]s. Each
//! rule looks at a [`StatisticsSummary`] on its own and may emit one
//! message. Output order is registration order, which for the default
//! generator is:
//!
//! 1. lucidity (`core.lucidity`)
//! 2. sleep quality (`core.sleep_quality`)
//! 3. dominant emotion (`core.dominant_emotion`)
//! 4. sentiment balance (`core.sentiment_balance`)
//! 5. sleep-quality trend (`core.sleep_trend`)
//!
//! A rule whose minimum sample size exceeds the record count is skipped.
//! When nothing fires the result is an empty [`InsightSet`].

use serde::Serialize;

use super::summary::StatisticsSummary;
use crate::config::InsightThresholds;

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Lucidity,
    SleepQuality,
    DominantEmotion,
    Sentiment,
    SleepTrend,
}

/// One generated observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
}

/// Ordered insights from one [`InsightGenerator::generate`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InsightSet {
    insights: Vec<Insight>,
}

impl InsightSet {
    pub fn is_empty(&self) -> bool {
        self.insights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.insights.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Insight> {
        self.insights.iter()
    }

    /// Messages in order.
    pub fn messages(&self) -> Vec<&str> {
        self.insights.iter().map(|i| i.message.as_str()).collect()
    }

    /// Whether any insight of `kind` was emitted.
    pub fn contains(&self, kind: InsightKind) -> bool {
        self.insights.iter().any(|i| i.kind == kind)
    }
}

impl<'a> IntoIterator for &'a InsightSet {
    type Item = &'a Insight;
    type IntoIter = std::slice::Iter<'a, Insight>;

    fn into_iter(self) -> Self::IntoIter {
        self.insights.iter()
    }
}

/// A single insight rule.
///
/// Rules must be pure: same summary and thresholds, same answer.
pub trait InsightRule: Send + Sync {
    /// Unique name, `namespace.rule_name` (e.g. "core.lucidity").
    fn name(&self) -> &str;

    fn kind(&self) -> InsightKind;

    /// Fewest records this rule will speak about.
    fn min_records(&self, thresholds: &InsightThresholds) -> usize;

    /// The message, if the rule fires.
    fn evaluate(
        &self,
        summary: &StatisticsSummary,
        thresholds: &InsightThresholds,
    ) -> Option<String>;
}

/// Runs insight rules in a fixed order.
pub struct InsightGenerator {
    rules: Vec<Box<dyn InsightRule>>,
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    /// Generator with no rules.
    pub fn empty(thresholds: InsightThresholds) -> Self {
        Self {
            rules: Vec::new(),
            thresholds,
        }
    }

    /// Generator with all built-in rules in their documented order.
    pub fn new(thresholds: InsightThresholds) -> Self {
        let mut generator = Self::empty(thresholds);
        generator.register(Box::new(LucidityRule));
        generator.register(Box::new(SleepQualityRule));
        generator.register(Box::new(DominantEmotionRule));
        generator.register(Box::new(SentimentBalanceRule));
        generator.register(Box::new(SleepTrendRule));
        generator
    }

    /// Append a rule; it runs after every rule registered before it.
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        tracing::debug!(rule = rule.name(), "Registered insight rule");
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Evaluate every rule against `summary`.
    pub fn generate(&self, summary: &StatisticsSummary, record_count: usize) -> InsightSet {
        let mut insights = Vec::new();

        for rule in &self.rules {
            let min = rule.min_records(&self.thresholds).max(1);
            if record_count < min {
                tracing::debug!(
                    rule = rule.name(),
                    record_count,
                    min_records = min,
                    "Skipping insight rule: not enough records"
                );
                continue;
            }
            if let Some(message) = rule.evaluate(summary, &self.thresholds) {
                insights.push(Insight {
                    kind: rule.kind(),
                    message,
                });
            }
        }

        tracing::debug!(
            record_count,
            emitted = insights.len(),
            "Generated insights"
        );
        InsightSet { insights }
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new(InsightThresholds::default())
    }
}

/// Generate insights with the built-in rules and default thresholds.
pub fn generate(summary: &StatisticsSummary, record_count: usize) -> InsightSet {
    InsightGenerator::default().generate(summary, record_count)
}

// ============================================
// Built-in rules
// ============================================

struct LucidityRule;

impl InsightRule for LucidityRule {
    fn name(&self) -> &str {
        "core.lucidity"
    }

    fn kind(&self) -> InsightKind {
        InsightKind::Lucidity
    }

    fn min_records(&self, t: &InsightThresholds) -> usize {
        t.lucid_min_records
    }

    fn evaluate(&self, s: &StatisticsSummary, t: &InsightThresholds) -> Option<String> {
        if s.lucid_percentage > t.lucid_high_pct {
            Some(format!(
                "You have a high rate of lucid dreaming ({:.0}% of dreams)! This suggests good dream awareness.",
                s.lucid_percentage
            ))
        } else if s.lucid_percentage < t.lucid_low_pct {
            Some(
                "Consider practicing lucid dreaming techniques, such as reality checks, to increase dream awareness."
                    .to_string(),
            )
        } else {
            None
        }
    }
}

struct SleepQualityRule;

impl InsightRule for SleepQualityRule {
    fn name(&self) -> &str {
        "core.sleep_quality"
    }

    fn kind(&self) -> InsightKind {
        InsightKind::SleepQuality
    }

    fn min_records(&self, t: &InsightThresholds) -> usize {
        t.sleep_min_records
    }

    fn evaluate(&self, s: &StatisticsSummary, t: &InsightThresholds) -> Option<String> {
        if s.mean_sleep_quality < t.sleep_low {
            Some(format!(
                "Your sleep quality averages {:.1}/10 and could be improved. Consider sleep hygiene practices.",
                s.mean_sleep_quality
            ))
        } else if s.mean_sleep_quality > t.sleep_high {
            Some(format!(
                "You maintain good sleep quality ({:.1}/10)! Keep up the healthy habits.",
                s.mean_sleep_quality
            ))
        } else {
            None
        }
    }
}

struct DominantEmotionRule;

impl InsightRule for DominantEmotionRule {
    fn name(&self) -> &str {
        "core.dominant_emotion"
    }

    fn kind(&self) -> InsightKind {
        InsightKind::DominantEmotion
    }

    fn min_records(&self, t: &InsightThresholds) -> usize {
        t.dominant_emotion_min_records
    }

    fn evaluate(&self, s: &StatisticsSummary, t: &InsightThresholds) -> Option<String> {
        let (emotion, _) = s.most_common_emotion()?;
        let share = s.dominant_emotion_percentage();
        if share > t.dominant_emotion_pct {
            Some(format!(
                "{} is your dominant dream emotion, present in {:.0}% of your dreams.",
                emotion, share
            ))
        } else {
            None
        }
    }
}

struct SentimentBalanceRule;

impl InsightRule for SentimentBalanceRule {
    fn name(&self) -> &str {
        "core.sentiment_balance"
    }

    fn kind(&self) -> InsightKind {
        InsightKind::Sentiment
    }

    fn min_records(&self, t: &InsightThresholds) -> usize {
        t.sentiment_min_records
    }

    fn evaluate(&self, s: &StatisticsSummary, t: &InsightThresholds) -> Option<String> {
        let positive = s.positive_percentage();
        if positive > t.positive_high_pct {
            Some(format!(
                "Your dreams tend to be positive ({:.0}%)! This may reflect good mental wellbeing.",
                positive
            ))
        } else if positive < t.positive_low_pct {
            Some(
                "Few of your dreams are positive. Consider activities that promote positive thoughts before bed."
                    .to_string(),
            )
        } else {
            None
        }
    }
}

struct SleepTrendRule;

impl InsightRule for SleepTrendRule {
    fn name(&self) -> &str {
        "core.sleep_trend"
    }

    fn kind(&self) -> InsightKind {
        InsightKind::SleepTrend
    }

    fn min_records(&self, t: &InsightThresholds) -> usize {
        t.sleep_trend_min_records
    }

    fn evaluate(&self, s: &StatisticsSummary, t: &InsightThresholds) -> Option<String> {
        let delta = s.sleep_quality_trend?;
        if delta >= t.sleep_trend_delta {
            Some(format!(
                "Your sleep quality is improving: recent dreams average {:.1} points higher than earlier ones.",
                delta
            ))
        } else if delta <= -t.sleep_trend_delta {
            Some(format!(
                "Your sleep quality is declining: recent dreams average {:.1} points lower than earlier ones.",
                -delta
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::frequency::FrequencyTable;
    use crate::analytics::summary::SentimentCounts;

    /// A summary that triggers no built-in rule.
    fn quiet_summary(total: usize) -> StatisticsSummary {
        let mut emotion_counts = FrequencyTable::new();
        // spread evenly so nothing dominates
        for i in 0..total {
            emotion_counts.add(format!("emotion-{}", i));
        }
        let positive = total / 2;
        StatisticsSummary {
            total,
            lucid_count: total / 10,
            lucid_percentage: 10.0,
            mean_sleep_quality: 6.0,
            emotion_counts,
            sentiment_counts: SentimentCounts {
                positive,
                negative: 0,
                neutral: total - positive,
            },
            tag_counts: Vec::new(),
            word_counts: Vec::new(),
            sleep_quality_trend: Some(0.0),
        }
    }

    #[test]
    fn test_default_rule_order() {
        let generator = InsightGenerator::default();
        assert_eq!(
            generator.rule_names(),
            vec![
                "core.lucidity",
                "core.sleep_quality",
                "core.dominant_emotion",
                "core.sentiment_balance",
                "core.sleep_trend",
            ]
        );
    }

    #[test]
    fn test_high_lucidity_fires() {
        let summary = StatisticsSummary {
            lucid_percentage: 25.0,
            ..quiet_summary(20)
        };
        let insights = generate(&summary, 20);
        assert!(insights.contains(InsightKind::Lucidity));
        assert!(insights.messages().iter().any(|m| m.contains("lucid")));
    }

    #[test]
    fn test_lucidity_at_five_percent_silent() {
        let summary = StatisticsSummary {
            lucid_percentage: 5.0,
            ..quiet_summary(20)
        };
        let insights = generate(&summary, 20);
        assert!(!insights.contains(InsightKind::Lucidity));
        assert!(!insights
            .messages()
            .iter()
            .any(|m| m.to_lowercase().contains("lucid")));
    }

    #[test]
    fn test_low_lucidity_suggests_practice() {
        let summary = StatisticsSummary {
            lucid_percentage: 0.0,
            ..quiet_summary(20)
        };
        assert!(generate(&summary, 20).contains(InsightKind::Lucidity));
    }

    #[test]
    fn test_nothing_fires_gives_empty_set() {
        let insights = generate(&quiet_summary(20), 20);
        assert!(insights.is_empty(), "{:?}", insights.messages());
    }

    #[test]
    fn test_sleep_rules() {
        let poor = StatisticsSummary {
            mean_sleep_quality: 4.0,
            ..quiet_summary(20)
        };
        let insights = generate(&poor, 20);
        assert_eq!(insights.len(), 1);
        assert!(insights.messages()[0].contains("could be improved"));

        let good = StatisticsSummary {
            mean_sleep_quality: 8.5,
            ..quiet_summary(20)
        };
        assert!(generate(&good, 20).messages()[0].contains("good sleep quality"));
    }

    #[test]
    fn test_dominant_emotion_needs_minimum_sample() {
        let mut emotion_counts = FrequencyTable::new();
        emotion_counts.add_n("Scared".to_string(), 2);
        let summary = StatisticsSummary {
            total: 2,
            emotion_counts,
            ..quiet_summary(2)
        };
        assert!(!generate(&summary, 2).contains(InsightKind::DominantEmotion));

        let mut emotion_counts = FrequencyTable::new();
        emotion_counts.add_n("Scared".to_string(), 3);
        emotion_counts.add_n("Happy".to_string(), 2);
        let summary = StatisticsSummary {
            total: 5,
            emotion_counts,
            ..quiet_summary(5)
        };
        let insights = generate(&summary, 5);
        assert!(insights.contains(InsightKind::DominantEmotion));
        assert!(insights.messages()[0].starts_with("Scared"));
    }

    #[test]
    fn test_sentiment_balance() {
        let mut summary = quiet_summary(10);
        summary.sentiment_counts = SentimentCounts {
            positive: 7,
            negative: 1,
            neutral: 2,
        };
        assert!(generate(&summary, 10).contains(InsightKind::Sentiment));

        summary.sentiment_counts = SentimentCounts {
            positive: 1,
            negative: 7,
            neutral: 2,
        };
        let insights = generate(&summary, 10);
        assert!(insights.messages()[0].contains("positive thoughts"));
    }

    #[test]
    fn test_sleep_trend_gated_by_sample_size() {
        let summary = StatisticsSummary {
            sleep_quality_trend: Some(2.0),
            ..quiet_summary(4)
        };
        assert!(!generate(&summary, 4).contains(InsightKind::SleepTrend));

        let summary = StatisticsSummary {
            sleep_quality_trend: Some(-2.0),
            ..quiet_summary(8)
        };
        let insights = generate(&summary, 8);
        assert!(insights.contains(InsightKind::SleepTrend));
        assert!(insights.messages()[0].contains("declining"));
    }

    #[test]
    fn test_multiple_rules_keep_evaluation_order() {
        let summary = StatisticsSummary {
            lucid_percentage: 50.0,
            mean_sleep_quality: 3.0,
            sleep_quality_trend: Some(1.5),
            ..quiet_summary(10)
        };
        let kinds: Vec<InsightKind> = generate(&summary, 10).iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::Lucidity,
                InsightKind::SleepQuality,
                InsightKind::SleepTrend
            ]
        );
    }

    #[test]
    fn test_zero_records_never_fire() {
        let summary = StatisticsSummary {
            lucid_percentage: 0.0,
            mean_sleep_quality: 0.0,
            ..quiet_summary(0)
        };
        assert!(generate(&summary, 0).is_empty());
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = InsightThresholds {
            lucid_high_pct: 30.0,
            ..Default::default()
        };
        let generator = InsightGenerator::new(thresholds);
        let summary = StatisticsSummary {
            lucid_percentage: 25.0,
            ..quiet_summary(20)
        };
        assert!(!generator.generate(&summary, 20).contains(InsightKind::Lucidity));
    }

    #[test]
    fn test_custom_rule() {
        struct Always;
        impl InsightRule for Always {
            fn name(&self) -> &str {
                "custom.always"
            }
            fn kind(&self) -> InsightKind {
                InsightKind::Sentiment
            }
            fn min_records(&self, _: &InsightThresholds) -> usize {
                0
            }
            fn evaluate(&self, _: &StatisticsSummary, _: &InsightThresholds) -> Option<String> {
                Some("hello".to_string())
            }
        }

        let mut generator = InsightGenerator::empty(InsightThresholds::default());
        generator.register(Box::new(Always));
        assert_eq!(generator.generate(&quiet_summary(3), 3).messages(), vec!["hello"]);
        // min_records of 0 is treated as 1: an empty journal gets nothing
        assert!(generator.generate(&quiet_summary(0), 0).is_empty());
    }
}
