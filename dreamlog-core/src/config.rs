//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/dreamlog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/dreamlog/` (~/.config/dreamlog/)
//! - Data: `$XDG_DATA_HOME/dreamlog/` (~/.local/share/dreamlog/)
//! - State/Logs: `$XDG_STATE_HOME/dreamlog/` (~/.local/state/dreamlog/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Journal storage location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Summary sizes (top-N tables)
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Insight rule thresholds
    #[serde(default)]
    pub insights: InsightThresholds,

    /// Emotion vocabulary
    #[serde(default)]
    pub emotions: EmotionConfig,

    /// Sentiment lexicon overrides
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

/// Where the journal lives on disk
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StorageConfig {
    /// Override path for the JSON journal file
    pub path: Option<PathBuf>,
}

/// Sizes of the frequency tables produced by an analysis
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Number of tags kept in the tag table
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,

    /// Number of words kept in the description word table
    #[serde(default = "default_top_words")]
    pub top_words: usize,

    /// Number of words handed to a word-cloud renderer
    #[serde(default = "default_theme_words")]
    pub theme_words: usize,

    /// Number of recent dreams listed in reports
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_tags: default_top_tags(),
            top_words: default_top_words(),
            theme_words: default_theme_words(),
            recent_count: default_recent_count(),
        }
    }
}

fn default_top_tags() -> usize {
    5
}

fn default_top_words() -> usize {
    10
}

fn default_theme_words() -> usize {
    100
}

fn default_recent_count() -> usize {
    5
}

/// Thresholds and minimum sample sizes for the insight rules.
///
/// Percentages are on a 0-100 scale, sleep quality on the 1-10 scale.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InsightThresholds {
    /// Lucid percentage above which lucidity is called out as high
    #[serde(default = "default_lucid_high_pct")]
    pub lucid_high_pct: f64,
    /// Lucid percentage below which lucid practice is suggested
    #[serde(default = "default_lucid_low_pct")]
    pub lucid_low_pct: f64,
    #[serde(default = "default_one")]
    pub lucid_min_records: usize,

    /// Mean sleep quality below which a concern is raised
    #[serde(default = "default_sleep_low")]
    pub sleep_low: f64,
    /// Mean sleep quality above which good sleep is acknowledged
    #[serde(default = "default_sleep_high")]
    pub sleep_high: f64,
    #[serde(default = "default_one")]
    pub sleep_min_records: usize,

    /// Share of records (percent) the top emotion needs to be "dominant"
    #[serde(default = "default_dominant_emotion_pct")]
    pub dominant_emotion_pct: f64,
    #[serde(default = "default_dominant_emotion_min_records")]
    pub dominant_emotion_min_records: usize,

    /// Positive-dream percentage above which the journal reads as positive
    #[serde(default = "default_positive_high_pct")]
    pub positive_high_pct: f64,
    /// Positive-dream percentage below which a wind-down tip is offered
    #[serde(default = "default_positive_low_pct")]
    pub positive_low_pct: f64,
    #[serde(default = "default_one")]
    pub sentiment_min_records: usize,

    /// Absolute change in mean sleep quality (newer half vs older half)
    /// that counts as a trend
    #[serde(default = "default_sleep_trend_delta")]
    pub sleep_trend_delta: f64,
    #[serde(default = "default_sleep_trend_min_records")]
    pub sleep_trend_min_records: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            lucid_high_pct: default_lucid_high_pct(),
            lucid_low_pct: default_lucid_low_pct(),
            lucid_min_records: default_one(),
            sleep_low: default_sleep_low(),
            sleep_high: default_sleep_high(),
            sleep_min_records: default_one(),
            dominant_emotion_pct: default_dominant_emotion_pct(),
            dominant_emotion_min_records: default_dominant_emotion_min_records(),
            positive_high_pct: default_positive_high_pct(),
            positive_low_pct: default_positive_low_pct(),
            sentiment_min_records: default_one(),
            sleep_trend_delta: default_sleep_trend_delta(),
            sleep_trend_min_records: default_sleep_trend_min_records(),
        }
    }
}

impl InsightThresholds {
    /// Validate thresholds, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        let pct_fields = [
            ("insights.lucid_high_pct", self.lucid_high_pct),
            ("insights.lucid_low_pct", self.lucid_low_pct),
            ("insights.dominant_emotion_pct", self.dominant_emotion_pct),
            ("insights.positive_high_pct", self.positive_high_pct),
            ("insights.positive_low_pct", self.positive_low_pct),
        ];
        for (name, value) in pct_fields {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("insights.sleep_low", self.sleep_low),
            ("insights.sleep_high", self.sleep_high),
        ] {
            if !(1.0..=10.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be between 1 and 10, got {}",
                    name, value
                )));
            }
        }

        if !self.sleep_trend_delta.is_finite() || self.sleep_trend_delta <= 0.0 {
            return Err(Error::Config(
                "insights.sleep_trend_delta must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_one() -> usize {
    1
}

fn default_lucid_high_pct() -> f64 {
    20.0
}

fn default_lucid_low_pct() -> f64 {
    5.0
}

fn default_sleep_low() -> f64 {
    5.0
}

fn default_sleep_high() -> f64 {
    7.0
}

fn default_dominant_emotion_pct() -> f64 {
    40.0
}

fn default_dominant_emotion_min_records() -> usize {
    3
}

fn default_positive_high_pct() -> f64 {
    60.0
}

fn default_positive_low_pct() -> f64 {
    30.0
}

fn default_sleep_trend_delta() -> f64 {
    1.0
}

fn default_sleep_trend_min_records() -> usize {
    6
}

/// The open emotion vocabulary offered to the input layer
#[derive(Debug, Deserialize, Clone)]
pub struct EmotionConfig {
    #[serde(default = "default_emotion_labels")]
    pub labels: Vec<String>,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            labels: default_emotion_labels(),
        }
    }
}

impl EmotionConfig {
    /// Look up a label case-insensitively, returning its configured spelling.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        let wanted = label.trim();
        self.labels
            .iter()
            .find(|l| l.eq_ignore_ascii_case(wanted))
            .map(String::as_str)
    }
}

fn default_emotion_labels() -> Vec<String> {
    [
        "Happy",
        "Scared",
        "Confused",
        "Excited",
        "Sad",
        "Anxious",
        "Peaceful",
        "Angry",
        "Curious",
        "Nostalgic",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Sentiment scoring configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct SentimentConfig {
    /// Extra or replacement lexicon entries (word -> valence, roughly -4..4)
    #[serde(default)]
    pub lexicon: HashMap<String, f64>,
}

impl SentimentConfig {
    /// Reject non-finite valences and keys that collide once lower-cased.
    pub fn validate(&self) -> Result<()> {
        let mut keys: Vec<&String> = self.lexicon.keys().collect();
        keys.sort();

        let mut seen: HashMap<String, &String> = HashMap::new();
        for key in keys {
            let value = self.lexicon[key];
            if !value.is_finite() {
                return Err(Error::Config(format!(
                    "sentiment.lexicon entry {:?} is not a finite number ({})",
                    key, value
                )));
            }
            let folded = key.trim().to_lowercase();
            if let Some(previous) = seen.insert(folded, key) {
                return Err(Error::Config(format!(
                    "sentiment.lexicon entries {:?} and {:?} name the same word",
                    previous, key
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        if self.emotions.labels.iter().all(|l| l.trim().is_empty()) {
            return Err(Error::Config(
                "emotions.labels must contain at least one label".to_string(),
            ));
        }
        self.sentiment.validate()?;
        self.insights.validate()
    }

    /// Returns the journal file in use: the configured override or the default
    pub fn journal_path(&self) -> PathBuf {
        self.storage
            .path
            .clone()
            .unwrap_or_else(Self::default_journal_path)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/dreamlog/config.toml` (~/.config/dreamlog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("dreamlog").join("config.toml")
    }

    /// Returns the data directory path (for the journal)
    ///
    /// `$XDG_DATA_HOME/dreamlog/` (~/.local/share/dreamlog/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("dreamlog")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/dreamlog/` (~/.local/state/dreamlog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("dreamlog")
    }

    /// `$XDG_DATA_HOME/dreamlog/dreams.json`
    pub fn default_journal_path() -> PathBuf {
        Self::data_dir().join("dreams.json")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/dreamlog/dreamlog.log` (~/.local/state/dreamlog/dreamlog.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("dreamlog.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.analysis.top_tags, 5);
        assert_eq!(config.analysis.top_words, 10);
        assert_eq!(config.insights.lucid_high_pct, 20.0);
        assert_eq!(config.insights.dominant_emotion_pct, 40.0);
        assert_eq!(config.emotions.labels.len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[logging]
level = "debug"

[storage]
path = "/tmp/dreams.json"

[analysis]
top_words = 20

[insights]
lucid_high_pct = 35.0
sleep_trend_min_records = 10

[emotions]
labels = ["Happy", "Sad", "Awe"]

[sentiment.lexicon]
flying = 2.0
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.journal_path(), PathBuf::from("/tmp/dreams.json"));
        assert_eq!(config.analysis.top_words, 20);
        assert_eq!(config.analysis.top_tags, 5);
        assert_eq!(config.insights.lucid_high_pct, 35.0);
        assert_eq!(config.insights.lucid_low_pct, 5.0);
        assert_eq!(config.insights.sleep_trend_min_records, 10);
        assert_eq!(config.emotions.resolve("awe"), Some("Awe"));
        assert_eq!(config.sentiment.lexicon.get("flying"), Some(&2.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_emotion_resolve() {
        let emotions = EmotionConfig::default();
        assert_eq!(emotions.resolve("  scared "), Some("Scared"));
        assert_eq!(emotions.resolve("Bored"), None);
    }

    #[test]
    fn test_threshold_validation() {
        let thresholds = InsightThresholds {
            lucid_high_pct: 120.0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());

        let thresholds = InsightThresholds {
            sleep_low: 0.0,
            ..Default::default()
        };
        assert!(thresholds.validate().is_err());

        let config = Config {
            emotions: EmotionConfig { labels: vec![] },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lexicon_keys_colliding_by_case_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sentiment.lexicon]\nFlying = 3.0\nflying = -3.0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        let mut lexicon = HashMap::new();
        lexicon.insert("flying".to_string(), 3.0);
        lexicon.insert("falling".to_string(), -1.0);
        assert!(SentimentConfig { lexicon }.validate().is_ok());
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[insights\nlucid_high_pct = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
