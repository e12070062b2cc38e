//! Dream analysis engine
//!
//! Every function here is pure over an immutable `&[DreamRecord]` snapshot:
//! no I/O, no shared mutable state, safe to call from any thread.
//!
//! ## Data flow
//!
//! ```text
//! NewDream ──► SentimentClassifier ──► DreamRecord (sentiment fixed at creation)
//!
//! &[DreamRecord] ──► summarize ──► StatisticsSummary ──► InsightGenerator ──► InsightSet
//!                     (tokenize + FrequencyTable)
//! &[DreamRecord] ──► build_emotion_timeline / build_sleep_quality_series
//! ```
//!
//! [`AnalysisReport`] runs all of the above for one snapshot.

pub mod frequency;
pub mod insights;
pub mod report;
pub mod search;
pub mod sentiment;
pub mod summary;
pub mod themes;
pub mod tokenize;
pub mod trends;

pub use frequency::{count, top_n, FrequencyTable};
pub use insights::{generate, Insight, InsightGenerator, InsightKind, InsightRule, InsightSet};
pub use report::{AnalysisReport, RecentDream, EMPTY_JOURNAL_MESSAGE, NO_INSIGHTS_MESSAGE};
pub use search::search;
pub use sentiment::{LexiconScorer, SentimentClassifier, SentimentScorer};
pub use summary::{summarize, summarize_with, SentimentCounts, StatisticsSummary, SummaryOptions};
pub use themes::theme_weights;
pub use tokenize::{tokenize, Tokenizer, Tokens};
pub use trends::{build_emotion_timeline, build_sleep_quality_series, recent, TrendPoint};
