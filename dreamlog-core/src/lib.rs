//! # dreamlog-core
//!
//! Core library for dreamlog - a personal dream journal with analytics.
//!
//! This library provides:
//! - Domain types for dream records
//! - The dream analysis engine (sentiment, frequencies, statistics, trends, insights)
//! - JSON journal storage
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use dreamlog_core::analytics::{generate, summarize, SentimentClassifier};
//! use dreamlog_core::{DreamStore, JsonFileStore, NewDream, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let store = JsonFileStore::new(config.journal_path());
//! let classifier = SentimentClassifier::from_config(&config.sentiment);
//!
//! dreamlog_core::store::add_dream(
//!     &store,
//!     NewDream::new("Flying", "Soaring over a bright city", "Excited").lucid(true),
//!     &classifier,
//! )
//! .expect("failed to save dream");
//!
//! let records = store.load_all().expect("failed to load journal");
//! let summary = summarize(&records);
//! for insight in &generate(&summary, records.len()) {
//!     println!("{}", insight.message);
//! }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use store::{DreamStore, JsonFileStore};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod store;
pub mod types;
