//! Error types for dreamlog-core

use thiserror::Error;

/// Main error type for the dreamlog-core library
///
/// The analysis engine itself is total and never produces these; they come
/// from storage, configuration and record creation.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A dream entry failed input validation
    #[error("invalid dream entry: {0}")]
    Validation(String),

    /// Dream not found
    #[error("dream not found: {0}")]
    DreamNotFound(String),
}

/// Result type alias for dreamlog-core
pub type Result<T> = std::result::Result<T, Error>;
