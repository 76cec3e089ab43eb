//! Error types for the Ponder analysis core
//!
//! This module provides structured error definitions using thiserror and
//! converts anyhow errors at the binary edge.

use thiserror::Error;

/// Main error type for Ponder operations
#[derive(Error, Debug)]
pub enum PonderError {
    /// LLM API request failed
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Taxonomy file could not be parsed or failed validation
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored value snapshot is not a name -> integer mapping
    #[error("Invalid value snapshot: {0}")]
    InvalidSnapshot(String),

    /// Conversation handed to the coach is not answerable
    #[error("Invalid conversation: {0}")]
    InvalidConversation(String),

    /// Tagging failed
    #[error(transparent)]
    Tagging(#[from] TaggingError),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Failures of a tagging strategy.
///
/// Only the remote strategy produces these. Callers are expected to treat
/// both variants the same way: retry, degrade to local tagging, or report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaggingError {
    /// Capability not configured, transport failure, timeout or unreadable output
    #[error("Tagging unavailable: {0}")]
    Unavailable(String),

    /// Response parsed but a required field is missing or malformed
    #[error("Invalid tagging response: {0}")]
    InvalidResponseShape(String),
}

impl TaggingError {
    /// Whether the tagging capability failed to produce usable tags.
    ///
    /// Always true: every variant means no tags were produced and nothing
    /// was written to the entry.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            TaggingError::Unavailable(_) | TaggingError::InvalidResponseShape(_)
        )
    }
}

/// Result type alias for Ponder operations
pub type Result<T> = std::result::Result<T, PonderError>;

/// Result type alias for tagging strategies
pub type TaggingResult<T> = std::result::Result<T, TaggingError>;

/// Convert anyhow::Error to PonderError
impl From<anyhow::Error> for PonderError {
    fn from(err: anyhow::Error) -> Self {
        PonderError::Other(err.to_string())
    }
}
