//! Centralized error types for TopicLens.

use thiserror::Error;

/// Main error type for TopicLens core operations.
#[derive(Error, Debug)]
pub enum TopicLensError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Image too large: {size} bytes exceeds the limit of {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },

    #[error("Unsupported file type '{0}': only images are accepted")]
    UnsupportedMediaType(String),

    #[error("Stored result not found: {0}")]
    ResultNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for TopicLens operations.
pub type TopicLensResult<T> = Result<T, TopicLensError>;

impl TopicLensError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
