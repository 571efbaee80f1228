//! Generative model capability.
//!
//! Generation logic talks to the model through [`GenerativeModel`] so the
//! hosted provider can be swapped for a stub in tests.

pub mod gemini;
pub mod prompt;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::GeminiClient;

/// Base64-encoded image sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: String,
}

impl ImageInput {
    /// Encode raw image bytes.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        use base64::Engine;
        Self {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// Failure categories of a model call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Content blocked by safety filters: {0}")]
    SafetyBlocked(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Model error: {0}")]
    Other(String),
}

impl ModelError {
    /// Classify a provider error message by its wording.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("not found") || lower.contains("404") {
            Self::NotFound(message)
        } else if lower.contains("quota") || lower.contains("rate limit") || lower.contains("429") {
            Self::Quota(message)
        } else if lower.contains("safety") || lower.contains("blocked") {
            Self::SafetyBlocked(message)
        } else {
            Self::Other(message)
        }
    }

    /// Whether this failure aborts a request instead of degrading to a
    /// filler answer.
    pub fn aborts_request(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Quota(_) | Self::Timeout(_) | Self::SafetyBlocked(_)
        )
    }
}

/// A text+image → text generative model.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one prompt against the image and return the first candidate's
    /// first text part, if any.
    async fn generate(&self, prompt: &str, image: &ImageInput) -> Result<Option<String>, ModelError>;
}

/// Race a model call against a timer.
///
/// On expiry the call future is dropped and its result discarded.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ModelError>
where
    F: Future<Output = Result<T, ModelError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ModelError::Timeout(limit))?
}
