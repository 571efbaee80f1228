//! HTTP error responses for the live endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use topiclens_core::model::ModelError;
use topiclens_core::TopicLensError;

/// An error rendered as `{ success: false, error, code, timestamp }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    /// Diagnostic detail; only sent in development.
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    code: &'a str,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn missing_api_key() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CONFIG_ERROR",
            "Server configuration error: API key not configured",
        )
    }

    /// Classify an error that escaped the handler by its wording.
    ///
    /// Network failures map to 503, JSON failures to 400, timeouts to 408,
    /// and everything else to 500.
    pub fn unexpected(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        let (status, code, text) = if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("fetch")
        {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "NETWORK_ERROR",
                "Network error: unable to reach the AI service",
            )
        } else if message.contains("JSON") {
            (StatusCode::BAD_REQUEST, "INVALID_JSON", "Invalid request format")
        } else if lower.contains("timeout") || lower.contains("timed out") {
            (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", "Request timeout. Please try again.")
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An unexpected error occurred",
            )
        };
        Self::new(status, code, text).with_details(message)
    }

    /// Render, including `details` only when `include_details` is set.
    pub fn into_response_with(self, include_details: bool) -> Response {
        let body = ErrorBody {
            success: false,
            error: &self.message,
            code: self.code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            details: self.details.as_deref().filter(|_| include_details),
        };
        (self.status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        let details = err.to_string();
        let api = match err {
            ModelError::NotFound(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_NOT_FOUND",
                "AI model not available. Please try again later.",
            ),
            ModelError::Quota(_) => Self::new(
                StatusCode::TOO_MANY_REQUESTS,
                "QUOTA_EXCEEDED",
                "API quota exceeded. Please try again later.",
            ),
            ModelError::Timeout(_) => Self::new(
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                "Request timeout. The AI service took too long to respond.",
            ),
            ModelError::SafetyBlocked(_) => Self::bad_request(
                "CONTENT_BLOCKED",
                "Content was blocked by safety filters. Please try a different question or image.",
            ),
            ModelError::Transport(msg) => return Self::unexpected(format!("network error: {}", msg)),
            ModelError::Other(msg) => return Self::unexpected(msg),
        };
        api.with_details(details)
    }
}

impl From<TopicLensError> for ApiError {
    fn from(err: TopicLensError) -> Self {
        match &err {
            TopicLensError::ValidationError(msg) => Self::bad_request("INVALID_REQUEST", msg.clone()),
            TopicLensError::UnsupportedMediaType(_) => Self::bad_request(
                "INVALID_FILE_TYPE",
                "Invalid file type. Please upload an image.",
            ),
            TopicLensError::ImageTooLarge { .. } => Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                "Image file too large. Maximum size is 10MB.",
            ),
            TopicLensError::Config(msg) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone())
            }
            _ => Self::unexpected(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_model_error_statuses() {
        let cases = [
            (ModelError::NotFound("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ModelError::Quota("x".into()), StatusCode::TOO_MANY_REQUESTS),
            (ModelError::Timeout(Duration::from_secs(30)), StatusCode::REQUEST_TIMEOUT),
            (ModelError::SafetyBlocked("x".into()), StatusCode::BAD_REQUEST),
            (ModelError::Transport("reset".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ModelError::Other("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_unexpected_classification() {
        assert_eq!(ApiError::unexpected("expected value at line 1: JSON").status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unexpected("operation timed out").status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(ApiError::unexpected("connection refused").status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::unexpected("disk on fire").status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_core_error_statuses() {
        assert_eq!(
            ApiError::from(TopicLensError::ImageTooLarge { size: 2, limit: 1 }).status,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::from(TopicLensError::UnsupportedMediaType("text/plain".into())).code,
            "INVALID_FILE_TYPE"
        );
    }

    #[tokio::test]
    async fn test_details_only_when_requested() {
        let err = ApiError::unexpected("disk on fire");

        let body = axum::body::to_bytes(err.clone().into_response_with(false).into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], "INTERNAL_ERROR");
        assert!(value["timestamp"].is_string());
        assert!(value.get("details").is_none());

        let body = axum::body::to_bytes(err.into_response_with(true).into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["details"], "disk on fire");
    }
}
