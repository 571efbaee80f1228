//! Gemini `generateContent` client.
//!
//! Sends a text prompt plus an inline base64 image and returns the first
//! candidate's first text part.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerativeModel, ImageInput, ModelError};

/// Default Gemini API base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default vision-capable model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini generative language API.
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiClient {
    /// Create a new client with the given API key and model.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_API_BASE)
    }

    /// Create a client against a non-default API base (proxies, test servers).
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, image: &ImageInput) -> Result<Option<String>, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: prompt.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
        };

        debug!(model = %self.model, "Calling Gemini generateContent");
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_http_error(status, &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Other(format!("Failed to parse Gemini response: {}", e)))?;

        extract_text(body)
    }
}

/// Map a non-success HTTP response to a failure category.
fn classify_http_error(status: StatusCode, body: &str) -> ModelError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    let message = format!("Gemini API error ({}): {}", status, message);

    match status {
        StatusCode::NOT_FOUND => ModelError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => ModelError::Quota(message),
        _ => ModelError::from_message(message),
    }
}

/// First candidate's first text part, surfacing safety blocks as errors.
fn extract_text(body: GenerateContentResponse) -> Result<Option<String>, ModelError> {
    if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ModelError::SafetyBlocked(reason));
    }

    let Some(candidate) = body.candidates.into_iter().next() else {
        return Ok(None);
    };

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);

    if text.is_none() && candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ModelError::SafetyBlocked("SAFETY".to_string()));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_first_text_part() {
        let body = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_text(body), Ok(Some("first".to_string())));
    }

    #[test]
    fn test_extract_no_candidates() {
        assert_eq!(extract_text(parse(r#"{}"#)), Ok(None));
    }

    #[test]
    fn test_prompt_block_is_safety_error() {
        let body = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(extract_text(body), Err(ModelError::SafetyBlocked(_))));
    }

    #[test]
    fn test_candidate_safety_finish() {
        let body = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(matches!(extract_text(body), Err(ModelError::SafetyBlocked(_))));
    }

    #[test]
    fn test_classify_http_errors() {
        let body = r#"{"error":{"code":404,"message":"models/x is not found","status":"NOT_FOUND"}}"#;
        assert!(matches!(
            classify_http_error(StatusCode::NOT_FOUND, body),
            ModelError::NotFound(_)
        ));
        assert!(matches!(
            classify_http_error(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ModelError::Quota(_)
        ));
        assert!(matches!(
            classify_http_error(StatusCode::BAD_REQUEST, r#"{"error":{"message":"API key not valid"}}"#),
            ModelError::Other(_)
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "hi".into() },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "image/png".into(),
                            data: "AAAA".into(),
                        },
                    },
                ],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/png");
    }

    #[test]
    fn test_endpoint_shape() {
        let client = GeminiClient::with_base_url("k", "gemini-1.5-flash", "http://localhost:9/v1beta/");
        assert_eq!(
            client.endpoint(),
            "http://localhost:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
