//! Result domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TopicLensError, TopicLensResult};
use crate::topic::TopicUnits;

/// The record produced for every answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub answer: String,
    pub visualization: String,
    pub topic: String,
    pub units: Vec<String>,
}

impl GenerationResult {
    /// Assemble a result from an answer, a visualization URL and resolved units.
    pub fn new(answer: String, visualization: String, topic_units: TopicUnits) -> Self {
        Self {
            answer,
            visualization,
            topic: topic_units.topic,
            units: topic_units.units,
        }
    }
}

/// Request facts echoed back by the live endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub image_size: usize,
    pub image_type: String,
    pub question_length: usize,
    pub timestamp: String,
}

/// Success envelope of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: GenerationResult,
    pub metadata: ResponseMetadata,
}

impl LiveResponse {
    pub fn new(result: GenerationResult, metadata: ResponseMetadata) -> Self {
        Self {
            success: true,
            result,
            metadata,
        }
    }
}

/// A result as persisted by the client.
///
/// Fields beyond the core result (`success`, `metadata`, ...) are kept
/// verbatim in `extra` so a stored body round-trips unchanged apart from
/// `originalQuestion` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    #[serde(flatten)]
    pub result: GenerationResult,
    pub original_question: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredResult {
    /// Build a stored result from a successful endpoint body.
    ///
    /// The body must carry a non-empty `answer` and `topic`.
    pub fn from_response(body: Value, original_question: &str) -> TopicLensResult<Self> {
        let Value::Object(mut fields) = body else {
            return Err(TopicLensError::validation("response body is not a JSON object"));
        };

        // Any previously stored augmentation is replaced.
        fields.remove("originalQuestion");
        fields.remove("timestamp");

        let result: GenerationResult = serde_json::from_value(Value::Object(fields.clone()))?;
        if result.answer.trim().is_empty() || result.topic.trim().is_empty() {
            return Err(TopicLensError::validation(
                "Invalid response format from server",
            ));
        }
        for key in ["answer", "visualization", "topic", "units"] {
            fields.remove(key);
        }

        Ok(Self {
            result,
            original_question: original_question.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            extra: fields,
        })
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
