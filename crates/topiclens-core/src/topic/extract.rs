//! Topic/unit extraction from a model response.
//!
//! The model is asked for a bare `{"topic": ..., "units": [...]}` object but
//! frequently wraps it in markdown fences or surrounding prose. Anything that
//! cannot be coerced into the expected shape falls back to the keyword
//! classifier applied to the question.

use serde_json::Value;

use super::{fallback_topic_units, TopicUnits};

/// Upper bound on units carried in a result.
pub const MAX_UNITS: usize = 6;

/// Outcome of topic extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicExtraction {
    /// The model returned a usable object.
    Parsed(TopicUnits),
    /// The keyword classifier was used instead.
    Fallback {
        topic_units: TopicUnits,
        reason: String,
    },
}

impl TopicExtraction {
    /// Parse a raw model response, falling back to the question's keywords.
    pub fn from_response(raw: &str, question: &str) -> Self {
        match parse_topic_json(raw) {
            Ok(topic_units) => Self::Parsed(topic_units),
            Err(reason) => Self::fallback(question, reason),
        }
    }

    /// Keyword-derived outcome for a question.
    pub fn fallback(question: &str, reason: impl Into<String>) -> Self {
        Self::Fallback {
            topic_units: fallback_topic_units(question),
            reason: reason.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn topic_units(&self) -> &TopicUnits {
        match self {
            Self::Parsed(tu) => tu,
            Self::Fallback { topic_units, .. } => topic_units,
        }
    }

    pub fn into_topic_units(self) -> TopicUnits {
        match self {
            Self::Parsed(tu) => tu,
            Self::Fallback { topic_units, .. } => topic_units,
        }
    }
}

/// Parse `{topic, units}` out of free-form model text.
pub fn parse_topic_json(raw: &str) -> Result<TopicUnits, String> {
    let cleaned = strip_code_fences(raw);
    let candidate = first_object_span(&cleaned).unwrap_or(cleaned.trim());

    let value: Value =
        serde_json::from_str(candidate).map_err(|e| format!("invalid JSON: {}", e))?;

    let obj = value
        .as_object()
        .ok_or_else(|| "response is not a JSON object".to_string())?;

    let topic = obj
        .get("topic")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "missing or empty 'topic'".to_string())?;

    let units = obj
        .get("units")
        .and_then(Value::as_array)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| "missing or empty 'units'".to_string())?;

    Ok(TopicUnits {
        topic: topic.to_string(),
        units: units.iter().take(MAX_UNITS).map(coerce_unit).collect(),
    })
}

fn coerce_unit(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Remove markdown code fence markers (```json and ```).
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```JSON", "").replace("```", "")
}

/// Span from the first `{` to the last `}`.
fn first_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
