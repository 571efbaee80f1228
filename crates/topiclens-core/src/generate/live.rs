//! Live generation: answer, then topic/units, against a generative model.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::model::prompt::{answer_prompt, topic_prompt};
use crate::model::{with_timeout, GenerativeModel, ImageInput, ModelError};
use crate::result::GenerationResult;
use crate::topic::extract::TopicExtraction;
use crate::topic::visualization::live_visualization;

/// Placeholder some models emit instead of an answer.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer generated.";

/// Answers shorter than this are treated as missing.
pub const MIN_ANSWER_CHARS: usize = 10;

/// Substituted when the model returns no usable answer.
pub const APOLOGY_ANSWER: &str = "I apologize, but I couldn't generate a proper answer for \
    your question. Please try rephrasing it or uploading a clearer image.";

/// Substituted when the answer call fails for an unclassified reason.
pub const GENERIC_FAILURE_ANSWER: &str = "I apologize, but I encountered an error while \
    processing your question and image. Please try again in a moment.";

/// Per-call time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveTimeouts {
    pub answer: Duration,
    pub topic: Duration,
}

impl Default for LiveTimeouts {
    fn default() -> Self {
        Self {
            answer: Duration::from_secs(30),
            topic: Duration::from_secs(15),
        }
    }
}

/// Run both model calls and assemble the result.
///
/// Answer failures classified by [`ModelError::aborts_request`] are returned
/// as errors; any other answer failure is replaced by a filler answer and
/// topic extraction still runs. Topic extraction never fails.
pub async fn generate_live(
    model: &dyn GenerativeModel,
    question: &str,
    image: &ImageInput,
    timeouts: LiveTimeouts,
) -> Result<GenerationResult, ModelError> {
    let answer = generate_answer(model, question, image, timeouts.answer).await?;
    let extraction = extract_topic(model, question, image, timeouts.topic).await;

    if let TopicExtraction::Fallback { reason, .. } = &extraction {
        info!(reason = %reason, "Topic extraction fell back to keyword classification");
    }

    let topic_units = extraction.into_topic_units();
    let visualization = live_visualization(&topic_units.topic);
    Ok(GenerationResult::new(answer, visualization, topic_units))
}

/// First model call: the answer text.
pub async fn generate_answer(
    model: &dyn GenerativeModel,
    question: &str,
    image: &ImageInput,
    limit: Duration,
) -> Result<String, ModelError> {
    let prompt = answer_prompt(question);
    match with_timeout(limit, model.generate(&prompt, image)).await {
        Ok(text) => Ok(normalize_answer(text)),
        Err(e) if e.aborts_request() => {
            warn!(error = %e, "Answer generation failed");
            Err(e)
        }
        Err(e) => {
            warn!(error = %e, "Answer generation failed, substituting filler answer");
            Ok(GENERIC_FAILURE_ANSWER.to_string())
        }
    }
}

/// Second model call: topic and units, with keyword fallback.
pub async fn extract_topic(
    model: &dyn GenerativeModel,
    question: &str,
    image: &ImageInput,
    limit: Duration,
) -> TopicExtraction {
    let prompt = topic_prompt(question);
    match with_timeout(limit, model.generate(&prompt, image)).await {
        Ok(Some(text)) => {
            debug!(len = text.len(), "Topic extraction response received");
            TopicExtraction::from_response(&text, question)
        }
        Ok(None) => TopicExtraction::fallback(question, "empty model response"),
        Err(e) => TopicExtraction::fallback(question, e.to_string()),
    }
}

/// Replace missing, placeholder or too-short answers with an apology.
fn normalize_answer(text: Option<String>) -> String {
    match text.map(|t| t.trim().to_string()) {
        Some(t) if t != NO_ANSWER_PLACEHOLDER && t.chars().count() >= MIN_ANSWER_CHARS => t,
        _ => APOLOGY_ANSWER.to_string(),
    }
}
