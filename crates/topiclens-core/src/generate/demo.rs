//! Keyword-only demo generation.

use crate::result::GenerationResult;
use crate::topic::visualization::demo_visualization;
use crate::topic::Topic;

/// Canned result for a question, chosen by keyword classification.
pub fn demo_result(question: &str) -> GenerationResult {
    let topic = Topic::classify(question);
    GenerationResult::new(
        topic.demo_answer().to_string(),
        demo_visualization(topic.name()),
        topic.topic_units(),
    )
}
