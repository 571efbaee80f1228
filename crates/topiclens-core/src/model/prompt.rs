//! Fixed prompts sent to the model.

/// Prompt for the answer generation step.
pub fn answer_prompt(question: &str) -> String {
    format!(
        r#"You are a helpful educational assistant. A student has asked the following question and attached an image.

Question: "{question}"

Instructions:
- If the image is relevant to the question, use what it shows (labels, diagrams, units, values) in your answer.
- If the image is not relevant, say so briefly, explain why, and answer the question on its own.
- Explain step by step in clear, student-friendly language.
- Use short paragraphs. Headings with # and bullet points with - are welcome.
- Highlight key terms with **bold**."#
    )
}

/// Prompt for the topic/unit extraction step.
pub fn topic_prompt(question: &str) -> String {
    format!(
        r#"Based on the question and the image, identify the main academic topic and 3 to 6 related units or subtopics.

Question: "{question}"

Return ONLY a valid JSON object (no markdown, no explanation) with this exact structure:
{{"topic": "Topic Name", "units": ["Unit 1", "Unit 2", "Unit 3"]}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_question() {
        assert!(answer_prompt("What is torque?").contains("\"What is torque?\""));
        let p = topic_prompt("What is torque?");
        assert!(p.contains("\"What is torque?\""));
        assert!(p.contains(r#"{"topic": "Topic Name""#));
    }
}
