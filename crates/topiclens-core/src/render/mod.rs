//! Result rendering model.
//!
//! Turns a stored result into the four named views (Answer, Visualization,
//! Key Points, Insights). Output backends (terminal, HTML) only walk the
//! structures built here.

pub mod html;
pub mod markup;

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::error::TopicLensError;
use crate::result::StoredResult;
use markup::{parse_answer, Paragraph};

/// Range of the displayed comprehension level, inclusive.
pub const COMPREHENSION_RANGE: std::ops::RangeInclusive<u8> = 70..=100;

/// The named result views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Answer,
    Visualization,
    KeyPoints,
    Insights,
}

impl View {
    /// All views, in navigation order.
    pub const ALL: [View; 4] = [View::Answer, View::Visualization, View::KeyPoints, View::Insights];

    pub fn title(&self) -> &'static str {
        match self {
            View::Answer => "Answer",
            View::Visualization => "Visualization",
            View::KeyPoints => "Key Points",
            View::Insights => "Insights",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for View {
    type Err = TopicLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "answer" => Ok(View::Answer),
            "visualization" | "visualisation" => Ok(View::Visualization),
            "key-points" | "keypoints" => Ok(View::KeyPoints),
            "insights" => Ok(View::Insights),
            other => Err(TopicLensError::validation(format!("unknown view '{}'", other))),
        }
    }
}

/// A stored result prepared for display.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub question: String,
    pub timestamp: String,
    pub topic: String,
    pub units: Vec<String>,
    pub visualization: String,
    pub paragraphs: Vec<Paragraph>,
    pub insights: Vec<String>,
    /// Cosmetic score drawn on construction; not derived from the result.
    pub comprehension_level: u8,
}

impl ResultView {
    pub fn new(stored: &StoredResult) -> Self {
        Self::with_comprehension(stored, rand::thread_rng().gen_range(COMPREHENSION_RANGE))
    }

    /// Build with a fixed comprehension level.
    pub fn with_comprehension(stored: &StoredResult, comprehension_level: u8) -> Self {
        let result = &stored.result;
        Self {
            question: stored.original_question.clone(),
            timestamp: stored.timestamp.clone(),
            topic: result.topic.clone(),
            units: result.units.clone(),
            visualization: result.visualization.clone(),
            paragraphs: parse_answer(&result.answer),
            insights: insights(&result.topic, &result.units),
            comprehension_level,
        }
    }
}

/// Three templated study tips for a topic and its first three units.
pub fn insights(topic: &str, units: &[String]) -> Vec<String> {
    let unit = |i: usize| units.get(i).map(String::as_str).unwrap_or(topic);
    vec![
        format!(
            "Start with {} - it is the foundation most {} questions build on.",
            unit(0),
            topic
        ),
        format!(
            "Connect {} with {}: explaining how they relate is the fastest way to spot gaps.",
            unit(1),
            unit(2)
        ),
        format!(
            "Revisit the image and label where each idea from {} appears before moving on.",
            topic
        ),
    ]
}
