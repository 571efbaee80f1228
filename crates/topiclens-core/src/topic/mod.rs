//! Topic classification.
//!
//! The demo endpoint and the live endpoint's fallback path both resolve a
//! topic from the question text alone, through [`Topic::classify`]. Keeping
//! a single keyword table guarantees both paths agree for the same question.

pub mod extract;
pub mod visualization;

use serde::{Deserialize, Serialize};

/// The canned subject areas known without a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    GeneralKnowledge,
}

/// A resolved topic with its related units, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicUnits {
    pub topic: String,
    pub units: Vec<String>,
}

const MATH_KEYWORDS: &[&str] = &[
    "math", "equation", "algebra", "geometry", "calculus", "solve", "formula",
    "integral", "derivative", "triangle", "fraction",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "physics", "force", "energy", "motion", "velocity", "acceleration",
    "gravity", "circuit", "momentum", "wave",
];

const CHEMISTRY_KEYWORDS: &[&str] = &[
    "chemistry", "chemical", "molecule", "atom", "reaction", "element",
    "compound", "bond", "acid",
];

const BIOLOGY_KEYWORDS: &[&str] = &[
    "biology", "cell", "organism", "dna", "gene", "photosynthesis",
    "evolution", "ecosystem",
];

impl Topic {
    /// Scan order used by [`Topic::classify`]; the first match wins.
    const SCAN_ORDER: [(Topic, &'static [&'static str]); 4] = [
        (Topic::Mathematics, MATH_KEYWORDS),
        (Topic::Physics, PHYSICS_KEYWORDS),
        (Topic::Chemistry, CHEMISTRY_KEYWORDS),
        (Topic::Biology, BIOLOGY_KEYWORDS),
    ];

    /// Classify a question by case-insensitive keyword containment.
    pub fn classify(question: &str) -> Topic {
        let lower = question.to_lowercase();
        Self::SCAN_ORDER
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::GeneralKnowledge)
    }

    /// Display name, as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Topic::Mathematics => "Mathematics",
            Topic::Physics => "Physics",
            Topic::Chemistry => "Chemistry",
            Topic::Biology => "Biology",
            Topic::GeneralKnowledge => "General Knowledge",
        }
    }

    /// Look up a canned topic by display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Topic> {
        let name = name.trim();
        [
            Topic::Mathematics,
            Topic::Physics,
            Topic::Chemistry,
            Topic::Biology,
            Topic::GeneralKnowledge,
        ]
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Fixed unit list for this topic.
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Topic::Mathematics => &[
                "Algebra",
                "Geometry",
                "Calculus",
                "Statistics",
                "Trigonometry",
            ],
            Topic::Physics => &[
                "Mechanics",
                "Thermodynamics",
                "Electromagnetism",
                "Optics",
                "Modern Physics",
            ],
            Topic::Chemistry => &[
                "Atomic Structure",
                "Chemical Bonding",
                "Stoichiometry",
                "Organic Chemistry",
                "Chemical Reactions",
            ],
            Topic::Biology => &[
                "Cell Biology",
                "Genetics",
                "Evolution",
                "Ecology",
                "Human Anatomy",
            ],
            Topic::GeneralKnowledge => &[
                "Critical Thinking",
                "Research Skills",
                "Problem Solving",
            ],
        }
    }

    /// Canned answer paragraph returned in demo mode.
    pub fn demo_answer(&self) -> &'static str {
        match self {
            Topic::Mathematics => {
                "This question is about **Mathematics**. Start by identifying the quantities \
                 shown in the image and the relationships between them. Write those \
                 relationships as equations, then solve step by step, checking each \
                 intermediate result against the diagram. Most problems of this kind combine \
                 *algebraic manipulation* with a geometric or graphical interpretation."
            }
            Topic::Physics => {
                "This question is about **Physics**. Identify the bodies involved and the \
                 forces or fields acting on them, then apply the relevant conservation law \
                 (energy, momentum or charge). Sketching a free-body diagram from the image \
                 usually makes the governing equations obvious, and *units* should be checked \
                 at every step."
            }
            Topic::Chemistry => {
                "This question is about **Chemistry**. Look at the species shown in the image \
                 and determine how their atoms are bonded. Balance the reaction before doing \
                 any quantitative work, and use molar ratios from the balanced equation to \
                 relate amounts of *reactants* and *products*."
            }
            Topic::Biology => {
                "This question is about **Biology**. The labeled structures in the image are \
                 best understood by their function: relate each part to the process it \
                 supports, from the level of the cell up to the whole organism. Remember that \
                 *structure follows function* throughout living systems."
            }
            Topic::GeneralKnowledge => {
                "This is a great question. Break it into smaller parts, identify what the image \
                 shows that is relevant to each part, and build the answer from those pieces. \
                 Cross-checking with a reliable reference is a good habit for any \
                 *open-ended* topic."
            }
        }
    }

    /// Topic name plus its canned units.
    pub fn topic_units(&self) -> TopicUnits {
        TopicUnits {
            topic: self.name().to_string(),
            units: self.units().iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword-derived topic and units for a question.
pub fn fallback_topic_units(question: &str) -> TopicUnits {
    Topic::classify(question).topic_units()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_topic() {
        assert_eq!(Topic::classify("How do I solve this EQUATION?"), Topic::Mathematics);
        assert_eq!(Topic::classify("What force keeps it moving?"), Topic::Physics);
        assert_eq!(Topic::classify("Which molecule is formed here?"), Topic::Chemistry);
        assert_eq!(Topic::classify("What does this cell membrane do?"), Topic::Biology);
        assert_eq!(Topic::classify("Who painted this?"), Topic::GeneralKnowledge);
    }

    #[test]
    fn test_classify_order_math_wins() {
        // Mentions both a physics and a math keyword.
        assert_eq!(
            Topic::classify("Derive the energy formula"),
            Topic::Mathematics
        );
        assert_eq!(Topic::classify("energy stored in a chemical bond"), Topic::Physics);
    }

    #[test]
    fn test_units_within_bounds() {
        for topic in [
            Topic::Mathematics,
            Topic::Physics,
            Topic::Chemistry,
            Topic::Biology,
            Topic::GeneralKnowledge,
        ] {
            let n = topic.units().len();
            assert!((3..=6).contains(&n), "{} has {} units", topic, n);
            assert!(!topic.demo_answer().is_empty());
        }
    }

    #[test]
    fn test_from_name_round_trip() {
        assert_eq!(Topic::from_name("physics"), Some(Topic::Physics));
        assert_eq!(Topic::from_name(" General Knowledge "), Some(Topic::GeneralKnowledge));
        assert_eq!(Topic::from_name("Astronomy"), None);
    }

    #[test]
    fn test_fallback_topic_units() {
        let tu = fallback_topic_units("What is photosynthesis?");
        assert_eq!(tu.topic, "Biology");
        assert_eq!(tu.units[0], "Cell Biology");
    }
}
