//! Topic identity and capability output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, TopicType};
use crate::unit::Unit;

/// Composite identity of a topic: `(unit, type, topic)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TopicKey {
    pub unit: Unit,
    #[serde(rename = "type")]
    pub topic_type: TopicType,
    pub topic: String,
}

impl TopicKey {
    #[must_use]
    pub fn new(unit: Unit, topic_type: impl Into<TopicType>, topic: impl Into<String>) -> Self {
        Self {
            unit,
            topic_type: topic_type.into(),
            topic: topic.into(),
        }
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unit {} | {} | {}", self.unit, self.topic_type, self.topic)
    }
}

/// One generated problem, as returned by a capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// What the student sees (`"3x + 4 = 19"`).
    pub display_form: String,
    /// The expected answer in canonical form (`"x = 5"`).
    pub canonical_answer: String,
    /// Worked solution, one step per entry.
    #[serde(default)]
    pub solution_steps: Vec<String>,
    pub difficulty: Difficulty,
}

/// Supplies the problem count for a topic when the caller does not give one.
pub trait ProblemCountSource {
    fn default_problem_count(&self, key: &TopicKey) -> u32;
}

/// The same count for every topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedProblemCount(pub u32);

impl ProblemCountSource for FixedProblemCount {
    fn default_problem_count(&self, _key: &TopicKey) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_is_human_readable() {
        let key = TopicKey::new(Unit::whole(2), "Intro", "Equations");
        assert_eq!(key.to_string(), "Unit 2.0 | Intro | Equations");
    }

    #[test]
    fn keys_from_equivalent_units_are_equal() {
        let a = TopicKey::new("4.5".parse().unwrap(), "Graphing", "Slopes");
        let b = TopicKey::new(Unit::from_tenths(45), TopicType::Graphing, "Slopes");
        assert_eq!(a, b);
    }

    #[test]
    fn key_serializes_type_field() {
        let key = TopicKey::new(Unit::whole(3), "Graphing", "Inequalities");
        let value = serde_json::to_value(&key).unwrap();
        assert_eq!(value["type"], "Graphing");
        assert_eq!(value["unit"], 3.0);
    }
}
