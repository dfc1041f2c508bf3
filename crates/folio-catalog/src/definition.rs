use std::fmt;

use folio_core::{TopicKey, TopicType, Unit};
use serde::Serialize;

/// One parsed catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicDefinition {
    pub course: String,
    pub unit: Unit,
    #[serde(rename = "type")]
    pub topic_type: TopicType,
    pub topic: String,
}

impl TopicDefinition {
    /// The registry key this row reconciles against.
    #[must_use]
    pub fn key(&self) -> TopicKey {
        TopicKey::new(self.unit, self.topic_type.clone(), self.topic.clone())
    }
}

impl fmt::Display for TopicDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - Unit {} | {} | {}",
            self.course, self.unit, self.topic_type, self.topic
        )
    }
}
