//! Manifest entries and queries.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use folio_core::{Difficulty, TopicKey, TopicType, Unit};
use serde::{Deserialize, Serialize};

/// One generated artifact, as recorded on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub timestamp: DateTime<Utc>,
    pub course: String,
    pub unit: Unit,
    #[serde(rename = "type")]
    pub topic_type: TopicType,
    pub topic: String,
    pub difficulty: Difficulty,
    #[serde(alias = "num_problems")]
    pub problem_count: u32,
    pub file_path: PathBuf,
    /// Size when registered; later changes to the file are not tracked.
    pub file_size_bytes: u64,
}

impl ManifestEntry {
    #[must_use]
    pub fn key(&self) -> TopicKey {
        TopicKey::new(self.unit, self.topic_type.clone(), self.topic.clone())
    }
}

/// Registration input. Timestamp and file size are filled in by the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorksheet {
    pub course: String,
    pub key: TopicKey,
    pub difficulty: Difficulty,
    pub problem_count: u32,
    pub file_path: PathBuf,
}

/// AND-combined filter over entries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestQuery {
    pub course: Option<String>,
    pub unit: Option<Unit>,
    pub topic_type: Option<TopicType>,
    pub difficulty: Option<Difficulty>,
}

impl ManifestQuery {
    #[must_use]
    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    #[must_use]
    pub const fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn topic_type(mut self, topic_type: impl Into<TopicType>) -> Self {
        self.topic_type = Some(topic_type.into());
        self
    }

    #[must_use]
    pub const fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn matches(&self, entry: &ManifestEntry) -> bool {
        self.course.as_ref().is_none_or(|course| &entry.course == course)
            && self.unit.is_none_or(|unit| entry.unit == unit)
            && self
                .topic_type
                .as_ref()
                .is_none_or(|topic_type| &entry.topic_type == topic_type)
            && self.difficulty.is_none_or(|difficulty| entry.difficulty == difficulty)
    }
}
