//! Batch generation configuration.

use std::collections::BTreeMap;

use folio_core::{ProblemCountSource, TopicKey};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_problem_count() -> u32 {
    10
}

const fn default_workers() -> usize {
    1
}

const fn default_include_answer_key() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Problems per worksheet when neither the command line nor
    /// `problem_counts` names a count.
    #[serde(default = "default_problem_count")]
    pub default_problem_count: u32,

    /// Per-topic problem counts keyed by topic name.
    #[serde(default)]
    pub problem_counts: BTreeMap<String, u32>,

    /// Worker threads for batch execution. `1` runs tasks sequentially.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Append an answer key to rendered worksheets.
    #[serde(default = "default_include_answer_key")]
    pub include_answer_key: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_problem_count: default_problem_count(),
            problem_counts: BTreeMap::new(),
            workers: default_workers(),
            include_answer_key: default_include_answer_key(),
        }
    }
}

impl GenerationConfig {
    /// Reject values that would make every task fail or no worker run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_problem_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.default_problem_count".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some((topic, _)) = self.problem_counts.iter().find(|(_, count)| **count == 0) {
            return Err(ConfigError::InvalidValue {
                field: format!("generation.problem_counts.{topic}"),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.workers".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl ProblemCountSource for GenerationConfig {
    fn default_problem_count(&self, key: &TopicKey) -> u32 {
        self.problem_counts
            .get(&key.topic)
            .copied()
            .unwrap_or(self.default_problem_count)
    }
}

#[cfg(test)]
mod tests {
    use folio_core::Unit;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GenerationConfig::default();
        assert_eq!(config.default_problem_count, 10);
        assert_eq!(config.workers, 1);
        assert!(config.include_answer_key);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn per_topic_count_wins_over_default() {
        let mut config = GenerationConfig::default();
        config.problem_counts.insert("Exponents".to_string(), 16);

        let exponents = TopicKey::new(Unit::whole(1), "Intro", "Exponents");
        let variables = TopicKey::new(Unit::whole(1), "Intro", "Variables");
        assert_eq!(config.default_problem_count(&exponents), 16);
        assert_eq!(config.default_problem_count(&variables), 10);
    }

    #[test]
    fn zero_counts_and_workers_are_rejected() {
        let zero_default = GenerationConfig {
            default_problem_count: 0,
            ..GenerationConfig::default()
        };
        assert!(zero_default.validate().is_err());

        let mut zero_topic = GenerationConfig::default();
        zero_topic.problem_counts.insert("Exponents".to_string(), 0);
        assert!(zero_topic.validate().is_err());

        let zero_workers = GenerationConfig {
            workers: 0,
            ..GenerationConfig::default()
        };
        assert!(zero_workers.validate().is_err());
    }
}
