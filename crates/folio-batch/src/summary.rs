//! Aggregate view of a finished batch.

use std::fmt;
use std::time::Duration;

use folio_core::{Difficulty, TopicKey};
use serde::Serialize;

use crate::task::GenerationResult;

/// Overall outcome, distinguishing "nothing to do" from "everything failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    EmptyPlan,
    Completed,
    PartialFailure,
    AllFailed,
}

/// One failed task, identified by topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    #[serde(flatten)]
    pub key: TopicKey,
    pub difficulty: Difficulty,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<Failure>,
    #[serde(rename = "duration_seconds")]
    pub duration_secs: f64,
}

impl BatchSummary {
    #[must_use]
    pub fn from_results(results: &[GenerationResult]) -> Self {
        let generated = results.iter().filter(|r| r.is_generated()).count();
        let skipped = results.iter().filter(|r| r.skipped).count();
        let failures: Vec<Failure> = results
            .iter()
            .filter(|r| !r.success)
            .map(|r| Failure {
                key: r.task.key.clone(),
                difficulty: r.task.difficulty,
                error: r
                    .error
                    .as_ref()
                    .map_or_else(|| String::from("unknown error"), ToString::to_string),
            })
            .collect();
        let duration: Duration = results.iter().map(|r| r.duration).sum();

        Self {
            total: results.len(),
            generated,
            skipped,
            failed: failures.len(),
            failures,
            duration_secs: duration.as_secs_f64(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> BatchStatus {
        if self.total == 0 {
            BatchStatus::EmptyPlan
        } else if self.failed == 0 {
            BatchStatus::Completed
        } else if self.failed == self.total {
            BatchStatus::AllFailed
        } else {
            BatchStatus::PartialFailure
        }
    }

    /// Percentage of tasks that succeeded (generated or skipped); `0.0` for
    /// an empty plan.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.total - self.failed) as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status() == BatchStatus::EmptyPlan {
            return write!(f, "No tasks to run.");
        }

        writeln!(f, "Total tasks:   {}", self.total)?;
        writeln!(f, "Generated:     {}", self.generated)?;
        writeln!(f, "Skipped:       {}", self.skipped)?;
        writeln!(f, "Failed:        {}", self.failed)?;
        write!(f, "Success rate:  {:.1}%", self.success_rate())?;

        if !self.failures.is_empty() {
            write!(f, "\n\nFailed tasks:")?;
            for failure in &self.failures {
                write!(
                    f,
                    "\n  {} ({})\n    Error: {}",
                    failure.key, failure.difficulty, failure.error
                )?;
            }
        }
        Ok(())
    }
}
