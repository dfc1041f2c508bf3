//! Planned tasks and their results.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use folio_core::{Difficulty, TopicKey, Unit};
use serde::{Serialize, Serializer};

use crate::error::GenerationError;

/// Which implemented topics to plan for.
///
/// Type names are user text: they are trimmed and title-cased before being
/// compared with catalog titles. No types means every type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    pub types: Vec<String>,
    pub unit: Option<Unit>,
}

impl PlanFilter {
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// One planned capability invocation with its output location fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationTask {
    pub course: String,
    #[serde(flatten)]
    pub key: TopicKey,
    pub difficulty: Difficulty,
    pub problem_count: u32,
    pub output_path: PathBuf,
}

impl fmt::Display for GenerationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} problems)",
            self.key, self.difficulty, self.problem_count
        )
    }
}

/// Outcome of one task.
///
/// `success` with `skipped` means the output already existed and the
/// capability was not invoked.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub task: GenerationTask,
    pub success: bool,
    pub skipped: bool,
    pub output_path: Option<PathBuf>,
    pub error: Option<GenerationError>,
    #[serde(rename = "duration_seconds", serialize_with = "as_seconds")]
    pub duration: Duration,
}

impl GenerationResult {
    #[must_use]
    pub fn generated(task: GenerationTask, duration: Duration) -> Self {
        let output_path = Some(task.output_path.clone());
        Self {
            task,
            success: true,
            skipped: false,
            output_path,
            error: None,
            duration,
        }
    }

    #[must_use]
    pub fn skipped(task: GenerationTask) -> Self {
        let output_path = Some(task.output_path.clone());
        Self {
            task,
            success: true,
            skipped: true,
            output_path,
            error: None,
            duration: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn failed(task: GenerationTask, error: GenerationError, duration: Duration) -> Self {
        Self {
            task,
            success: false,
            skipped: false,
            output_path: None,
            error: Some(error),
            duration,
        }
    }

    /// Success that actually produced a file.
    #[must_use]
    pub const fn is_generated(&self) -> bool {
        self.success && !self.skipped
    }
}

fn as_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
