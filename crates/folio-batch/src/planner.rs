//! Turning registry entries into generation tasks.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use folio_core::{Difficulty, OutputLayout, ProblemCountSource, TopicKey, TopicType};
use folio_registry::CapabilityRegistry;
use sha2::{Digest, Sha256};

use crate::task::{GenerationTask, PlanFilter};

/// Plans one task per implemented topic that passes a [`PlanFilter`].
///
/// The course name, output layout and date are fixed at construction so that
/// every planned task already knows where its artifact goes.
pub struct TaskPlanner<'a> {
    registry: &'a CapabilityRegistry,
    course: String,
    layout: OutputLayout,
    date: NaiveDate,
    counts: &'a dyn ProblemCountSource,
}

impl<'a> TaskPlanner<'a> {
    /// Plan against `registry`, dated today in local time.
    #[must_use]
    pub fn new(
        registry: &'a CapabilityRegistry,
        course: impl Into<String>,
        layout: OutputLayout,
        counts: &'a dyn ProblemCountSource,
    ) -> Self {
        Self {
            registry,
            course: course.into(),
            layout,
            date: Local::now().date_naive(),
            counts,
        }
    }

    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn course(&self) -> &str {
        &self.course
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Tasks for every implemented topic matching `filter`, in registry
    /// insertion order.
    ///
    /// `problem_count` applies to every task; when `None` each topic's
    /// configured default is used. An empty plan is not an error.
    ///
    /// Distinct topics whose names sanitize to the same file (`Slope/Intercept`
    /// and `Slope-Intercept`) never share a path: the later one gets a suffix
    /// derived from its key.
    #[must_use]
    pub fn create_tasks(
        &self,
        filter: &PlanFilter,
        difficulty: Difficulty,
        problem_count: Option<NonZeroU32>,
    ) -> Vec<GenerationTask> {
        let types: Vec<TopicType> = filter
            .types
            .iter()
            .map(|name| TopicType::from_filter(name))
            .collect();

        let mut tasks: Vec<GenerationTask> = self
            .registry
            .get_all_topics(filter.unit, Some(types.as_slice()))
            .into_iter()
            .filter(|record| record.is_implemented())
            .map(|record| {
                let key = record.key().clone();
                let problem_count = problem_count
                    .map_or_else(|| self.counts.default_problem_count(&key), NonZeroU32::get);
                let output_path = self
                    .layout
                    .path_for(&self.course, &key, difficulty, self.date);
                GenerationTask {
                    course: self.course.clone(),
                    key,
                    difficulty,
                    problem_count,
                    output_path,
                }
            })
            .collect();

        let mut claimed = HashSet::with_capacity(tasks.len());
        for task in &mut tasks {
            if !claimed.contains(&task.output_path) {
                claimed.insert(task.output_path.clone());
                continue;
            }
            let unique = disambiguate(&task.output_path, &task.key);
            tracing::warn!(
                topic = %task.key,
                path = %unique.display(),
                "output path already planned for another topic"
            );
            claimed.insert(unique.clone());
            task.output_path = unique;
        }

        tracing::debug!(
            course = %self.course,
            tasks = tasks.len(),
            difficulty = %difficulty,
            "planned batch"
        );

        tasks
    }
}

/// `path` with an 8-hex-digit digest of `key` appended to the file stem.
fn disambiguate(path: &Path, key: &TopicKey) -> PathBuf {
    let identity = format!("{}\u{1f}{}\u{1f}{}", key.unit, key.topic_type, key.topic);
    let digest = Sha256::digest(identity.as_bytes());

    let mut name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push('-');
    for byte in &digest[..4] {
        let _ = write!(name, "{byte:02x}");
    }
    if let Some(extension) = path.extension() {
        name.push('.');
        name.push_str(&extension.to_string_lossy());
    }
    path.with_file_name(name)
}
