//! Deterministic output paths.
//!
//! Both the batch executor (to check `skip_existing` and to write) and the
//! manifest (`get_output_path`) compute artifact locations through
//! [`OutputLayout::path_for`], so the two can never disagree.
//!
//! Structure: `{base}/{course}/Unit{NN}/{type}/{topic}_{difficulty}_{YYYYMMDD}.{ext}`

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::enums::Difficulty;
use crate::topic::TopicKey;

/// Extension used when no renderer overrides it.
pub const DEFAULT_EXTENSION: &str = "md";

/// Base directory plus artifact file extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    base_dir: PathBuf,
    extension: String,
}

impl OutputLayout {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Pure path computation; creates nothing on disk.
    #[must_use]
    pub fn path_for(
        &self,
        course: &str,
        key: &TopicKey,
        difficulty: Difficulty,
        date: NaiveDate,
    ) -> PathBuf {
        let filename = format!(
            "{}_{}_{}.{}",
            sanitize_component(&key.topic),
            difficulty.as_str(),
            date_stamp(date),
            self.extension
        );

        self.base_dir
            .join(sanitize_component(course))
            .join(key.unit.dir_name())
            .join(sanitize_component(key.topic_type.as_str()))
            .join(filename)
    }
}

/// Day-granularity date component (`20261019`).
#[must_use]
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Make a name safe for use as a single path component.
///
/// Separators and reserved punctuation become `-` or are dropped, whitespace
/// runs collapse to one space, and anything outside alphanumerics, space, `-`
/// and `_` is removed. An empty result becomes `untitled`.
#[must_use]
pub fn sanitize_component(name: &str) -> String {
    let replaced: String = name
        .chars()
        .filter_map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '|' => Some('-'),
            '?' | '"' | '<' | '>' => None,
            other => Some(other),
        })
        .collect();

    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let safe: String = collapsed
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '_'))
        .collect();

    let safe = safe.trim();
    if safe.is_empty() {
        String::from("untitled")
    } else {
        safe.to_string()
    }
}
