//! Single-file catalog loading and reconciliation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use folio_core::{TopicType, Unit};
use folio_registry::CapabilityRegistry;
use serde::{Serialize, Serializer};

use crate::course::infer_course_name;
use crate::definition::TopicDefinition;
use crate::error::{CatalogError, MalformedRow, RowFault};

/// Outcome of merging one catalog into a registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Rows loaded from the catalog, before filtering.
    pub total_in_source: usize,
    /// Rows that passed the type filter.
    pub synced: usize,
    /// Rows added to the registry as catalog-only topics.
    pub new: usize,
    /// Rows whose key was already registered (left untouched).
    pub existing: usize,
}

/// Counts by type and by unit for one loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub course: String,
    pub source: PathBuf,
    pub total: usize,
    pub skipped_rows: usize,
    pub by_type: BTreeMap<TopicType, usize>,
    /// Keyed by the unit's display form (`"2.0"`) when serialized.
    #[serde(serialize_with = "serialize_unit_counts")]
    pub by_unit: BTreeMap<Unit, usize>,
}

fn serialize_unit_counts<S: Serializer>(
    counts: &BTreeMap<Unit, usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(counts.iter().map(|(unit, count)| (unit.to_string(), count)))
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(70);
        let thin = "-".repeat(70);
        writeln!(f, "{rule}")?;
        writeln!(f, "CATALOG REPORT: {}", self.course)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Source: {}", self.source.display())?;
        writeln!(f, "Total Topics: {}", self.total)?;
        if self.skipped_rows > 0 {
            writeln!(f, "Skipped Rows: {}", self.skipped_rows)?;
        }
        writeln!(f)?;
        writeln!(f, "Topics by Type:")?;
        writeln!(f, "{thin}")?;
        for (topic_type, count) in &self.by_type {
            writeln!(f, "  {:<20}: {count:>3} topics", topic_type.as_str())?;
        }
        writeln!(f)?;
        writeln!(f, "Topics by Unit:")?;
        write!(f, "{thin}")?;
        for (unit, count) in &self.by_unit {
            write!(f, "\n  Unit {:>4}: {count:>3} topics", unit.to_string())?;
        }
        Ok(())
    }
}

/// Reads `unit, type, topic` rows from one delimited catalog file.
///
/// The file is parsed on first use and cached for the loader's lifetime.
/// Files ending in `.tsv` are tab-separated; anything else is read as CSV.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
    course: String,
    topics: Option<Vec<TopicDefinition>>,
    skipped_rows: usize,
}

impl CatalogLoader {
    /// Create a loader. The course name is inferred from the file stem.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            course: infer_course_name(&stem),
            path,
            topics: None,
            skipped_rows: 0,
        }
    }

    /// Override the inferred course name.
    #[must_use]
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.course = course.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn course_name(&self) -> &str {
        &self.course
    }

    /// Rows dropped by the last load for a bad unit or a missing column.
    #[must_use]
    pub const fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Parse the catalog, or return the cached rows.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SourceNotFound` if the file does not exist and
    /// `CatalogError::Format` if it cannot be opened or read.
    pub fn load(&mut self) -> Result<&[TopicDefinition], CatalogError> {
        if self.topics.is_none() {
            let (topics, skipped) = self.read_rows()?;
            self.skipped_rows = skipped;
            self.topics = Some(topics);
        }
        Ok(self.topics.as_deref().unwrap_or_default())
    }

    fn read_rows(&self) -> Result<(Vec<TopicDefinition>, usize), CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::SourceNotFound(self.path.clone()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(delimiter_for(&self.path))
            .from_path(&self.path)
            .map_err(|source| self.format_error(source))?;

        let mut topics = Vec::new();
        let mut skipped = 0;

        for row in reader.records() {
            let record = match row {
                Ok(record) => record,
                Err(source) if source.is_io_error() => return Err(self.format_error(source)),
                Err(source) => {
                    tracing::debug!(path = %self.path.display(), %source, "skipping unreadable catalog row");
                    skipped += 1;
                    continue;
                }
            };

            match self.parse_row(&record) {
                Ok(topic) => topics.push(topic),
                Err(malformed) if malformed.drops_topic() => {
                    tracing::warn!(path = %self.path.display(), %malformed, "dropping catalog topic");
                    skipped += 1;
                }
                Err(malformed) => {
                    tracing::debug!(path = %self.path.display(), %malformed, "skipping malformed catalog row");
                    skipped += 1;
                }
            }
        }

        Ok((topics, skipped))
    }

    fn parse_row(&self, record: &StringRecord) -> Result<TopicDefinition, MalformedRow> {
        let line = record.position().map_or(0, csv::Position::line);
        let malformed = |fault: RowFault, reason: String| MalformedRow {
            line,
            reason,
            fault,
        };

        let column = |index: usize, name: &str| {
            record
                .get(index)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| malformed(RowFault::MissingColumn, format!("missing {name}")))
        };

        let unit_text = column(0, "unit")?;
        let type_text = column(1, "type")?;
        let topic = column(2, "topic")?;

        let unit = unit_text
            .parse::<Unit>()
            .map_err(|err| malformed(RowFault::BadUnit, err.to_string()))?;

        Ok(TopicDefinition {
            course: self.course.clone(),
            unit,
            topic_type: TopicType::from_title(type_text),
            topic: topic.to_string(),
        })
    }

    fn format_error(&self, source: csv::Error) -> CatalogError {
        CatalogError::Format {
            path: self.path.clone(),
            source,
        }
    }

    /// Rows whose type is one of `types`. An empty slice selects every row.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn get_topics_by_type(
        &mut self,
        types: &[TopicType],
    ) -> Result<Vec<&TopicDefinition>, CatalogError> {
        Ok(self
            .load()?
            .iter()
            .filter(|topic| types.is_empty() || types.contains(&topic.topic_type))
            .collect())
    }

    /// Rows in exactly `unit`.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn get_topics_by_unit(&mut self, unit: Unit) -> Result<Vec<&TopicDefinition>, CatalogError> {
        Ok(self
            .load()?
            .iter()
            .filter(|topic| topic.unit == unit)
            .collect())
    }

    /// Sorted distinct units.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn get_all_units(&mut self) -> Result<Vec<Unit>, CatalogError> {
        let units: BTreeSet<Unit> = self.load()?.iter().map(|topic| topic.unit).collect();
        Ok(units.into_iter().collect())
    }

    /// Sorted distinct types.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn get_all_types(&mut self) -> Result<Vec<TopicType>, CatalogError> {
        let types: BTreeSet<TopicType> = self
            .load()?
            .iter()
            .map(|topic| topic.topic_type.clone())
            .collect();
        Ok(types.into_iter().collect())
    }

    /// Merge catalog rows into `registry`.
    ///
    /// Known keys are counted as existing and left as they are, so an
    /// implemented topic is never demoted. Unknown keys are added as
    /// catalog-only topics. `type_filter` of `None` or an empty slice syncs
    /// every row.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn sync_to_registry(
        &mut self,
        registry: &mut CapabilityRegistry,
        type_filter: Option<&[TopicType]>,
    ) -> Result<SyncStats, CatalogError> {
        let course = self.course.clone();
        let topics = self.load()?;
        let types = type_filter.unwrap_or_default();

        let mut stats = SyncStats {
            total_in_source: topics.len(),
            ..SyncStats::default()
        };

        for topic in topics
            .iter()
            .filter(|topic| types.is_empty() || types.contains(&topic.topic_type))
        {
            stats.synced += 1;
            let key = topic.key();
            if registry.contains(&key) {
                stats.existing += 1;
            } else {
                registry.register_topic(key, None);
                stats.new += 1;
            }
        }

        tracing::debug!(
            course = %course,
            synced = stats.synced,
            new = stats.new,
            existing = stats.existing,
            "catalog reconciled"
        );

        Ok(stats)
    }

    /// Counts by type and unit.
    ///
    /// # Errors
    ///
    /// Propagates load failures.
    pub fn summary(&mut self) -> Result<CatalogSummary, CatalogError> {
        let topics = self.load()?;
        let total = topics.len();
        let mut by_type: BTreeMap<TopicType, usize> = BTreeMap::new();
        let mut by_unit: BTreeMap<Unit, usize> = BTreeMap::new();
        for topic in topics {
            *by_type.entry(topic.topic_type.clone()).or_default() += 1;
            *by_unit.entry(topic.unit).or_default() += 1;
        }

        Ok(CatalogSummary {
            course: self.course.clone(),
            source: self.path.clone(),
            total,
            skipped_rows: self.skipped_rows,
            by_type,
            by_unit,
        })
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use csv::StringRecord;

    use super::{CatalogLoader, delimiter_for};
    use crate::error::RowFault;

    #[test]
    fn tsv_extension_selects_tabs() {
        assert_eq!(delimiter_for(Path::new("topics.tsv")), b'\t');
        assert_eq!(delimiter_for(Path::new("Topics.TSV")), b'\t');
        assert_eq!(delimiter_for(Path::new("topics.csv")), b',');
        assert_eq!(delimiter_for(Path::new("topics")), b',');
    }

    #[test]
    fn unusable_unit_drops_a_topic_but_blank_columns_do_not() {
        let loader = CatalogLoader::new("topics.csv");

        let precise = loader
            .parse_row(&StringRecord::from(vec!["2.25", "Intro", "Quarter Units"]))
            .unwrap_err();
        assert_eq!(precise.fault, RowFault::BadUnit);
        assert!(precise.drops_topic());

        let spacer = loader
            .parse_row(&StringRecord::from(vec!["", "", ""]))
            .unwrap_err();
        assert_eq!(spacer.fault, RowFault::MissingColumn);
        assert!(!spacer.drops_topic());
    }
}
