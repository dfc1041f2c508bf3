//! The artifact manifest.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Utc};
use folio_core::{Difficulty, OutputLayout, TopicKey, TopicType, Unit};
use serde_jsonlines::JsonLinesWriter;
use tempfile::NamedTempFile;

use crate::entry::{ManifestEntry, ManifestQuery, NewWorksheet};
use crate::error::ManifestError;
use crate::report::{ManifestStatistics, ReportFormat, html_report, json_report};

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.jsonl";

/// File name of the generated HTML index.
pub const INDEX_FILE: &str = "index.html";

/// Ledger of generated worksheets, persisted as one JSON object per line in
/// `{base_dir}/manifest.jsonl`.
///
/// Registration appends a single line. The file is rewritten only by
/// [`compact`](Self::compact) and [`clear`](Self::clear). Mutation takes
/// `&mut self`: one writer per manifest.
#[derive(Debug)]
pub struct ArtifactManifest {
    layout: OutputLayout,
    entries: Vec<ManifestEntry>,
    /// The file ends without a newline, so the next append must start one.
    torn_tail: bool,
}

impl ArtifactManifest {
    /// Open the manifest in `base_dir`. Never fails.
    ///
    /// A missing manifest is empty. An unreadable one is logged and treated as
    /// empty. Lines that do not parse (a torn final write, manual edits) are
    /// logged and skipped.
    pub fn open(base_dir: impl Into<PathBuf>) -> Self {
        let layout = OutputLayout::new(base_dir);
        if let Err(error) = std::fs::create_dir_all(layout.base_dir()) {
            tracing::warn!(dir = %layout.base_dir().display(), %error, "cannot create output directory");
        }

        let path = layout.base_dir().join(MANIFEST_FILE);
        let (entries, torn_tail) = load_entries(&path);
        Self {
            layout,
            entries,
            torn_tail,
        }
    }

    /// Use `extension` for [`get_output_path`](Self::get_output_path).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.layout = self.layout.with_extension(extension);
        self
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.layout.base_dir()
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.base_dir().join(MANIFEST_FILE)
    }

    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a produced artifact.
    ///
    /// The file size is read now (0 if the file is missing). The entry is
    /// kept in memory even if the append fails; the failure is logged.
    pub fn register_worksheet(&mut self, worksheet: NewWorksheet) -> &ManifestEntry {
        let file_size_bytes = std::fs::metadata(&worksheet.file_path).map_or(0, |meta| meta.len());
        let TopicKey {
            unit,
            topic_type,
            topic,
        } = worksheet.key;

        let entry = ManifestEntry {
            timestamp: Utc::now(),
            course: worksheet.course,
            unit,
            topic_type,
            topic,
            difficulty: worksheet.difficulty,
            problem_count: worksheet.problem_count,
            file_path: worksheet.file_path,
            file_size_bytes,
        };

        if let Err(error) = self.append(&entry) {
            tracing::warn!(%error, "manifest entry kept in memory only");
        }

        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    fn append(&mut self, entry: &ManifestEntry) -> Result<(), ManifestError> {
        let path = self.manifest_path();
        let persist = |source| ManifestError::Persist {
            path: path.clone(),
            source,
        };

        if self.torn_tail {
            let mut file = OpenOptions::new().append(true).open(&path).map_err(persist)?;
            file.write_all(b"\n").map_err(persist)?;
            self.torn_tail = false;
        }

        serde_jsonlines::append_json_lines(&path, [entry]).map_err(persist)
    }

    /// Rewrite the manifest from memory, atomically.
    ///
    /// Drops unparsable lines and a torn tail for good.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Persist` if the new file cannot be written or
    /// moved into place; the old file is then left untouched.
    pub fn compact(&mut self) -> Result<(), ManifestError> {
        let path = self.manifest_path();
        let persist = |source| ManifestError::Persist {
            path: path.clone(),
            source,
        };

        let mut temp = NamedTempFile::new_in(self.base_dir()).map_err(persist)?;
        {
            let mut writer = JsonLinesWriter::new(temp.as_file_mut());
            writer.write_all(&self.entries).map_err(persist)?;
            writer.flush().map_err(persist)?;
        }
        temp.as_file().sync_all().map_err(persist)?;
        temp.persist(&path).map_err(|error| persist(error.error))?;

        self.torn_tail = false;
        tracing::debug!(path = %path.display(), entries = self.entries.len(), "manifest compacted");
        Ok(())
    }

    /// Forget every entry. Artifact files are not deleted.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Persist` if the emptied manifest cannot be
    /// written.
    pub fn clear(&mut self) -> Result<(), ManifestError> {
        self.entries.clear();
        self.compact()
    }

    #[must_use]
    pub fn get_worksheets(&self, query: &ManifestQuery) -> Vec<&ManifestEntry> {
        self.entries
            .iter()
            .filter(|entry| query.matches(entry))
            .collect()
    }

    #[must_use]
    pub fn get_statistics(&self) -> ManifestStatistics {
        ManifestStatistics::from_entries(&self.entries)
    }

    /// Course → unit → entries, as an HTML page or JSON document.
    #[must_use]
    pub fn generate_report(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Html => html_report(&self.entries, self.base_dir()),
            ReportFormat::Json => json_report(&self.entries),
        }
    }

    /// Write the HTML report to `path`, or to `{base_dir}/index.html`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Persist` if the file cannot be written.
    pub fn write_index(&self, path: Option<&Path>) -> Result<PathBuf, ManifestError> {
        let target = path.map_or_else(|| self.base_dir().join(INDEX_FILE), Path::to_path_buf);
        std::fs::write(&target, self.generate_report(ReportFormat::Html)).map_err(|source| {
            ManifestError::Persist {
                path: target.clone(),
                source,
            }
        })?;
        Ok(target)
    }

    /// Where an artifact for these coordinates lives. Pure; defaults to today.
    #[must_use]
    pub fn get_output_path(
        &self,
        course: &str,
        unit: Unit,
        topic_type: impl Into<TopicType>,
        topic: &str,
        difficulty: Difficulty,
        date: Option<NaiveDate>,
    ) -> PathBuf {
        let key = TopicKey::new(unit, topic_type, topic);
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        self.layout.path_for(course, &key, difficulty, date)
    }
}

/// Parse the manifest file. Returns the entries and whether the file ends
/// mid-line.
fn load_entries(path: &Path) -> (Vec<ManifestEntry>, bool) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => return (Vec::new(), false),
        Err(source) => {
            let error = ManifestError::Load {
                path: path.to_path_buf(),
                source,
            };
            tracing::warn!(%error, "starting with an empty manifest");
            return (Vec::new(), false);
        }
    };

    let torn_tail = bytes.last().is_some_and(|&last| last != b'\n');
    let text = String::from_utf8_lossy(&bytes);
    let mut entries = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ManifestEntry>(line) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    %error,
                    "skipping unreadable manifest entry"
                );
            }
        }
    }

    (entries, torn_tail)
}
