//! Multi-course catalog discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use folio_core::TopicType;
use folio_registry::CapabilityRegistry;
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::CatalogError;
use crate::loader::{CatalogLoader, SyncStats};

/// File-name patterns that identify a topic catalog.
const CATALOG_PATTERNS: &[&str] = &[
    "*Topic*.csv",
    "*Worksheet*.csv",
    "*topics*.csv",
    "*Topic*.tsv",
    "*Worksheet*.tsv",
    "*topics*.tsv",
];

/// Every catalog found in one directory, keyed by course name.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    loaders: BTreeMap<String, CatalogLoader>,
}

impl CatalogSet {
    /// Find and load every catalog file directly inside `dir`.
    ///
    /// When two files infer the same course, the later path (in sorted
    /// order) wins.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Discovery` if `dir` cannot be listed, or a
    /// load error from any matching file.
    pub fn discover(dir: &Path) -> Result<Self, CatalogError> {
        let mut set = Self::default();
        for path in discover_paths(dir)? {
            let mut loader = CatalogLoader::new(path);
            loader.load()?;
            set.insert(loader);
        }
        Ok(set)
    }

    /// Add a loader under its course name, replacing any previous one.
    pub fn insert(&mut self, loader: CatalogLoader) {
        let course = loader.course_name().to_string();
        if let Some(previous) = self.loaders.insert(course.clone(), loader) {
            tracing::warn!(
                course = %course,
                replaced = %previous.path().display(),
                "two catalogs infer the same course; keeping the later one"
            );
        }
    }

    /// Reconcile every course into `registry`.
    ///
    /// # Errors
    ///
    /// Propagates the first load failure.
    pub fn sync_all(
        &mut self,
        registry: &mut CapabilityRegistry,
        type_filter: Option<&[TopicType]>,
    ) -> Result<BTreeMap<String, SyncStats>, CatalogError> {
        self.loaders
            .iter_mut()
            .map(|(course, loader)| {
                loader
                    .sync_to_registry(registry, type_filter)
                    .map(|stats| (course.clone(), stats))
            })
            .collect()
    }

    #[must_use]
    pub fn get(&self, course: &str) -> Option<&CatalogLoader> {
        self.loaders.get(course)
    }

    pub fn courses(&self) -> impl Iterator<Item = &str> {
        self.loaders.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

/// Sorted catalog paths directly inside `dir`.
///
/// # Errors
///
/// Returns `CatalogError::Discovery` if `dir` cannot be listed.
pub fn discover_paths(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let matcher = catalog_matcher()?;
    let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::Discovery {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .collect();
    paths.sort();
    Ok(paths)
}

fn catalog_matcher() -> Result<GlobSet, CatalogError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in CATALOG_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
