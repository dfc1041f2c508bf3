//! Catalog error types for folio-catalog.

use std::path::PathBuf;

/// Errors that stop a catalog from loading at all.
///
/// Individual bad rows are not errors here; see [`MalformedRow`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("catalog not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The catalog exists but could not be opened or read.
    #[error("cannot read catalog {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A directory scanned for catalogs could not be listed.
    #[error("cannot scan {}: {source}", dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovery glob failed to compile.
    #[error("invalid discovery pattern: {0}")]
    Pattern(#[from] globset::Error),
}

/// A catalog row that was dropped during loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {line}: {reason}")]
pub struct MalformedRow {
    /// 1-based line in the source file.
    pub line: u64,
    pub reason: String,
    pub fault: RowFault,
}

/// What was wrong with a dropped row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFault {
    /// A required column is blank or absent (spacer and note rows).
    MissingColumn,
    /// The row names a topic but its unit cannot be used.
    BadUnit,
}

impl MalformedRow {
    /// Whether a real topic was lost, as opposed to a filler row.
    #[must_use]
    pub const fn drops_topic(&self) -> bool {
        matches!(self.fault, RowFault::BadUnit)
    }
}
