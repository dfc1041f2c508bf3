//! # folio-manifest
//!
//! Persistent ledger of generated worksheets.
//!
//! The manifest is an append-only JSONL file in the output directory. Each
//! registration appends one line; `compact` rewrites the file atomically from
//! memory. Loading tolerates unreadable lines, so a crash mid-append costs at
//! most the entry being written.
//!
//! Reports group entries by course and unit and render as HTML (the browsable
//! `index.html`) or JSON.

mod entry;
mod error;
mod manifest;
mod report;

pub use entry::{ManifestEntry, ManifestQuery, NewWorksheet};
pub use error::ManifestError;
pub use manifest::{ArtifactManifest, INDEX_FILE, MANIFEST_FILE};
pub use report::{ManifestStatistics, ReportFormat, escape};
