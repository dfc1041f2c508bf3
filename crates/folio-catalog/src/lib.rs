//! # folio-catalog
//!
//! Reads the externally maintained topic catalog (a CSV or TSV export of the
//! topic spreadsheet) and reconciles it into a [`CapabilityRegistry`].
//!
//! The first row is a header. The first three columns are `unit`, `type` and
//! `topic`; further columns are ignored. Rows with a missing column or an
//! unparsable unit are skipped and counted, never fatal.
//!
//! [`CapabilityRegistry`]: folio_registry::CapabilityRegistry

mod course;
mod definition;
mod discover;
mod error;
mod loader;

pub use course::infer_course_name;
pub use definition::TopicDefinition;
pub use discover::{CatalogSet, discover_paths};
pub use error::{CatalogError, MalformedRow, RowFault};
pub use loader::{CatalogLoader, CatalogSummary, SyncStats};
