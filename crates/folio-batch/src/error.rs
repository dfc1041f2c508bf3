//! Batch error types for folio-batch.

use std::path::PathBuf;

use folio_core::TopicKey;
use serde::Serialize;

/// Why a single task failed. Recorded in its result; the batch continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum GenerationError {
    /// No capability is bound to the task's key.
    #[error("no generator registered for {0}")]
    CapabilityNotFound(TopicKey),

    /// The task asks for no problems at all.
    #[error("problem count must be at least 1")]
    EmptyWorksheet,

    /// The capability or the renderer failed, or the capability panicked.
    #[error("{0}")]
    Generation(String),
}

/// Errors from writing a rendered worksheet.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The renderer refused the input.
    #[error("{0}")]
    Invalid(String),
}
