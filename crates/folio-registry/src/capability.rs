//! The generation capability interface.

use folio_core::{Difficulty, ProblemRecord};
use thiserror::Error;

/// Errors a capability may report instead of problem records.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The generator does not support the requested difficulty.
    #[error("difficulty '{0}' is not supported by this generator")]
    UnsupportedDifficulty(Difficulty),

    /// Generation failed; the message is shown in batch summaries.
    #[error("{0}")]
    Failed(String),
}

/// A bound generator able to produce problem records for one topic.
///
/// Implementations are stateless from the registry's point of view and may be
/// shared across worker threads.
pub trait Capability: Send + Sync {
    /// Produce `count` problems at `difficulty`, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError` when no worksheet can be produced.
    fn generate(
        &self,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<ProblemRecord>, CapabilityError>;
}

impl<F> Capability for F
where
    F: Fn(Difficulty, u32) -> Result<Vec<ProblemRecord>, CapabilityError> + Send + Sync,
{
    fn generate(
        &self,
        difficulty: Difficulty,
        count: u32,
    ) -> Result<Vec<ProblemRecord>, CapabilityError> {
        self(difficulty, count)
    }
}
