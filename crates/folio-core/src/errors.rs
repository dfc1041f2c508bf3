//! Cross-cutting error types for folio.
//!
//! Domain-specific errors (`CatalogError`, `GenerationError`, ...) live in
//! their respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors raised while parsing core value types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A unit number could not be represented as whole tenths.
    #[error("Invalid unit '{value}': {reason}")]
    InvalidUnit { value: String, reason: String },

    /// A difficulty name outside the fixed set.
    #[error("Invalid difficulty '{0}' (expected easy, medium, hard or challenge)")]
    InvalidDifficulty(String),
}
