//! # folio-batch
//!
//! Plans generation tasks from a [`CapabilityRegistry`] and executes them.
//!
//! - [`TaskPlanner`] selects implemented topics and fixes each task's
//!   problem count and output path.
//! - [`BatchExecutor`] invokes capabilities, renders artifacts and reports one
//!   [`GenerationResult`] per task. A failing task never aborts the batch.
//! - [`BatchSummary`] aggregates results for display.
//!
//! Confirmation before a run and progress reporting are injected through the
//! [`Confirm`] and [`BatchObserver`] traits.
//!
//! [`CapabilityRegistry`]: folio_registry::CapabilityRegistry

mod error;
mod executor;
mod hooks;
mod planner;
mod render;
mod summary;
mod task;

pub use error::{GenerationError, RenderError};
pub use executor::BatchExecutor;
pub use hooks::{AssumeYes, BatchObserver, Confirm, NoopObserver, confirm_batch, confirmation_prompt};
pub use planner::TaskPlanner;
pub use render::{MarkdownRenderer, Renderer};
pub use summary::{BatchStatus, BatchSummary, Failure};
pub use task::{GenerationResult, GenerationTask, PlanFilter};
