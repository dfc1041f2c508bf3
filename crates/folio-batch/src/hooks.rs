//! Progress and confirmation hooks supplied by the caller.

use crate::task::{GenerationResult, GenerationTask};

/// Per-task progress callbacks.
///
/// Under parallel execution callbacks arrive from worker threads and
/// `on_task_complete` may fire out of order; `index` is always the task's
/// position in the input.
pub trait BatchObserver: Send + Sync {
    fn on_task_start(&self, _index: usize, _total: usize, _task: &GenerationTask) {}

    fn on_task_complete(&self, _index: usize, _total: usize, _result: &GenerationResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// Asks whether a planned batch should run.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Headless confirmation: always proceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt for a planned batch, or `None` when there is nothing to confirm.
#[must_use]
pub fn confirmation_prompt(tasks: &[GenerationTask]) -> Option<String> {
    match tasks.len() {
        0 => None,
        1 => Some(String::from("Generate 1 worksheet?")),
        n => Some(format!("Generate {n} worksheets?")),
    }
}

/// Ask `confirm` about `tasks`. An empty plan proceeds without asking.
pub fn confirm_batch(confirm: &dyn Confirm, tasks: &[GenerationTask]) -> bool {
    confirmation_prompt(tasks).is_none_or(|prompt| confirm.confirm(&prompt))
}
