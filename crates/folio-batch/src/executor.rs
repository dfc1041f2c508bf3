//! Running planned tasks.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use folio_registry::{Capability, CapabilityRegistry};
use rayon::prelude::*;

use crate::error::GenerationError;
use crate::hooks::{BatchObserver, NoopObserver};
use crate::render::Renderer;
use crate::task::{GenerationResult, GenerationTask};

/// Executes tasks against a registry, isolating every task's failure.
///
/// The executor writes artifacts only; recording them in the manifest is left
/// to the caller.
pub struct BatchExecutor<'a> {
    registry: &'a CapabilityRegistry,
    renderer: &'a dyn Renderer,
    observer: &'a dyn BatchObserver,
}

impl<'a> BatchExecutor<'a> {
    #[must_use]
    pub fn new(registry: &'a CapabilityRegistry, renderer: &'a dyn Renderer) -> Self {
        Self {
            registry,
            renderer,
            observer: &NoopObserver,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn BatchObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Run `tasks` one after another.
    ///
    /// Returns exactly one result per task, in input order. A failing or
    /// panicking capability fails its own task only.
    #[must_use]
    pub fn generate_batch(
        &self,
        tasks: Vec<GenerationTask>,
        skip_existing: bool,
    ) -> Vec<GenerationResult> {
        let total = tasks.len();
        tasks
            .into_iter()
            .enumerate()
            .map(|(index, task)| self.run_observed(index, total, task, skip_existing))
            .collect()
    }

    /// Run `tasks` on a pool of `workers` threads.
    ///
    /// Results keep input order. With one worker, or if the pool cannot be
    /// built, this is [`generate_batch`](Self::generate_batch).
    #[must_use]
    pub fn generate_batch_parallel(
        &self,
        tasks: Vec<GenerationTask>,
        skip_existing: bool,
        workers: usize,
    ) -> Vec<GenerationResult> {
        if workers <= 1 || tasks.len() <= 1 {
            return self.generate_batch(tasks, skip_existing);
        }

        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(error) => {
                tracing::warn!(%error, "cannot start worker pool, running sequentially");
                return self.generate_batch(tasks, skip_existing);
            }
        };

        let total = tasks.len();
        pool.install(|| {
            tasks
                .into_par_iter()
                .enumerate()
                .map(|(index, task)| self.run_observed(index, total, task, skip_existing))
                .collect()
        })
    }

    fn run_observed(
        &self,
        index: usize,
        total: usize,
        task: GenerationTask,
        skip_existing: bool,
    ) -> GenerationResult {
        self.observer.on_task_start(index, total, &task);
        let result = self.run_task(task, skip_existing);
        self.observer.on_task_complete(index, total, &result);
        result
    }

    fn run_task(&self, task: GenerationTask, skip_existing: bool) -> GenerationResult {
        let started = Instant::now();

        if skip_existing && task.output_path.exists() {
            tracing::debug!(path = %task.output_path.display(), "output exists, skipping");
            return GenerationResult::skipped(task);
        }

        if task.problem_count == 0 {
            let error = GenerationError::EmptyWorksheet;
            tracing::warn!(topic = %task.key, "problem count is zero");
            return GenerationResult::failed(task, error, started.elapsed());
        }

        let Some(capability) = self.registry.get_generator(&task.key) else {
            let error = GenerationError::CapabilityNotFound(task.key.clone());
            tracing::warn!(topic = %task.key, "no generator registered");
            return GenerationResult::failed(task, error, started.elapsed());
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.produce(&task, capability.as_ref())
        }))
        .unwrap_or_else(|payload| Err(GenerationError::Generation(panic_message(&*payload))));

        match outcome {
            Ok(()) => {
                tracing::debug!(topic = %task.key, path = %task.output_path.display(), "generated");
                GenerationResult::generated(task, started.elapsed())
            }
            Err(error) => {
                tracing::warn!(topic = %task.key, %error, "generation failed");
                GenerationResult::failed(task, error, started.elapsed())
            }
        }
    }

    fn produce(
        &self,
        task: &GenerationTask,
        capability: &dyn Capability,
    ) -> Result<(), GenerationError> {
        let records = capability
            .generate(task.difficulty, task.problem_count)
            .map_err(|error| GenerationError::Generation(error.to_string()))?;

        if let Some(parent) = task.output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                GenerationError::Generation(format!(
                    "cannot create {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let title = format!("{} ({})", task.key.topic, task.difficulty.label());
        self.renderer
            .render(&records, &task.output_path, &title)
            .map_err(|error| GenerationError::Generation(error.to_string()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("generator panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("generator panicked: {message}")
    } else {
        String::from("generator panicked")
    }
}
