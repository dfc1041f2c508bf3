//! Planning and execution against a real output directory.

use std::num::NonZeroU32;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use folio_batch::{
    BatchExecutor, BatchObserver, BatchStatus, BatchSummary, GenerationError, GenerationResult,
    GenerationTask, MarkdownRenderer, PlanFilter, TaskPlanner,
};
use folio_core::{
    Difficulty, FixedProblemCount, OutputLayout, ProblemCountSource, ProblemRecord, TopicKey, Unit,
};
use folio_registry::{Capability, CapabilityError, CapabilityRegistry};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn key(unit: u32, topic_type: &str, topic: &str) -> TopicKey {
    TopicKey::new(Unit::whole(unit), topic_type, topic)
}

fn counting(calls: Arc<AtomicUsize>) -> Arc<dyn Capability> {
    Arc::new(
        move |difficulty: Difficulty, count: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok((1..=count)
                .map(|i| ProblemRecord {
                    display_form: format!("x + {i} = {}", i + 1),
                    canonical_answer: String::from("x = 1"),
                    solution_steps: Vec::new(),
                    difficulty,
                })
                .collect())
        },
    )
}

fn working() -> Arc<dyn Capability> {
    counting(Arc::new(AtomicUsize::new(0)))
}

fn failing(message: &'static str) -> Arc<dyn Capability> {
    Arc::new(
        move |_: Difficulty, _: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            Err(CapabilityError::Failed(message.to_string()))
        },
    )
}

fn panicking() -> Arc<dyn Capability> {
    Arc::new(
        |_: Difficulty, _: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
            panic!("index out of range")
        },
    )
}

fn plan(
    registry: &CapabilityRegistry,
    out: &Path,
    filter: &PlanFilter,
    difficulty: Difficulty,
) -> Vec<GenerationTask> {
    TaskPlanner::new(registry, "Algebra 1", OutputLayout::new(out), &FixedProblemCount(10))
        .with_date(day())
        .create_tasks(filter, difficulty, None)
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

#[test]
fn plans_only_implemented_topics_in_unit() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), working());
    registry.register_capability(key(2, "Graphing", "Solutions"), working());
    registry.register_topic(key(2, "Intro", "Inverse Operations"), None);
    registry.register_capability(key(3, "Intro", "Inequalities"), working());

    let tasks = plan(
        &registry,
        out.path(),
        &PlanFilter::default().with_unit(Unit::whole(2)),
        Difficulty::Easy,
    );

    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.difficulty == Difficulty::Easy));
    assert_eq!(tasks[0].key.topic, "Equations");
    assert_eq!(tasks[1].key.topic, "Solutions");
}

#[test]
fn type_filter_is_normalised_before_matching() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "Variables"), working());
    registry.register_capability(key(1, "Graphing", "Points"), working());
    registry.register_capability(key(1, "Review", "Unit One"), working());

    let tasks = plan(
        &registry,
        out.path(),
        &PlanFilter::default().with_types([" intro", "GRAPHING "]),
        Difficulty::Medium,
    );

    let topics: Vec<&str> = tasks.iter().map(|t| t.key.topic.as_str()).collect();
    assert_eq!(topics, vec!["Variables", "Points"]);
}

#[test]
fn empty_plan_is_valid() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_topic(key(1, "Intro", "Variables"), None);

    let tasks = plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy);
    assert!(tasks.is_empty());
}

#[test]
fn problem_count_and_path_are_fixed_at_planning() {
    struct PerTopic;
    impl ProblemCountSource for PerTopic {
        fn default_problem_count(&self, key: &TopicKey) -> u32 {
            if key.topic == "Equations" { 15 } else { 10 }
        }
    }

    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), working());
    registry.register_capability(key(2, "Intro", "Solutions"), working());

    let planner = TaskPlanner::new(&registry, "Algebra 1", OutputLayout::new(out.path()), &PerTopic)
        .with_date(day());

    let defaults = planner.create_tasks(&PlanFilter::default(), Difficulty::Hard, None);
    assert_eq!(defaults[0].problem_count, 15);
    assert_eq!(defaults[1].problem_count, 10);
    assert_eq!(
        defaults[0].output_path,
        out.path()
            .join("Algebra 1/Unit02/Intro/Equations_hard_20261019.md")
    );

    let explicit = planner.create_tasks(&PlanFilter::default(), Difficulty::Hard, NonZeroU32::new(4));
    assert!(explicit.iter().all(|t| t.problem_count == 4));
}

#[test]
fn topics_sanitizing_to_one_file_get_distinct_paths() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(3, "Graphing", "Slope/Intercept"), working());
    registry.register_capability(key(3, "Graphing", "Slope-Intercept"), working());

    let tasks = plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy);
    assert_eq!(
        tasks[0].output_path,
        out.path()
            .join("Algebra 1/Unit03/Graphing/Slope-Intercept_easy_20261019.md")
    );
    assert_ne!(tasks[0].output_path, tasks[1].output_path);
    assert_eq!(tasks[1].output_path.parent(), tasks[0].output_path.parent());

    let again = plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy);
    assert_eq!(again[1].output_path, tasks[1].output_path);

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(tasks, true);
    assert!(results.iter().all(|r| r.success && !r.skipped));
    assert!(results.iter().all(|r| r.output_path.as_ref().unwrap().exists()));
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn one_result_per_task_and_partial_failure_is_isolated() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), working());
    registry.register_capability(key(2, "Intro", "Solutions"), failing("bad state"));

    let tasks = plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy);
    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(tasks, false);

    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert!(results[0].output_path.as_ref().unwrap().exists());
    assert!(!results[1].success);
    assert!(results[1].output_path.is_none());
    assert!(
        results[1]
            .error
            .as_ref()
            .unwrap()
            .to_string()
            .contains("bad state")
    );
}

#[test]
fn skip_existing_is_idempotent() {
    let out = TempDir::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), counting(Arc::clone(&calls)));
    registry.register_capability(key(2, "Intro", "Solutions"), counting(Arc::clone(&calls)));

    let renderer = MarkdownRenderer::default();
    let executor = BatchExecutor::new(&registry, &renderer);

    let first = executor.generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        true,
    );
    assert!(first.iter().all(|r| r.success && !r.skipped));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let second = executor.generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        true,
    );
    assert!(second.iter().all(|r| r.success && r.skipped));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first[0].output_path, second[0].output_path);
}

#[test]
fn without_skip_existing_outputs_are_regenerated() {
    let out = TempDir::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "Variables"), counting(Arc::clone(&calls)));

    let renderer = MarkdownRenderer::default();
    let executor = BatchExecutor::new(&registry, &renderer);
    for _ in 0..2 {
        let results = executor.generate_batch(
            plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
            false,
        );
        assert!(!results[0].skipped);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn zero_problem_count_fails_without_calling_the_generator() {
    let out = TempDir::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "Variables"), counting(Arc::clone(&calls)));

    let tasks = TaskPlanner::new(&registry, "Algebra 1", OutputLayout::new(out.path()), &FixedProblemCount(0))
        .with_date(day())
        .create_tasks(&PlanFilter::default(), Difficulty::Easy, None);
    assert_eq!(tasks[0].problem_count, 0);
    let path = tasks[0].output_path.clone();

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(tasks, false);

    assert!(!results[0].success);
    assert_eq!(results[0].error, Some(GenerationError::EmptyWorksheet));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!path.exists());
}

#[test]
fn generator_returning_nothing_fails_its_task() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(
        key(1, "Intro", "Hollow"),
        Arc::new(
            |_: Difficulty, _: u32| -> Result<Vec<ProblemRecord>, CapabilityError> {
                Ok(Vec::new())
            },
        ),
    );

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        false,
    );

    assert!(!results[0].success);
    assert!(
        results[0]
            .error
            .as_ref()
            .unwrap()
            .to_string()
            .contains("no problems to render")
    );
}

#[test]
fn missing_capability_is_reported_per_task() {
    let out = TempDir::new().unwrap();
    let registry = CapabilityRegistry::new();
    let task = GenerationTask {
        course: String::from("Algebra 1"),
        key: key(9, "Intro", "Nowhere"),
        difficulty: Difficulty::Easy,
        problem_count: 5,
        output_path: out.path().join("nowhere.md"),
    };

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(vec![task], false);

    assert_eq!(
        results[0].error,
        Some(GenerationError::CapabilityNotFound(key(9, "Intro", "Nowhere")))
    );
    assert!(!out.path().join("nowhere.md").exists());
}

#[test]
fn panicking_capability_fails_only_its_task() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "A"), working());
    registry.register_capability(key(1, "Intro", "B"), panicking());
    registry.register_capability(key(1, "Intro", "C"), failing("no solutions"));
    registry.register_capability(key(1, "Intro", "D"), working());

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        false,
    );

    let successes: Vec<bool> = results.iter().map(|r| r.success).collect();
    assert_eq!(successes, vec![true, false, false, true]);
    let panic_error = results[1].error.as_ref().unwrap().to_string();
    assert!(panic_error.contains("index out of range"));

    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.status(), BatchStatus::PartialFailure);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.failures[0].key.topic, "B");
    assert_eq!(summary.failures[1].error, "no solutions");
}

#[test]
fn parallel_execution_preserves_order() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    for index in 0..12 {
        let capability = if index % 5 == 3 { failing("boom") } else { working() };
        registry.register_capability(key(1, "Intro", &format!("Topic {index:02}")), capability);
    }

    let tasks = plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy);
    let expected: Vec<TopicKey> = tasks.iter().map(|t| t.key.clone()).collect();

    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch_parallel(tasks, false, 4);

    let keys: Vec<TopicKey> = results.iter().map(|r| r.task.key.clone()).collect();
    assert_eq!(keys, expected);
    assert_eq!(results.iter().filter(|r| !r.success).count(), 2);
}

#[test]
fn observer_sees_every_task() {
    #[derive(Default)]
    struct Recorder {
        started: Mutex<Vec<usize>>,
        completed: Mutex<Vec<(usize, bool)>>,
    }

    impl BatchObserver for Recorder {
        fn on_task_start(&self, index: usize, total: usize, _task: &GenerationTask) {
            assert_eq!(total, 3);
            self.started.lock().unwrap().push(index);
        }

        fn on_task_complete(&self, index: usize, _total: usize, result: &GenerationResult) {
            self.completed.lock().unwrap().push((index, result.success));
        }
    }

    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "A"), working());
    registry.register_capability(key(1, "Intro", "B"), failing("nope"));
    registry.register_capability(key(1, "Intro", "C"), working());

    let recorder = Recorder::default();
    let renderer = MarkdownRenderer::default();
    let _ = BatchExecutor::new(&registry, &renderer)
        .with_observer(&recorder)
        .generate_batch(
            plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
            false,
        );

    assert_eq!(*recorder.started.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(
        *recorder.completed.lock().unwrap(),
        vec![(0, true), (1, false), (2, true)]
    );
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[test]
fn empty_plan_is_distinct_from_all_failed() {
    let empty = BatchSummary::from_results(&[]);
    assert_eq!(empty.status(), BatchStatus::EmptyPlan);
    assert_eq!(empty.to_string(), "No tasks to run.");

    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(1, "Intro", "A"), failing("nope"));
    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        false,
    );

    let summary = BatchSummary::from_results(&results);
    assert_eq!(summary.status(), BatchStatus::AllFailed);
    assert!(summary.to_string().contains("Unit 1.0 | Intro | A (easy)"));
}

#[test]
fn results_serialize_for_json_output() {
    let out = TempDir::new().unwrap();
    let mut registry = CapabilityRegistry::new();
    registry.register_capability(key(2, "Intro", "Equations"), working());
    let renderer = MarkdownRenderer::default();
    let results = BatchExecutor::new(&registry, &renderer).generate_batch(
        plan(&registry, out.path(), &PlanFilter::default(), Difficulty::Easy),
        false,
    );

    let value = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["task"]["topic"], "Equations");
    assert_eq!(value["task"]["difficulty"], "easy");
    assert!(value["duration_seconds"].is_f64());
}

fn outcome(topic: &str, kind: &str) -> GenerationResult {
    let task = GenerationTask {
        course: String::from("Algebra 1"),
        key: key(1, "Intro", topic),
        difficulty: Difficulty::Easy,
        problem_count: 5,
        output_path: Path::new("unused").join(format!("{topic}.md")),
    };
    match kind {
        "generated" => GenerationResult::generated(task, std::time::Duration::ZERO),
        "skipped" => GenerationResult::skipped(task),
        _ => GenerationResult::failed(
            task,
            GenerationError::Generation(String::from("nope")),
            std::time::Duration::ZERO,
        ),
    }
}

#[rstest::rstest]
#[case(&["generated", "skipped"], BatchStatus::Completed)]
#[case(&["generated", "failed"], BatchStatus::PartialFailure)]
#[case(&["skipped", "failed"], BatchStatus::PartialFailure)]
#[case(&["failed", "failed"], BatchStatus::AllFailed)]
fn status_follows_failure_count(#[case] kinds: &[&str], #[case] expected: BatchStatus) {
    let results: Vec<GenerationResult> = kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| outcome(&format!("T{index}"), kind))
        .collect();
    assert_eq!(BatchSummary::from_results(&results).status(), expected);
}
