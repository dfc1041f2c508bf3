use std::path::PathBuf;

use anyhow::{Context, bail};
use folio_batch::{
    AssumeYes, BatchExecutor, BatchStatus, BatchSummary, Confirm, GenerationResult,
    GenerationTask, MarkdownRenderer, PlanFilter, Renderer, TaskPlanner, confirm_batch,
};
use folio_core::{Difficulty, OutputLayout};
use folio_manifest::{ArtifactManifest, NewWorksheet};
use serde::Serialize;

use crate::cli::root_commands::GenerateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::catalog::sync_catalog;
use crate::commands::shared::types::parse_types;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::prompt::StdinConfirm;
use crate::ui;

#[derive(Debug, Serialize)]
struct GenerateResponse {
    status: BatchStatus,
    summary: BatchSummary,
    registered: usize,
    manifest_worksheets: usize,
    manifest_size_mb: f64,
    index: Option<PathBuf>,
}

/// Handle `folio generate`.
pub fn handle(args: &GenerateArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requested = args.requested_types();
    let types = parse_types(&requested);
    sync_catalog(ctx, Some(types.as_slice()), flags)?;

    let defaulted = requested.is_empty() && !args.all;
    let plan_types = plan_types(args, requested, &ctx.config.general.default_types);
    if defaulted && !flags.quiet {
        if plan_types.is_empty() {
            eprintln!("No filter specified and no default types configured - generating every type");
        } else {
            eprintln!("No filter specified - defaulting to {}", plan_types.join(", "));
        }
    }

    let difficulty = args.difficulty.unwrap_or(ctx.config.general.difficulty);
    let renderer = MarkdownRenderer::new(ctx.config.generation.include_answer_key);
    let layout = OutputLayout::new(&ctx.output_dir).with_extension(renderer.extension());

    let mut filter = PlanFilter::default().with_types(plan_types);
    if let Some(unit) = args.unit {
        filter = filter.with_unit(unit);
    }
    let tasks = TaskPlanner::new(&ctx.registry, ctx.course(), layout, &ctx.config.generation)
        .create_tasks(&filter, difficulty, args.num_problems);

    if tasks.is_empty() {
        print_empty_plan_hints(flags);
        let summary = BatchSummary::from_results(&[]);
        if flags.format == OutputFormat::Table {
            println!("{summary}");
            return Ok(());
        }
        return output(&summary, flags.format);
    }

    if args.dry_run {
        return output(&tasks, flags.format);
    }

    if !flags.quiet {
        print_plan(&tasks, difficulty, ctx, args.skip_existing);
    }
    if !args.yes && !ui::prefs().interactive {
        bail!("generate: stdin is not a terminal; pass --yes to run without confirmation");
    }
    let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { &StdinConfirm };
    if !confirm_batch(confirm, &tasks) {
        eprintln!("Cancelled.");
        return Ok(());
    }

    let workers = args.workers.unwrap_or(ctx.config.generation.workers);
    let progress = Progress::bar(tasks.len() as u64, "generating");
    let results = BatchExecutor::new(&ctx.registry, &renderer)
        .with_observer(&progress)
        .generate_batch_parallel(tasks, args.skip_existing, workers);
    let summary = BatchSummary::from_results(&results);
    match summary.status() {
        BatchStatus::AllFailed => progress.finish_err("all tasks failed"),
        _ => progress.finish_ok("done"),
    }

    let mut manifest = ArtifactManifest::open(&ctx.output_dir).with_extension(renderer.extension());
    let registered = register_results(&mut manifest, &results);

    let index = if args.index {
        Some(
            manifest
                .write_index(None)
                .context("failed to write worksheet index")?,
        )
    } else {
        None
    };

    let stats = manifest.get_statistics();
    let response = GenerateResponse {
        status: summary.status(),
        summary,
        registered,
        manifest_worksheets: stats.total_worksheets,
        manifest_size_mb: stats.total_size_mb,
        index,
    };

    if flags.format == OutputFormat::Table {
        print_report(&response);
        Ok(())
    } else {
        output(&response, flags.format)
    }
}

/// Types to plan for: `--all` means every type, explicit names win, and
/// otherwise the configured defaults apply.
fn plan_types(args: &GenerateArgs, requested: Vec<String>, defaults: &[String]) -> Vec<String> {
    if args.all {
        Vec::new()
    } else if requested.is_empty() {
        defaults.to_vec()
    } else {
        requested
    }
}

/// Record every newly written worksheet. Skipped and failed tasks are not
/// recorded.
fn register_results(manifest: &mut ArtifactManifest, results: &[GenerationResult]) -> usize {
    let mut registered = 0;
    for result in results.iter().filter(|r| r.is_generated()) {
        let Some(path) = &result.output_path else {
            continue;
        };
        manifest.register_worksheet(NewWorksheet {
            course: result.task.course.clone(),
            key: result.task.key.clone(),
            difficulty: result.task.difficulty,
            problem_count: result.task.problem_count,
            file_path: path.clone(),
        });
        registered += 1;
    }
    registered
}

fn print_empty_plan_hints(flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    eprintln!("No tasks to generate.");
    eprintln!("This could mean:");
    eprintln!("  - No generators are implemented for the selected filters");
    eprintln!("  - The filters excluded all topics");
    eprintln!("Run `folio coverage` to see what is implemented.");
}

fn print_plan(tasks: &[GenerationTask], difficulty: Difficulty, ctx: &AppContext, skip: bool) {
    eprintln!("Generation plan:");
    eprintln!("  Course:      {}", ctx.course());
    eprintln!("  Tasks:       {}", tasks.len());
    eprintln!("  Difficulty:  {difficulty}");
    eprintln!("  Output dir:  {}", ctx.output_dir.display());
    if skip {
        eprintln!("  Mode:        skip existing files");
    }
}

fn print_report(response: &GenerateResponse) {
    println!("{}", response.summary);
    println!();
    println!("Registered {} worksheets", response.registered);
    if let Some(index) = &response.index {
        println!("Index written to {}", index.display());
    }
    println!(
        "Manifest: {} worksheets, {:.2} MB",
        response.manifest_worksheets, response.manifest_size_mb
    );
}
