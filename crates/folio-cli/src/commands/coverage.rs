use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use folio_core::{TopicType, Unit};
use folio_registry::{CapabilityRegistry, Coverage, CoverageStats, TopicRecord};
use serde::Serialize;

use crate::cli::root_commands::CoverageArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::catalog::sync_catalog;
use crate::context::AppContext;
use crate::output::output;

const PRIORITY_TYPES: [TopicType; 2] = [TopicType::Intro, TopicType::Graphing];

#[derive(Debug, Serialize)]
struct UnitCoverage {
    unit: Unit,
    #[serde(flatten)]
    coverage: Coverage,
}

#[derive(Serialize)]
struct CoverageReport<'a> {
    course: &'a str,
    overall: CoverageStats,
    priority: Coverage,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<Vec<UnitCoverage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gaps: Option<Vec<&'a TopicRecord>>,
}

/// Handle `folio coverage`.
pub fn handle(args: &CoverageArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    sync_catalog(ctx, None, flags)?;

    if let Some(path) = &args.export {
        let rows = export_csv(&ctx.registry, path)?;
        if !flags.quiet {
            eprintln!("Exported {rows} topics to {}", path.display());
        }
    }

    let report = build_report(&ctx.registry, ctx.course(), args.summary);
    if flags.format == OutputFormat::Table {
        println!("{}", render_text(&report));
        Ok(())
    } else {
        output(&report, flags.format)
    }
}

fn build_report<'a>(registry: &'a CapabilityRegistry, course: &'a str, summary: bool) -> CoverageReport<'a> {
    let priority_topics = registry.get_all_topics(None, Some(PRIORITY_TYPES.as_slice()));
    let priority = Coverage::from_counts(
        priority_topics.len(),
        priority_topics.iter().filter(|t| t.is_implemented()).count(),
    );

    let (units, gaps) = if summary {
        (None, None)
    } else {
        let units = registry
            .get_unit_coverage()
            .into_iter()
            .map(|(unit, coverage)| UnitCoverage { unit, coverage })
            .collect();
        let gaps = registry.gaps().into_values().flatten().collect();
        (Some(units), Some(gaps))
    };

    CoverageReport {
        course,
        overall: registry.get_coverage_stats(),
        priority,
        units,
        gaps,
    }
}

fn render_text(report: &CoverageReport<'_>) -> String {
    let rule = "=".repeat(70);
    let thin = "-".repeat(70);
    let overall = &report.overall;
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\nCOVERAGE: {}\n{rule}", report.course);
    let _ = writeln!(
        out,
        "Implemented: {}/{} ({:.1}%)",
        overall.implemented, overall.total, overall.percentage
    );
    if report.priority.total > 0 {
        let _ = writeln!(
            out,
            "Intro & Graphing: {}/{} ({:.1}%)",
            report.priority.implemented, report.priority.total, report.priority.percentage
        );
    }

    if let Some(units) = &report.units {
        let _ = writeln!(out, "\nBY TYPE\n{thin}");
        let _ = writeln!(out, "{:<20} {:>8} {:>12} {:>10}", "Type", "Total", "Implemented", "Coverage");
        for (topic_type, coverage) in &overall.by_type {
            let _ = writeln!(
                out,
                "{:<20} {:>8} {:>12} {:>9.1}%",
                topic_type.as_str(),
                coverage.total,
                coverage.implemented,
                coverage.percentage
            );
        }

        let _ = writeln!(out, "\nBY UNIT\n{thin}");
        let _ = writeln!(out, "{:<8} {:>8} {:>12} {:>10}", "Unit", "Total", "Implemented", "Coverage");
        for row in units {
            let _ = writeln!(
                out,
                "{:<8} {:>8} {:>12} {:>9.1}%",
                row.unit.to_string(),
                row.coverage.total,
                row.coverage.implemented,
                row.coverage.percentage
            );
        }
    }

    if let Some(gaps) = &report.gaps {
        let _ = writeln!(out, "\nGAPS\n{thin}");
        if gaps.is_empty() {
            let _ = writeln!(out, "No gaps found. Every topic is implemented.");
        }
        for record in gaps {
            let _ = writeln!(out, "{record}");
        }
    }

    out.trim_end().to_string()
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Unit")]
    unit: String,
    #[serde(rename = "Type")]
    topic_type: &'a str,
    #[serde(rename = "Topic")]
    topic: &'a str,
    #[serde(rename = "Implemented")]
    implemented: &'static str,
}

/// Every registry topic, sorted by unit, type and topic. Returns the row count.
fn export_csv(registry: &CapabilityRegistry, path: &Path) -> anyhow::Result<usize> {
    let mut records: Vec<&TopicRecord> = registry.iter().collect();
    records.sort_by(|a, b| a.key().cmp(b.key()));

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in &records {
        writer.serialize(CsvRow {
            unit: record.unit().to_string(),
            topic_type: record.topic_type().as_str(),
            topic: record.topic(),
            implemented: if record.is_implemented() { "Yes" } else { "No" },
        })?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(records.len())
}
