use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use folio_core::{Difficulty, Unit};

/// Generated-worksheet ledger.
#[derive(Clone, Debug, Subcommand)]
pub enum ManifestCommands {
    /// Totals by course, type and difficulty.
    Stats,
    /// List recorded worksheets.
    List {
        /// Only this course.
        #[arg(long = "in-course", id = "in_course")]
        course: Option<String>,
        /// Only this unit (e.g. 2 or 4.5).
        #[arg(long)]
        unit: Option<Unit>,
        /// Only this worksheet type.
        #[arg(long = "type")]
        topic_type: Option<String>,
        /// Only this difficulty.
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Write the course/unit report.
    Report {
        /// Report format.
        #[arg(long, value_enum, default_value = "html")]
        kind: ReportKind,
        /// Destination file (HTML defaults to index.html in the output dir;
        /// JSON defaults to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Rewrite the manifest, dropping unreadable lines.
    Compact,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportKind {
    Html,
    Json,
}
