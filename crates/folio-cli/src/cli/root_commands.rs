use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use folio_core::{Difficulty, Unit};

use crate::cli::subcommands::ManifestCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Plan and generate worksheets for implemented topics.
    Generate(GenerateArgs),
    /// Coverage of the topic catalog by implemented generators.
    Coverage(CoverageArgs),
    /// List every known topic.
    Topics(TopicsArgs),
    /// Generated-worksheet ledger.
    Manifest {
        #[command(subcommand)]
        action: ManifestCommands,
    },
}

/// Arguments for `folio generate`.
#[derive(Clone, Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct GenerateArgs {
    /// Worksheet types, comma separated (e.g. "Intro,Graphing").
    #[arg(long, value_delimiter = ',', conflicts_with = "all")]
    pub filter: Vec<String>,
    /// A single worksheet type; may be repeated.
    #[arg(long = "type", conflicts_with = "all")]
    pub types: Vec<String>,
    /// Only this unit (e.g. 2 or 4.5).
    #[arg(long)]
    pub unit: Option<Unit>,
    /// Every implemented type instead of the configured defaults.
    #[arg(long)]
    pub all: bool,
    /// easy, medium, hard or challenge (defaults to general.difficulty).
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,
    /// Problems per worksheet (defaults to generation.problem_counts).
    #[arg(short, long)]
    pub num_problems: Option<NonZeroU32>,
    /// Leave worksheets whose output file already exists.
    #[arg(long)]
    pub skip_existing: bool,
    /// Print the plan without generating anything.
    #[arg(long)]
    pub dry_run: bool,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    pub yes: bool,
    /// Rewrite index.html after the batch.
    #[arg(long)]
    pub index: bool,
    /// Worker threads (defaults to generation.workers).
    #[arg(short, long)]
    pub workers: Option<usize>,
}

impl GenerateArgs {
    /// Requested type names from `--filter` and `--type` combined.
    #[must_use]
    pub fn requested_types(&self) -> Vec<String> {
        self.filter
            .iter()
            .chain(&self.types)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Arguments for `folio coverage`.
#[derive(Clone, Debug, Args)]
pub struct CoverageArgs {
    /// Only the overall and Intro/Graphing lines.
    #[arg(long)]
    pub summary: bool,
    /// Also write the full topic table to a CSV file.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Arguments for `folio topics`.
#[derive(Clone, Debug, Args)]
pub struct TopicsArgs {
    /// Only this unit.
    #[arg(long)]
    pub unit: Option<Unit>,
    /// Only this worksheet type; may be repeated.
    #[arg(long = "type")]
    pub types: Vec<String>,
    /// Only topics without a generator.
    #[arg(long)]
    pub missing: bool,
}
