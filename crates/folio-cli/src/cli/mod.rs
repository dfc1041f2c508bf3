use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `folio` binary.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio - worksheet catalog reconciliation and batch generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Topic catalog file (overrides general.catalog_path)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output directory for worksheets, manifest and index (overrides general.output_dir)
    #[arg(short, long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Course name used in output paths (defaults to one inferred from the catalog name)
    #[arg(long, global = true)]
    pub course: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            catalog: self.catalog.clone(),
            output_dir: self.output_dir.clone(),
            course: self.course.clone(),
        }
    }
}
