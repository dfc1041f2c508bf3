use std::path::Path;

use anyhow::Context;
use folio_manifest::{ArtifactManifest, ReportFormat};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportKind;

pub fn run(
    manifest: &ArtifactManifest,
    kind: ReportKind,
    destination: Option<&Path>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match kind {
        ReportKind::Html => {
            let written = manifest
                .write_index(destination)
                .context("failed to write worksheet index")?;
            if !flags.quiet {
                eprintln!("Index written to {}", written.display());
            }
        }
        ReportKind::Json => {
            let report = manifest.generate_report(ReportFormat::Json);
            match destination {
                Some(path) => {
                    std::fs::write(path, report)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    if !flags.quiet {
                        eprintln!("Report written to {}", path.display());
                    }
                }
                None => println!("{report}"),
            }
        }
    }
    Ok(())
}
