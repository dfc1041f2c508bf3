mod compact;
mod list;
mod report;
mod stats;

use folio_manifest::ArtifactManifest;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ManifestCommands;
use crate::context::AppContext;

/// Handle `folio manifest`.
pub fn handle(action: &ManifestCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut manifest = ArtifactManifest::open(&ctx.output_dir);
    match action {
        ManifestCommands::Stats => stats::run(&manifest, flags),
        ManifestCommands::List {
            course,
            unit,
            topic_type,
            difficulty,
        } => list::run(
            &manifest,
            course.as_deref(),
            *unit,
            topic_type.as_deref(),
            *difficulty,
            flags,
        ),
        ManifestCommands::Report { kind, output } => report::run(&manifest, *kind, output.as_deref(), flags),
        ManifestCommands::Compact => compact::run(&mut manifest, flags),
    }
}
