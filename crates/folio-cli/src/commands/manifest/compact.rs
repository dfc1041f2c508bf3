use anyhow::Context;
use folio_manifest::ArtifactManifest;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CompactResponse {
    manifest: String,
    entries: usize,
}

pub fn run(manifest: &mut ArtifactManifest, flags: &GlobalFlags) -> anyhow::Result<()> {
    manifest
        .compact()
        .with_context(|| format!("failed to compact {}", manifest.manifest_path().display()))?;
    output(
        &CompactResponse {
            manifest: manifest.manifest_path().display().to_string(),
            entries: manifest.len(),
        },
        flags.format,
    )
}
