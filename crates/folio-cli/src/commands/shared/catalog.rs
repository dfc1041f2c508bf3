use anyhow::Context;
use folio_catalog::SyncStats;
use folio_core::TopicType;

use crate::cli::GlobalFlags;
use crate::context::AppContext;

/// Reconcile the configured catalog into the registry.
pub fn sync_catalog(
    ctx: &mut AppContext,
    type_filter: Option<&[TopicType]>,
    flags: &GlobalFlags,
) -> anyhow::Result<SyncStats> {
    let stats = ctx
        .catalog
        .sync_to_registry(&mut ctx.registry, type_filter)
        .with_context(|| format!("failed to load catalog {}", ctx.catalog.path().display()))?;

    if !flags.quiet {
        eprintln!(
            "Synced {} topics from {} ({} new, {} already registered)",
            stats.synced,
            ctx.catalog.path().display(),
            stats.new,
            stats.existing
        );
        let skipped = ctx.catalog.skipped_rows();
        if skipped > 0 && !flags.verbose {
            eprintln!("Skipped {skipped} malformed catalog rows (run with --verbose for details)");
        } else if skipped > 0 {
            eprintln!("Skipped {skipped} malformed catalog rows");
        }
    }
    Ok(stats)
}
