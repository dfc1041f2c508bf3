use folio_core::Unit;
use folio_registry::{CapabilityRegistry, TopicRecord};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TopicsArgs;
use crate::commands::shared::catalog::sync_catalog;
use crate::commands::shared::types::parse_types;
use crate::context::AppContext;
use crate::output::output;

/// Handle `folio topics`.
pub fn handle(args: &TopicsArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    sync_catalog(ctx, None, flags)?;
    let topics = select(&ctx.registry, args.unit, &args.types, args.missing);
    output(&topics, flags.format)
}

fn select<'a>(
    registry: &'a CapabilityRegistry,
    unit: Option<Unit>,
    types: &[String],
    missing_only: bool,
) -> Vec<&'a TopicRecord> {
    let types = parse_types(types);
    registry
        .get_all_topics(unit, Some(types.as_slice()))
        .into_iter()
        .filter(|record| !missing_only || !record.is_implemented())
        .collect()
}
