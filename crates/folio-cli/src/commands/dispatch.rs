use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::handle(&args, ctx, flags),
        Commands::Coverage(args) => commands::coverage::handle(&args, ctx, flags),
        Commands::Topics(args) => commands::topics::handle(&args, ctx, flags),
        Commands::Manifest { action } => commands::manifest::handle(&action, ctx, flags),
    }
}
