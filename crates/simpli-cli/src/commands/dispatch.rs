use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(&action, ctx, flags),
        Commands::Access { action } => commands::access::handle(&action, ctx, flags),
        Commands::Requisition { action } => {
            commands::requisition::handle(&action, ctx, flags).await
        }
        Commands::Order { action } => commands::order::handle(&action, ctx, flags).await,
        Commands::Budget { action } => commands::directory::budgets(&action, ctx, flags).await,
        Commands::Supplier { action } => {
            commands::directory::suppliers(&action, ctx, flags).await
        }
        Commands::Member { action } => commands::directory::members(&action, ctx, flags).await,
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}
