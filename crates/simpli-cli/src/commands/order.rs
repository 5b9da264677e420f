mod decide;
mod get;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrderCommands;
use crate::context::AppContext;

/// Handle `simpli order <subcommand>`.
pub async fn handle(
    action: &OrderCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrderCommands::List { status, limit } => {
            list::run(status.as_deref(), *limit, ctx, flags).await
        }
        OrderCommands::Get { id } => get::run(id, ctx, flags).await,
        OrderCommands::Approve { id, form } => decide::approve(id, form, ctx, flags).await,
        OrderCommands::Reject { id, form, confirm } => {
            decide::reject(id, form, *confirm, ctx, flags).await
        }
    }
}
