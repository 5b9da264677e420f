pub(crate) mod decide;
mod get;
mod list;
mod submit;

use simpli_core::enums::ApprovalAction;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequisitionCommands;
use crate::context::AppContext;

/// Handle `simpli requisition <subcommand>`.
pub async fn handle(
    action: &RequisitionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RequisitionCommands::List {
            status,
            search,
            limit,
        } => list::run(status.as_deref(), search.as_deref(), *limit, ctx, flags).await,
        RequisitionCommands::Get { id } => get::run(id, ctx, flags).await,
        RequisitionCommands::Submit { id } => submit::run(id, ctx, flags).await,
        RequisitionCommands::Approve { id, form } => {
            decide::run(id, ApprovalAction::Approve, form, ctx, flags).await
        }
        RequisitionCommands::RequestModification { id, form } => {
            decide::run(id, ApprovalAction::RequestModification, form, ctx, flags).await
        }
        RequisitionCommands::ApproveAndCreatePo { id, form } => {
            decide::run(id, ApprovalAction::ApproveAndCreatePo, form, ctx, flags).await
        }
        RequisitionCommands::Reject { id, form, confirm } => {
            decide::reject(id, form, *confirm, ctx, flags).await
        }
        RequisitionCommands::RetryPo { id, form } => decide::retry_po(id, form, ctx, flags).await,
    }
}
