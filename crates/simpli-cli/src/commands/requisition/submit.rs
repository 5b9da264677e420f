use simpli_workflow::ApprovalCoordinator;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let coordinator = ApprovalCoordinator::new(&ctx.client, ctx.membership()?);
    let requisition = coordinator.submit(id).await?;
    output(&requisition, flags.format)
}
