use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let requisition = ctx.client.get_requisition(id).await?;

    ctx.session.select_requisition(Some(requisition.id.clone()));
    ctx.commit_session()?;

    output(&requisition, flags.format)
}
