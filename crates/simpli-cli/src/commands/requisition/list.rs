use simpli_api::requisitions::RequisitionFilter;
use simpli_core::enums::RequisitionStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_status;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    search: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let filter = RequisitionFilter {
        status: status
            .map(|raw| parse_status::<RequisitionStatus>(raw, "status"))
            .transpose()?,
        search: search.map(str::to_string),
        limit: Some(limit),
    };

    let mut requisitions = ctx.client.list_requisitions(&filter).await?;
    requisitions.truncate(usize::try_from(limit)?);

    output(&requisitions, flags.format)
}
