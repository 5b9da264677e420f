use simpli_api::orders::OrderFilter;
use simpli_core::enums::OrderStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_status;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let filter = OrderFilter {
        status: status
            .map(|raw| parse_status::<OrderStatus>(raw, "status"))
            .transpose()?,
        limit: Some(limit),
    };

    let mut orders = ctx.client.list_orders(&filter).await?;
    orders.truncate(usize::try_from(limit)?);

    output(&orders, flags.format)
}
