use simpli_auth::EffectivePermissions;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn run(feature: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let membership = ctx.membership()?;
    let decision = ctx
        .route_table()
        .decide(&EffectivePermissions::resolve(membership), feature);
    output(&decision, flags.format)
}
