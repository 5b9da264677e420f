use serde::Serialize;
use simpli_auth::check_permission;
use simpli_core::enums::PermissionTag;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_permissions;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AccessCanResponse<'a> {
    org_id: &'a str,
    required_any_of: Vec<PermissionTag>,
    allowed: bool,
}

pub fn run(raw: &[String], ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let required = parse_permissions(raw)?;
    let membership = ctx.membership()?;

    output(
        &AccessCanResponse {
            org_id: &membership.org_id,
            allowed: check_permission(membership, &required),
            required_any_of: required,
        },
        flags.format,
    )
}
