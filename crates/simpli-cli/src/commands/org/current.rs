use serde::Serialize;
use simpli_auth::EffectivePermissions;
use simpli_core::enums::PermissionTag;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CurrentOrgResponse<'a> {
    org_id: &'a str,
    org_name: &'a str,
    role: &'a str,
    creator: bool,
    selected_requisition: Option<&'a str>,
    effective_permissions: Vec<PermissionTag>,
}

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let membership = ctx.membership()?;
    let permissions = EffectivePermissions::resolve(membership);

    output(
        &CurrentOrgResponse {
            org_id: &membership.org_id,
            org_name: membership.org_name.as_str(),
            role: &membership.role,
            creator: membership.is_creator,
            selected_requisition: ctx.session.selected_requisition.as_deref(),
            effective_permissions: permissions.tags().collect(),
        },
        flags.format,
    )
}
