use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct OrgRow<'a> {
    org_id: &'a str,
    org_name: &'a str,
    role: &'a str,
    creator: bool,
    active: bool,
    current: bool,
    permissions: usize,
}

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let current = ctx.session.current_org();
    let rows = ctx
        .memberships
        .iter()
        .map(|m| OrgRow {
            org_id: &m.org_id,
            org_name: m.org_name.as_str(),
            role: &m.role,
            creator: m.is_creator,
            active: m.is_active(),
            current: current == Some(m.org_id.as_str()),
            permissions: m.permissions.len(),
        })
        .collect::<Vec<_>>();

    output(&rows, flags.format)
}
