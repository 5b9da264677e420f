use serde::Serialize;
use simpli_auth::paths::{DASHBOARD_FEATURE, org_path};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct OrgSwitchResponse {
    switched: bool,
    org_id: String,
    org_name: String,
    dashboard: String,
}

pub fn run(target: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let previous = ctx.session.current_org().map(str::to_string);
    let membership = ctx.session.switch_org(&ctx.memberships, target)?;

    let response = OrgSwitchResponse {
        switched: previous.as_deref() != Some(membership.org_id.as_str()),
        org_id: membership.org_id.clone(),
        org_name: membership.org_name.as_str().to_string(),
        dashboard: org_path(&membership.org_name, DASHBOARD_FEATURE),
    };

    if let Some(previous) = previous.filter(|_| response.switched) {
        ctx.client.cache().invalidate_org(&previous);
    }
    ctx.commit_session()?;

    output(&response, flags.format)
}
