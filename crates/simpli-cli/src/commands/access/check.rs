use serde::Serialize;
use simpli_auth::guard::GuardState;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AccessCheckResponse<'a> {
    path: &'a str,
    allowed: bool,
    redirect: Option<&'a str>,
    trail: &'a [GuardState],
}

pub fn run(path: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let navigation = ctx.guard().evaluate(true, path);
    tracing::debug!(path, state = ?navigation.state(), "evaluated navigation");

    output(
        &AccessCheckResponse {
            path: &navigation.path,
            allowed: navigation.is_allowed(),
            redirect: navigation.redirect(),
            trail: &navigation.trail,
        },
        flags.format,
    )
}
