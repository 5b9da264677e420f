use serde::Serialize;
use simpli_auth::SessionStore;
use simpli_auth::cookies::clear_cookies;
use simpli_config::SimpliConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    cookies: Vec<String>,
}

pub fn handle(flags: &GlobalFlags, config: &SimpliConfig) -> anyhow::Result<()> {
    simpli_auth::logout()?;
    SessionStore::from_config(&config.session)?.clear()?;

    output(
        &AuthLogoutResponse {
            cleared: true,
            cookies: clear_cookies(&config.cookies)
                .iter()
                .map(|c| c.to_set_cookie_header())
                .collect(),
        },
        flags.format,
    )
}
