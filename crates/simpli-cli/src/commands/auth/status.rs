use chrono::Utc;
use serde::Serialize;
use simpli_auth::cookies::{ACCESS_TOKEN, REFRESH_TOKEN};
use simpli_auth::expiry::usable_access_token;
use simpli_auth::token_store;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    token_source: Option<&'static str>,
    access_expires_at: Option<String>,
    refresh_expires_at: Option<String>,
    note: Option<String>,
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match token_store::load() {
        Some((jar, source)) => {
            let checked = usable_access_token(&jar, Utc::now());
            AuthStatusResponse {
                authenticated: checked.is_ok(),
                token_source: Some(source.as_str()),
                access_expires_at: jar.expires(ACCESS_TOKEN).map(|t| t.to_rfc3339()),
                refresh_expires_at: jar.expires(REFRESH_TOKEN).map(|t| t.to_rfc3339()),
                note: checked.err().map(|error| error.to_string()),
            }
        }
        None => AuthStatusResponse {
            authenticated: false,
            token_source: None,
            access_expires_at: None,
            refresh_expires_at: None,
            note: Some("no stored session".into()),
        },
    };

    output(&status, flags.format)
}
