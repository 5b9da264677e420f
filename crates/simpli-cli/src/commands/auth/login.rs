use std::io::BufRead;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use simpli_api::ApiClient;
use simpli_auth::cookies::issue_cookies;
use simpli_auth::{AuthTokens, CookieJar, NavigationGuard, SessionStore};
use simpli_config::SimpliConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    name: String,
    email: String,
    org_id: Option<String>,
    org_name: Option<String>,
    landing: String,
    issued_cookies: Vec<String>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &SimpliConfig,
) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password()?,
    };

    let client = ApiClient::new(config.require_api()?)?;
    let login = client
        .login(&args.email, &password)
        .await
        .context("auth login failed")?;

    let tokens = AuthTokens {
        access_token: login.access_token,
        refresh_token: login.refresh_token,
    };
    let cookies = issue_cookies(&tokens, &config.cookies, Utc::now())?;
    simpli_auth::token_store::store(&CookieJar::from_specs(&cookies))?;

    let memberships = client
        .with_token(tokens.access_token.as_str())
        .memberships()
        .await
        .context("failed to load organization memberships")?;

    let store = SessionStore::from_config(&config.session)?;
    let mut session = store.load()?;
    session.ensure_org(&memberships);
    store.save(&session)?;

    let landing = NavigationGuard::new(
        simpli_auth::RouteTable::new(config.access.unmatched_routes),
        &memberships,
    )
    .with_preferred_org(session.current_org())
    .landing_path();

    tracing::info!(user_id = %login.user.user_id, org_id = ?session.current_org(), "signed in");

    output(
        &AuthLoginResponse {
            authenticated: true,
            name: login.user.display_name(),
            user_id: login.user.user_id,
            email: login.user.email,
            org_id: session.current_org().map(str::to_string),
            org_name: session
                .current_org()
                .map(|_| session.org_name.as_str().to_string()),
            landing,
            issued_cookies: cookies
                .iter()
                .map(|c| format!("{}@{}", c.name, c.domain))
                .collect(),
        },
        flags.format,
    )
}

fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("auth login: no password given (use --password or pipe it on stdin)");
    }
    Ok(password)
}
