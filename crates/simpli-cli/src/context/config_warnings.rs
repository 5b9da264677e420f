use simpli_config::SimpliConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SimpliConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SimpliConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.api.is_configured() && has_single_underscore_key(&env_keys, "SIMPLI_API") {
        warnings.push(
            "API config appears default while SIMPLI_API* env vars exist. Use double underscores (example: SIMPLI_API__BASE_URL)."
                .to_string(),
        );
    }

    if config.session.state_dir.is_empty() && has_single_underscore_key(&env_keys, "SIMPLI_SESSION")
    {
        warnings.push(
            "Session config appears default while SIMPLI_SESSION* env vars exist. Use double underscores (example: SIMPLI_SESSION__STATE_DIR)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "SIMPLI_ACCESS") {
        warnings.push(
            "SIMPLI_ACCESS* env vars are ignored without double underscores (example: SIMPLI_ACCESS__UNMATCHED_ROUTES)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "SIMPLI_COOKIES") {
        warnings.push(
            "SIMPLI_COOKIES* env vars are ignored without double underscores (example: SIMPLI_COOKIES__PRODUCTION_DOMAIN)."
                .to_string(),
        );
    }

    warnings
}

/// A key under `prefix` that figment will not split into a section field.
fn has_single_underscore_key(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with("__"))
    })
}
