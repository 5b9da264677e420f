//! Auth cookie settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Browsers cap cookie lifetimes at 400 days.
pub const MAX_COOKIE_TTL_SECS: u64 = 400 * 24 * 60 * 60;

const fn default_access_ttl() -> u64 {
    60 * 60
}

const fn default_refresh_ttl() -> u64 {
    30 * 24 * 60 * 60
}

fn default_local_domain() -> String {
    "localhost".to_string()
}

fn default_production_domain() -> String {
    "simplip2p.com".to_string()
}

const fn default_secure() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    #[serde(default = "default_production_domain")]
    pub production_domain: String,

    #[serde(default = "default_local_domain")]
    pub local_domain: String,

    /// Lifetime of the `accessToken` cookie (1 hour).
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    /// Lifetime of the `refreshToken` cookie (30 days).
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// Mark production cookies `Secure`. Never applied to the local domain.
    #[serde(default = "default_secure")]
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            production_domain: default_production_domain(),
            local_domain: default_local_domain(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            secure: default_secure(),
        }
    }
}

impl CookieConfig {
    /// Both domains cookies are issued for, local first. Empty entries are skipped.
    pub fn domains(&self) -> Vec<&str> {
        [self.local_domain.as_str(), self.production_domain.as_str()]
            .into_iter()
            .filter(|d| !d.is_empty())
            .collect()
    }

    /// Both lifetimes must be in `1..=MAX_COOKIE_TTL_SECS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, secs) in [
            ("cookies.access_token_ttl_secs", self.access_token_ttl_secs),
            ("cookies.refresh_token_ttl_secs", self.refresh_token_ttl_secs),
        ] {
            if secs == 0 || secs > MAX_COOKIE_TTL_SECS {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("{secs} is outside 1..={MAX_COOKIE_TTL_SECS} seconds"),
                });
            }
        }
        Ok(())
    }
}
