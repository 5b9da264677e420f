//! Remote API connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "simplip2p/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend, e.g. `https://api.simplip2p.com/v1`.
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    /// Base URL without a trailing slash, so paths can be appended with `/`.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Check field values that figment cannot express as types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.is_configured()
            && !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: format!("'{}' must start with http:// or https://", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}
