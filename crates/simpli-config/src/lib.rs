//! # simpli-config
//!
//! Layered configuration loading for SimpliP2P using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIMPLI_*` prefix, `__` as separator)
//! 2. Project-level `.simpli/config.toml`
//! 3. User-level `~/.config/simpli/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIMPLI_API__BASE_URL` -> `api.base_url`,
//! `SIMPLI_ACCESS__UNMATCHED_ROUTES` -> `access.unmatched_routes`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use simpli_config::SimpliConfig;
//!
//! let config = SimpliConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API: {}", config.api.base_url);
//! }
//! ```

mod access;
mod api;
mod cookies;
mod error;
mod general;
mod session;

pub use access::AccessConfig;
pub use api::ApiConfig;
pub use cookies::{CookieConfig, MAX_COOKIE_TTL_SECS};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimpliConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cookies: CookieConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SimpliConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".simpli/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SIMPLI_").split("__"))
    }

    /// Cross-field validation after extraction.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.cookies.validate()?;
        if self.session.storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "session.storage_key".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Fail with `NotConfigured` when the API base URL is missing.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        if self.api.is_configured() {
            Ok(&self.api)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("simpli").join("config.toml"))
    }

    /// Load `.env` from the workspace root, walking up from `CARGO_MANIFEST_DIR`
    /// when set, otherwise from the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
