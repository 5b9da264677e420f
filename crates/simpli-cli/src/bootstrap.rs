use anyhow::Context;
use simpli_config::SimpliConfig;

/// Load `.env` (if any) and the layered configuration.
pub fn load_config() -> anyhow::Result<SimpliConfig> {
    SimpliConfig::load_with_dotenv().context("failed to load simpli configuration")
}
