//! Route access settings.

use serde::{Deserialize, Serialize};
use simpli_core::enums::UnmatchedRoutePolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessConfig {
    /// Decision for paths the route table does not cover (`allow` or `deny`).
    #[serde(default)]
    pub unmatched_routes: UnmatchedRoutePolicy,
}
