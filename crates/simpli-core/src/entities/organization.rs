use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::org_name::OrgName;

/// A tenant. `name` is the sanitized form used in route paths.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    pub id: String,
    pub name: OrgName,
}
