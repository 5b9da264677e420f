use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A departmental budget that approvals are charged against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Budget {
    pub id: String,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub balance: Option<f64>,
}
