use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Supplier {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
}
