use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RequisitionStatus;

/// A purchase requisition raised by a member and decided by an approver.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Requisition {
    pub id: String,
    pub pr_number: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: RequisitionStatus,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub budget_id: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
