//! Budgets, suppliers, and members: the pick lists approval forms draw from.

use serde::{Deserialize, Serialize};
use simpli_core::entities::{Budget, Supplier};

use crate::{ApiClient, error::ApiError, queries};

/// A person in the current organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl ApiClient {
    /// # Errors
    ///
    /// [`ApiError::OrganizationRequired`] without a current org, or any
    /// transport/status/parse error.
    pub async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.cached_get(queries::BUDGETS, "/budgets", &[]).await
    }

    /// # Errors
    ///
    /// As [`Self::list_budgets`].
    pub async fn list_suppliers(&self, search: Option<&str>) -> Result<Vec<Supplier>, ApiError> {
        let params = [("search", search.unwrap_or_default().to_string())];
        self.cached_get(queries::SUPPLIERS, "/suppliers", &params)
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_budgets`].
    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.cached_get(queries::MEMBERS, "/members", &[]).await
    }
}
