//! Purchase requisition endpoints.

use simpli_core::entities::Requisition;
use simpli_core::enums::RequisitionStatus;

use crate::{ApiClient, TransitionRequest, error::ApiError, queries};

/// Filters for `GET /requisitions`.
#[derive(Debug, Clone, Default)]
pub struct RequisitionFilter {
    pub status: Option<RequisitionStatus>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

impl RequisitionFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "status",
                self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            ),
            ("search", self.search.clone().unwrap_or_default()),
            (
                "limit",
                self.limit.map(|l| l.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

fn requisition_path(id: &str) -> String {
    format!("/requisitions/{}", urlencoding::encode(id))
}

impl ApiClient {
    /// # Errors
    ///
    /// [`ApiError::OrganizationRequired`] without a current org, or any
    /// transport/status/parse error.
    pub async fn list_requisitions(
        &self,
        filter: &RequisitionFilter,
    ) -> Result<Vec<Requisition>, ApiError> {
        self.cached_get(queries::REQUISITIONS, "/requisitions", &filter.params())
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_requisitions`]; a missing id surfaces as a 404 [`ApiError::Api`].
    pub async fn get_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        self.cached_get(queries::REQUISITION, &requisition_path(id), &[])
            .await
    }

    /// `PATCH /requisitions/{id}/status`.
    ///
    /// # Errors
    ///
    /// Transport, status, or parse errors.
    pub async fn update_requisition_status(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<Requisition, ApiError> {
        let path = format!("{}/status", requisition_path(id));
        self.send(self.patch(&path).json(body)).await
    }

    /// `PATCH /requisitions/{id}/submit`: move a saved draft to pending.
    ///
    /// # Errors
    ///
    /// Transport, status, or parse errors.
    pub async fn submit_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        let path = format!("{}/submit", requisition_path(id));
        self.send(self.patch(&path)).await
    }
}
