//! Purchase order endpoints.

use serde::Serialize;
use simpli_core::entities::PurchaseOrder;
use simpli_core::enums::OrderStatus;

use crate::{ApiClient, TransitionRequest, error::ApiError, queries};

/// Header that makes `POST /purchase-orders` safe to repeat.
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Body of `POST /purchase-orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPurchaseOrder {
    pub requisition_id: String,
    pub budget_id: String,
    pub supplier_id: Option<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub limit: Option<u32>,
}

impl OrderFilter {
    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "status",
                self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
            ),
            (
                "limit",
                self.limit.map(|l| l.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

fn order_path(id: &str) -> String {
    format!("/purchase-orders/{}", urlencoding::encode(id))
}

impl ApiClient {
    /// # Errors
    ///
    /// [`ApiError::OrganizationRequired`] without a current org, or any
    /// transport/status/parse error.
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<PurchaseOrder>, ApiError> {
        self.cached_get(queries::ORDERS, "/purchase-orders", &filter.params())
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_orders`].
    pub async fn get_order(&self, id: &str) -> Result<PurchaseOrder, ApiError> {
        self.cached_get(queries::ORDER, &order_path(id), &[]).await
    }

    /// `POST /purchase-orders` with an idempotency key, so a retried create
    /// returns the order made by the first attempt.
    ///
    /// # Errors
    ///
    /// Transport, status, or parse errors.
    pub async fn create_order(
        &self,
        order: &NewPurchaseOrder,
        idempotency_key: &str,
    ) -> Result<PurchaseOrder, ApiError> {
        let request = self
            .post("/purchase-orders")
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(order);
        self.send(request).await
    }

    /// `PATCH /purchase-orders/{id}/status`.
    ///
    /// # Errors
    ///
    /// Transport, status, or parse errors.
    pub async fn update_order_status(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<PurchaseOrder, ApiError> {
        let path = format!("{}/status", order_path(id));
        self.send(self.patch(&path).json(body)).await
    }
}
