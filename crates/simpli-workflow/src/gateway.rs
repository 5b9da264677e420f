//! Remote operations the coordinator needs, abstracted so tests can count calls.

use std::future::Future;

use simpli_api::orders::NewPurchaseOrder;
use simpli_api::{ApiClient, ApiError, TransitionRequest};
use simpli_core::entities::{PurchaseOrder, Requisition};

pub trait WorkflowGateway: Send + Sync {
    /// Organization the calls act in.
    fn org_id(&self) -> &str;

    fn fetch_requisition(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Requisition, ApiError>> + Send;

    fn fetch_order(&self, id: &str) -> impl Future<Output = Result<PurchaseOrder, ApiError>> + Send;

    fn transition_requisition(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> impl Future<Output = Result<Requisition, ApiError>> + Send;

    fn transition_order(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> impl Future<Output = Result<PurchaseOrder, ApiError>> + Send;

    fn submit_requisition(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Requisition, ApiError>> + Send;

    /// Create an order. Repeating a call with the same `idempotency_key`
    /// returns the first order instead of creating another.
    fn create_order(
        &self,
        order: &NewPurchaseOrder,
        idempotency_key: &str,
    ) -> impl Future<Output = Result<PurchaseOrder, ApiError>> + Send;

    /// Drop cached results of `queries` for the current org.
    fn invalidate(&self, queries: &[&str]);
}

impl WorkflowGateway for ApiClient {
    fn org_id(&self) -> &str {
        Self::org_id(self)
    }

    async fn fetch_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        self.get_requisition(id).await
    }

    async fn fetch_order(&self, id: &str) -> Result<PurchaseOrder, ApiError> {
        self.get_order(id).await
    }

    async fn transition_requisition(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<Requisition, ApiError> {
        self.update_requisition_status(id, body).await
    }

    async fn transition_order(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<PurchaseOrder, ApiError> {
        self.update_order_status(id, body).await
    }

    async fn submit_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        Self::submit_requisition(self, id).await
    }

    async fn create_order(
        &self,
        order: &NewPurchaseOrder,
        idempotency_key: &str,
    ) -> Result<PurchaseOrder, ApiError> {
        Self::create_order(self, order, idempotency_key).await
    }

    fn invalidate(&self, queries: &[&str]) {
        Self::invalidate(self, queries);
    }
}
