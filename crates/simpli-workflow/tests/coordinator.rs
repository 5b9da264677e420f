//! Coordinator behavior against an in-memory gateway that records every call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use simpli_api::orders::NewPurchaseOrder;
use simpli_api::{ApiError, TransitionRequest};
use simpli_core::entities::{OrganizationMembership, PurchaseOrder, Requisition};
use simpli_core::enums::{
    ApprovalAction, EntityKind, OrderStatus, PermissionTag, RequisitionStatus,
};
use simpli_core::{CoreError, OrgName};
use simpli_workflow::validation::Field;
use simpli_workflow::{
    ApprovalCoordinator, ApprovalForm, ApprovalOutcome, Rejection, WorkflowError,
    WorkflowGateway, order_idempotency_key,
};

#[derive(Default)]
struct FakeGateway {
    requisitions: Mutex<HashMap<String, Requisition>>,
    orders: Mutex<HashMap<String, PurchaseOrder>>,
    created_by_key: Mutex<HashMap<String, PurchaseOrder>>,
    calls: Mutex<Vec<String>>,
    invalidated: Mutex<Vec<String>>,
    create_failures: AtomicU32,
}

impl FakeGateway {
    fn with_requisition(self, id: &str, status: RequisitionStatus) -> Self {
        self.requisitions
            .lock()
            .unwrap()
            .insert(id.to_string(), requisition(id, status));
        self
    }

    fn with_order(self, id: &str, supplier: Option<&str>) -> Self {
        self.orders
            .lock()
            .unwrap()
            .insert(id.to_string(), order(id, supplier));
        self
    }

    fn without_supplier(self, id: &str) -> Self {
        if let Some(entry) = self.requisitions.lock().unwrap().get_mut(id) {
            entry.supplier_id = None;
        }
        self
    }

    fn failing_creates(self, count: u32) -> Self {
        self.create_failures.store(count, Ordering::SeqCst);
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("fetch"))
            .collect()
    }

    fn not_found(id: &str) -> ApiError {
        ApiError::Api {
            status: 404,
            message: format!("{id} not found"),
        }
    }
}

fn timestamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap()
}

fn requisition(id: &str, status: RequisitionStatus) -> Requisition {
    Requisition {
        id: id.to_string(),
        pr_number: format!("PR-{id}"),
        title: "Standing desks".into(),
        description: None,
        status,
        department_id: Some("dept_ops".into()),
        budget_id: Some("budget_ops".into()),
        supplier_id: Some("sup_ikea".into()),
        estimated_cost: Some(4_200.0),
        justification: None,
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

fn order(id: &str, supplier: Option<&str>) -> PurchaseOrder {
    PurchaseOrder {
        id: id.to_string(),
        po_number: format!("PO-{id}"),
        status: OrderStatus::Pending,
        requisition_id: None,
        supplier_id: supplier.map(str::to_string),
        budget_id: Some("budget_ops".into()),
        total_amount: Some(900.0),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

impl WorkflowGateway for FakeGateway {
    fn org_id(&self) -> &str {
        "org_acme"
    }

    async fn fetch_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        self.record(format!("fetch_requisition:{id}"));
        self.requisitions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn fetch_order(&self, id: &str) -> Result<PurchaseOrder, ApiError> {
        self.record(format!("fetch_order:{id}"));
        self.orders
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn transition_requisition(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<Requisition, ApiError> {
        self.record(format!("transition_requisition:{id}:{}", body.status));
        let mut requisitions = self.requisitions.lock().unwrap();
        let entry = requisitions.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        entry.status = serde_json::from_value(serde_json::json!(body.status)).unwrap();
        entry.justification = Some(body.justification.clone());
        Ok(entry.clone())
    }

    async fn transition_order(
        &self,
        id: &str,
        body: &TransitionRequest,
    ) -> Result<PurchaseOrder, ApiError> {
        self.record(format!(
            "transition_order:{id}:{}:{}",
            body.status,
            body.supplier_id.as_deref().unwrap_or("-")
        ));
        let mut orders = self.orders.lock().unwrap();
        let entry = orders.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        entry.status = serde_json::from_value(serde_json::json!(body.status)).unwrap();
        Ok(entry.clone())
    }

    async fn submit_requisition(&self, id: &str) -> Result<Requisition, ApiError> {
        self.record(format!("submit_requisition:{id}"));
        let mut requisitions = self.requisitions.lock().unwrap();
        let entry = requisitions.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        entry.status = RequisitionStatus::Pending;
        Ok(entry.clone())
    }

    async fn create_order(
        &self,
        new_order: &NewPurchaseOrder,
        idempotency_key: &str,
    ) -> Result<PurchaseOrder, ApiError> {
        self.record(format!("create_order:{idempotency_key}"));
        let remaining = self.create_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.create_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::Api {
                status: 503,
                message: "order service unavailable".into(),
            });
        }
        let mut created = self.created_by_key.lock().unwrap();
        let count = created.len();
        let made = created
            .entry(idempotency_key.to_string())
            .or_insert_with(|| {
                let mut po = order(&format!("po_{}", count + 1), new_order.supplier_id.as_deref());
                po.requisition_id = Some(new_order.requisition_id.clone());
                po
            });
        Ok(made.clone())
    }

    fn invalidate(&self, queries: &[&str]) {
        self.invalidated
            .lock()
            .unwrap()
            .extend(queries.iter().map(|q| (*q).to_string()));
    }
}

fn approver(permissions: &[PermissionTag]) -> OrganizationMembership {
    OrganizationMembership {
        org_id: "org_acme".into(),
        org_name: OrgName::new("Acme Corp"),
        role: "approver".into(),
        is_creator: false,
        permissions: permissions.iter().copied().collect(),
        deactivated_at: None,
    }
}

fn manager() -> OrganizationMembership {
    approver(&[
        PermissionTag::ManagePurchaseRequisitions,
        PermissionTag::ManagePurchaseOrders,
    ])
}

fn filled_form() -> ApprovalForm {
    ApprovalForm {
        budget_id: Some("budget_ops".into()),
        supplier_id: None,
        justification: "Replaces broken desks".into(),
    }
}

#[rstest]
#[case(ApprovalAction::Approve, RequisitionStatus::Approved)]
#[case(ApprovalAction::RequestModification, RequisitionStatus::RequestModification)]
#[tokio::test]
async fn pending_requisition_moves_to_target(
    #[case] action: ApprovalAction,
    #[case] expected: RequisitionStatus,
) {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let outcome = coordinator
        .decide_requisition("pr_1", action, &filled_form())
        .await
        .unwrap();

    let ApprovalOutcome::Requisition { requisition } = outcome else {
        panic!("expected a requisition outcome");
    };
    assert_eq!(requisition.status, expected);
    assert_eq!(gateway.writes().len(), 1, "exactly one remote transition");
    assert!(gateway.invalidated.lock().unwrap().contains(&"requisitions".to_string()));
}

#[tokio::test]
async fn confirmed_rejection_rejects() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let rejection = Rejection::new(EntityKind::Requisition, "pr_1", filled_form()).confirm();
    let outcome = coordinator.reject(rejection).await.unwrap();
    let ApprovalOutcome::Requisition { requisition } = outcome else {
        panic!("expected a requisition outcome");
    };
    assert_eq!(requisition.status, RequisitionStatus::Rejected);
}

#[tokio::test]
async fn unconfirmed_rejection_is_refused_without_calls() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_requisition("pr_1", ApprovalAction::Reject, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::ConfirmationRequired));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn empty_justification_never_reaches_the_api() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);
    let form = ApprovalForm {
        justification: "   ".into(),
        ..filled_form()
    };

    for action in [ApprovalAction::Approve, ApprovalAction::ApproveAndCreatePo] {
        let err = coordinator
            .decide_requisition("pr_1", action, &form)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(ref e) if e.has(Field::Justification)));
    }
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn missing_permission_is_refused_without_calls() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = approver(&[PermissionTag::GetPurchaseRequisitions]);
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_requisition("pr_1", ApprovalAction::Approve, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotPermitted { .. }));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn non_pending_requisition_is_not_transitioned() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Rejected);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_requisition("pr_1", ApprovalAction::Approve, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Core(CoreError::InvalidTransition { .. })
    ));
    assert!(gateway.writes().is_empty());
}

#[tokio::test]
async fn api_failure_is_surfaced_once() {
    let gateway = FakeGateway::default();
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_requisition("pr_missing", ApprovalAction::Approve, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Api(ApiError::Api { status: 404, .. })));
    assert_eq!(gateway.calls(), vec!["fetch_requisition:pr_missing"]);
}

#[tokio::test]
async fn approve_and_create_po_does_both() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let outcome = coordinator
        .decide_requisition("pr_1", ApprovalAction::ApproveAndCreatePo, &filled_form())
        .await
        .unwrap();

    let ApprovalOutcome::RequisitionWithOrder { requisition, order } = outcome else {
        panic!("expected both effects");
    };
    assert_eq!(requisition.status, RequisitionStatus::Approved);
    assert_eq!(order.requisition_id.as_deref(), Some("pr_1"));
    assert_eq!(order.supplier_id.as_deref(), Some("sup_ikea"));
    assert_eq!(
        gateway.writes(),
        vec![
            "transition_requisition:pr_1:APPROVED".to_string(),
            format!("create_order:{}", order_idempotency_key("pr_1")),
        ]
    );
}

#[tokio::test]
async fn partial_failure_resumes_without_duplicates() {
    let gateway = FakeGateway::default()
        .with_requisition("pr_1", RequisitionStatus::Pending)
        .failing_creates(1);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let first = coordinator
        .approve_and_create_po("pr_1", &filled_form())
        .await
        .unwrap();
    let ApprovalOutcome::PartiallyApplied(partial) = &first else {
        panic!("expected a partial outcome");
    };
    assert!(!first.is_complete());
    assert_eq!(partial.requisition.status, RequisitionStatus::Approved);
    assert_eq!(partial.idempotency_key, order_idempotency_key("pr_1"));
    assert!(partial.error.contains("503"));

    let resumed = coordinator
        .retry_order_creation("pr_1", &filled_form())
        .await
        .unwrap();
    assert!(resumed.is_complete());

    let again = coordinator
        .approve_and_create_po("pr_1", &filled_form())
        .await
        .unwrap();
    let (
        ApprovalOutcome::RequisitionWithOrder { order: a, .. },
        ApprovalOutcome::RequisitionWithOrder { order: b, .. },
    ) = (&resumed, &again)
    else {
        panic!("expected completed outcomes");
    };
    assert_eq!(a.id, b.id, "same idempotency key yields the same order");
    assert_eq!(gateway.created_by_key.lock().unwrap().len(), 1);

    let approvals = gateway
        .writes()
        .into_iter()
        .filter(|c| c.starts_with("transition_requisition"))
        .count();
    assert_eq!(approvals, 1, "requisition is approved only once");
}

#[tokio::test]
async fn compound_action_without_supplier_writes_nothing() {
    let gateway = FakeGateway::default()
        .with_requisition("pr_9", RequisitionStatus::Pending)
        .without_supplier("pr_9");
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .approve_and_create_po("pr_9", &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(ref e) if e.has(Field::Supplier)));
    assert_eq!(gateway.calls(), vec!["fetch_requisition:pr_9"]);
    assert!(gateway.writes().is_empty());

    let form = ApprovalForm {
        supplier_id: Some("sup_local".into()),
        ..filled_form()
    };
    let outcome = coordinator.approve_and_create_po("pr_9", &form).await.unwrap();
    let ApprovalOutcome::RequisitionWithOrder { order, .. } = outcome else {
        panic!("expected both effects");
    };
    assert_eq!(order.supplier_id.as_deref(), Some("sup_local"));
}

#[tokio::test]
async fn retry_without_supplier_writes_nothing() {
    let gateway = FakeGateway::default()
        .with_requisition("pr_9", RequisitionStatus::Approved)
        .without_supplier("pr_9");
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .retry_order_creation("pr_9", &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(ref e) if e.has(Field::Supplier)));
    assert!(gateway.writes().is_empty());
}

#[tokio::test]
async fn retry_requires_an_approved_requisition() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .retry_order_creation("pr_1", &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Core(CoreError::InvalidTransition { .. })
    ));
    assert!(gateway.writes().is_empty());
}

#[tokio::test]
async fn order_approval_uses_supplier_from_record() {
    let gateway = FakeGateway::default().with_order("po_9", Some("sup_acme"));
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let outcome = coordinator
        .decide_order("po_9", ApprovalAction::Approve, &filled_form())
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        ApprovalOutcome::Order { ref order } if order.status == OrderStatus::Approved
    ));
    assert_eq!(gateway.writes(), vec!["transition_order:po_9:APPROVED:sup_acme"]);
}

#[tokio::test]
async fn order_without_any_supplier_is_not_sent() {
    let gateway = FakeGateway::default().with_order("po_9", None);
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_order("po_9", ApprovalAction::Approve, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(ref e) if e.has(Field::Supplier)));
    assert!(gateway.writes().is_empty());
}

#[tokio::test]
async fn request_modification_does_not_apply_to_orders() {
    let gateway = FakeGateway::default().with_order("po_9", Some("sup_acme"));
    let membership = manager();
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let err = coordinator
        .decide_order("po_9", ApprovalAction::RequestModification, &filled_form())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::UnsupportedAction { .. }));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn submit_moves_draft_to_pending() {
    let gateway =
        FakeGateway::default().with_requisition("pr_draft", RequisitionStatus::SavedForLater);
    let membership = approver(&[PermissionTag::CreatePurchaseRequisitions]);
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    let submitted = coordinator.submit("pr_draft").await.unwrap();
    assert_eq!(submitted.status, RequisitionStatus::Pending);

    let err = coordinator.submit("pr_draft").await.unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Core(CoreError::InvalidTransition { .. })
    ));
}

#[tokio::test]
async fn creator_may_decide_without_explicit_tags() {
    let gateway = FakeGateway::default().with_requisition("pr_1", RequisitionStatus::Pending);
    let mut membership = approver(&[]);
    membership.is_creator = true;
    let coordinator = ApprovalCoordinator::new(&gateway, &membership);

    assert!(
        coordinator
            .decide_requisition("pr_1", ApprovalAction::Approve, &filled_form())
            .await
            .is_ok()
    );
}
