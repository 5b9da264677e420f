//! Approval action coordinator.
//!
//! For one decision the coordinator:
//! 1. validates the form locally (no remote call on failure),
//! 2. checks the acting membership may decide,
//! 3. fetches the entity and checks it is `PENDING`,
//! 4. sends the transition exactly once,
//! 5. invalidates the affected org-scoped queries.
//!
//! Failures are returned as-is; nothing is retried automatically.
//! `approve_and_create_po` approves the requisition and then creates the
//! order under an idempotency key derived from the requisition id. When the
//! second step fails the result is [`ApprovalOutcome::PartiallyApplied`] and
//! [`ApprovalCoordinator::retry_order_creation`] finishes it.

use serde::Serialize;
use simpli_api::orders::NewPurchaseOrder;
use simpli_api::queries;
use simpli_auth::EffectivePermissions;
use simpli_core::CoreError;
use simpli_core::entities::{OrganizationMembership, PurchaseOrder, Requisition};
use simpli_core::enums::{ApprovalAction, EntityKind, PermissionTag, RequisitionStatus};

use crate::confirm::{Confirmed, Rejection};
use crate::error::WorkflowError;
use crate::gateway::WorkflowGateway;
use crate::validation::{ApprovalForm, ValidatedForm};

const REQUISITION_QUERIES: &[&str] = &[
    queries::REQUISITIONS,
    queries::REQUISITION,
    queries::BUDGETS,
];
const ORDER_QUERIES: &[&str] = &[queries::ORDERS, queries::ORDER, queries::BUDGETS];

const DECIDE_REQUISITIONS: &[PermissionTag] = &[PermissionTag::ManagePurchaseRequisitions];
const DECIDE_ORDERS: &[PermissionTag] = &[PermissionTag::ManagePurchaseOrders];
const CREATE_ORDERS: &[PermissionTag] = &[PermissionTag::CreatePurchaseOrders];
const SUBMIT_REQUISITIONS: &[PermissionTag] = &[PermissionTag::CreatePurchaseRequisitions];

/// Idempotency key for the order created from `requisition_id`.
#[must_use]
pub fn order_idempotency_key(requisition_id: &str) -> String {
    format!("po-from-requisition-{requisition_id}")
}

/// The approved half of a compound action whose order was not created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartiallyApplied {
    pub requisition: Requisition,
    pub idempotency_key: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApprovalOutcome {
    Requisition {
        requisition: Requisition,
    },
    Order {
        order: PurchaseOrder,
    },
    RequisitionWithOrder {
        requisition: Requisition,
        order: PurchaseOrder,
    },
    PartiallyApplied(PartiallyApplied),
}

impl ApprovalOutcome {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        !matches!(self, Self::PartiallyApplied(_))
    }
}

pub struct ApprovalCoordinator<'a, G> {
    gateway: &'a G,
    permissions: EffectivePermissions,
}

impl<'a, G: WorkflowGateway> ApprovalCoordinator<'a, G> {
    #[must_use]
    pub fn new(gateway: &'a G, membership: &OrganizationMembership) -> Self {
        Self {
            gateway,
            permissions: EffectivePermissions::resolve(membership),
        }
    }

    fn require(&self, action: &str, required: &[PermissionTag]) -> Result<(), WorkflowError> {
        if self.permissions.allows_any(required) {
            return Ok(());
        }
        Err(WorkflowError::NotPermitted {
            action: action.to_string(),
            required: required
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Approve, or request modification of, a pending requisition.
    ///
    /// `Reject` must go through [`Self::reject`]; `ApproveAndCreatePo` is
    /// forwarded to [`Self::approve_and_create_po`].
    ///
    /// # Errors
    ///
    /// Validation, permission, transition, or API errors.
    pub async fn decide_requisition(
        &self,
        id: &str,
        action: ApprovalAction,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        match action {
            ApprovalAction::Reject => Err(WorkflowError::ConfirmationRequired),
            ApprovalAction::ApproveAndCreatePo => self.approve_and_create_po(id, form).await,
            ApprovalAction::Approve | ApprovalAction::RequestModification => {
                self.transition_requisition(id, action, form).await
            }
        }
    }

    /// Approve a pending order. `Reject` must go through [`Self::reject`].
    ///
    /// # Errors
    ///
    /// Validation, permission, transition, or API errors.
    pub async fn decide_order(
        &self,
        id: &str,
        action: ApprovalAction,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        if action.requires_confirmation() {
            return Err(WorkflowError::ConfirmationRequired);
        }
        self.transition_order(id, action, form).await
    }

    /// Send a confirmed rejection.
    ///
    /// # Errors
    ///
    /// Validation, permission, transition, or API errors.
    pub async fn reject(
        &self,
        rejection: Rejection<Confirmed>,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        match rejection.kind() {
            EntityKind::Requisition => {
                let (id, form) = (rejection.id(), rejection.form());
                self.transition_requisition(id, ApprovalAction::Reject, form).await
            }
            EntityKind::PurchaseOrder => {
                self.transition_order(rejection.id(), ApprovalAction::Reject, rejection.form())
                    .await
            }
        }
    }

    async fn transition_requisition(
        &self,
        id: &str,
        action: ApprovalAction,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        let validated = form.validate_for(EntityKind::Requisition, None)?;
        self.require(action.as_str(), DECIDE_REQUISITIONS)?;

        let current = self.gateway.fetch_requisition(id).await?;
        let target = action.requisition_target();
        ensure_requisition_transition(&current, target)?;

        let requisition = self
            .gateway
            .transition_requisition(id, &validated.transition(target.as_str()))
            .await?;
        self.gateway.invalidate(REQUISITION_QUERIES);
        tracing::info!(
            org_id = self.gateway.org_id(),
            requisition_id = id,
            action = %action,
            status = %requisition.status,
            "requisition transitioned"
        );
        Ok(ApprovalOutcome::Requisition { requisition })
    }

    async fn transition_order(
        &self,
        id: &str,
        action: ApprovalAction,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        let Some(target) = action.order_target() else {
            return Err(WorkflowError::UnsupportedAction {
                action: action.to_string(),
                entity: EntityKind::PurchaseOrder.to_string(),
            });
        };
        form.validate_basics()?;
        self.require(action.as_str(), DECIDE_ORDERS)?;

        let current = self.gateway.fetch_order(id).await?;
        let validated =
            form.validate_for(EntityKind::PurchaseOrder, current.supplier_id.as_deref())?;
        if !current.status.can_transition_to(target) {
            return Err(CoreError::InvalidTransition {
                entity_type: EntityKind::PurchaseOrder.to_string(),
                id: id.to_string(),
                from: current.status.to_string(),
                to: target.to_string(),
            }
            .into());
        }

        let order = self
            .gateway
            .transition_order(id, &validated.transition(target.as_str()))
            .await?;
        self.gateway.invalidate(ORDER_QUERIES);
        tracing::info!(
            org_id = self.gateway.org_id(),
            order_id = id,
            action = %action,
            status = %order.status,
            "purchase order transitioned"
        );
        Ok(ApprovalOutcome::Order { order })
    }

    /// Approve a pending requisition and create its purchase order.
    ///
    /// The order needs a supplier from the form or the requisition; without
    /// one nothing is written. If the requisition is already approved (an
    /// earlier attempt got that far) only the order is created.
    ///
    /// # Errors
    ///
    /// Validation, permission, transition, or API errors from the approval
    /// step. A failure of the order step is reported as
    /// [`ApprovalOutcome::PartiallyApplied`] instead.
    pub async fn approve_and_create_po(
        &self,
        id: &str,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        form.validate_basics()?;
        let action = ApprovalAction::ApproveAndCreatePo;
        self.require(action.as_str(), DECIDE_REQUISITIONS)?;
        self.require(action.as_str(), CREATE_ORDERS)?;

        let current = self.gateway.fetch_requisition(id).await?;
        let validated =
            form.validate_for(EntityKind::PurchaseOrder, current.supplier_id.as_deref())?;
        let requisition = if current.status == RequisitionStatus::Approved {
            tracing::info!(
                requisition_id = id,
                "requisition already approved; creating order only"
            );
            current
        } else {
            let target = action.requisition_target();
            ensure_requisition_transition(&current, target)?;
            let approved = self
                .gateway
                .transition_requisition(id, &validated.transition(target.as_str()))
                .await?;
            self.gateway.invalidate(REQUISITION_QUERIES);
            approved
        };

        Ok(self.create_order_for(requisition, &validated).await)
    }

    /// Finish a [`ApprovalOutcome::PartiallyApplied`] compound action.
    ///
    /// # Errors
    ///
    /// Validation or permission errors, an API error fetching the
    /// requisition, or `InvalidTransition` if it is not approved.
    pub async fn retry_order_creation(
        &self,
        requisition_id: &str,
        form: &ApprovalForm,
    ) -> Result<ApprovalOutcome, WorkflowError> {
        form.validate_basics()?;
        self.require("create_purchase_order", CREATE_ORDERS)?;

        let requisition = self.gateway.fetch_requisition(requisition_id).await?;
        if requisition.status != RequisitionStatus::Approved {
            return Err(CoreError::InvalidTransition {
                entity_type: EntityKind::Requisition.to_string(),
                id: requisition_id.to_string(),
                from: requisition.status.to_string(),
                to: "purchase order".to_string(),
            }
            .into());
        }
        let validated =
            form.validate_for(EntityKind::PurchaseOrder, requisition.supplier_id.as_deref())?;
        Ok(self.create_order_for(requisition, &validated).await)
    }

    async fn create_order_for(
        &self,
        requisition: Requisition,
        validated: &ValidatedForm,
    ) -> ApprovalOutcome {
        let key = order_idempotency_key(&requisition.id);
        let new_order = NewPurchaseOrder {
            requisition_id: requisition.id.clone(),
            budget_id: validated.budget_id.clone(),
            supplier_id: validated.supplier_id.clone(),
            justification: validated.justification.clone(),
        };

        match self.gateway.create_order(&new_order, &key).await {
            Ok(order) => {
                self.gateway.invalidate(ORDER_QUERIES);
                tracing::info!(
                    org_id = self.gateway.org_id(),
                    requisition_id = %requisition.id,
                    order_id = %order.id,
                    "purchase order created from requisition"
                );
                ApprovalOutcome::RequisitionWithOrder { requisition, order }
            }
            Err(error) => {
                tracing::warn!(
                    requisition_id = %requisition.id,
                    %error,
                    "requisition approved but order creation failed"
                );
                ApprovalOutcome::PartiallyApplied(PartiallyApplied {
                    requisition,
                    idempotency_key: key,
                    error: error.to_string(),
                })
            }
        }
    }

    /// Submit a saved draft (`SAVED_FOR_LATER → PENDING`).
    ///
    /// # Errors
    ///
    /// Permission, transition, or API errors.
    pub async fn submit(&self, id: &str) -> Result<Requisition, WorkflowError> {
        self.require("submit", SUBMIT_REQUISITIONS)?;
        let current = self.gateway.fetch_requisition(id).await?;
        ensure_requisition_transition(&current, RequisitionStatus::Pending)?;

        let requisition = self.gateway.submit_requisition(id).await?;
        self.gateway.invalidate(REQUISITION_QUERIES);
        tracing::info!(requisition_id = id, "requisition submitted");
        Ok(requisition)
    }
}

fn ensure_requisition_transition(
    current: &Requisition,
    target: RequisitionStatus,
) -> Result<(), CoreError> {
    if current.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            entity_type: EntityKind::Requisition.to_string(),
            id: current.id.clone(),
            from: current.status.to_string(),
            to: target.to_string(),
        })
    }
}
