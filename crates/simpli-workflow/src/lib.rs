//! # simpli-workflow
//!
//! Approval decisions on purchase requisitions and purchase orders:
//! form validation, two-step rejection, and the [`ApprovalCoordinator`] that
//! sends each transition once and reconciles the query cache afterward.

pub mod confirm;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod validation;

pub use confirm::{Confirmed, Rejection, Unconfirmed};
pub use coordinator::{
    ApprovalCoordinator, ApprovalOutcome, PartiallyApplied, order_idempotency_key,
};
pub use error::WorkflowError;
pub use gateway::WorkflowGateway;
pub use validation::{ApprovalForm, ValidationErrors, can_submit};
