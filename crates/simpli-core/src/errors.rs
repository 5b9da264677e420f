//! Cross-cutting error types for SimpliP2P.
//!
//! Crate-specific errors (`AuthError`, `ApiError`, `WorkflowError`) live in
//! their own crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any SimpliP2P crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A status transition was attempted that the state machine does not allow.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// A second membership was added for an organization the user already belongs to.
    #[error("Duplicate membership for organization {org_id}")]
    DuplicateMembership { org_id: String },

    /// A permission string outside the closed vocabulary.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
