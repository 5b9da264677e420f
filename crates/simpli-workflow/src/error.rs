use simpli_api::ApiError;
use simpli_core::CoreError;
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("not permitted to {action}: requires one of {required}")]
    NotPermitted { action: String, required: String },

    #[error("{action} does not apply to a {entity}")]
    UnsupportedAction { action: String, entity: String },

    #[error("rejection must be confirmed before it is sent")]
    ConfirmationRequired,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ValidationErrors> for WorkflowError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
