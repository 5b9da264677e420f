//! Approval form validation.
//!
//! Every transition needs a budget and a non-blank justification. Order
//! transitions also need a supplier, taken from the form or, failing that,
//! from the order record.

use std::fmt;

use serde::Serialize;
use simpli_api::TransitionRequest;
use simpli_core::enums::EntityKind;

/// What the approver filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApprovalForm {
    pub budget_id: Option<String>,
    pub supplier_id: Option<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Budget,
    Supplier,
    Justification,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Supplier => "supplier",
            Self::Justification => "justification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All failed fields of one form, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|e| e.field).collect()
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid approval form: ")?;
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", error.field.as_str(), error.message)?;
        }
        Ok(())
    }
}

/// A form that passed validation, with trimmed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm {
    pub budget_id: String,
    pub supplier_id: Option<String>,
    pub justification: String,
}

impl ValidatedForm {
    #[must_use]
    pub fn transition(&self, status: &str) -> TransitionRequest {
        TransitionRequest {
            status: status.to_string(),
            budget_id: self.budget_id.clone(),
            justification: self.justification.clone(),
            supplier_id: self.supplier_id.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ApprovalForm {
    /// Budget and justification only; checkable before anything is fetched.
    ///
    /// # Errors
    ///
    /// Lists each missing field.
    pub fn validate_basics(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if non_blank(self.budget_id.as_deref()).is_none() {
            errors.push(FieldError {
                field: Field::Budget,
                message: "must be selected",
            });
        }
        if self.justification.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Justification,
                message: "must not be empty",
            });
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Full validation for `kind`. `record_supplier` is the supplier already
    /// on the entity, used when the form leaves it blank.
    ///
    /// # Errors
    ///
    /// Lists each missing field.
    pub fn validate_for(
        &self,
        kind: EntityKind,
        record_supplier: Option<&str>,
    ) -> Result<ValidatedForm, ValidationErrors> {
        let supplier_id =
            non_blank(self.supplier_id.as_deref()).or_else(|| non_blank(record_supplier));

        let mut errors = match self.validate_basics() {
            Ok(()) => Vec::new(),
            Err(ValidationErrors(errors)) => errors,
        };
        if kind == EntityKind::PurchaseOrder && supplier_id.is_none() {
            let at = usize::from(errors.first().is_some_and(|e| e.field == Field::Budget));
            errors.insert(
                at,
                FieldError {
                    field: Field::Supplier,
                    message: "must be selected",
                },
            );
        }
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        Ok(ValidatedForm {
            budget_id: non_blank(self.budget_id.as_deref()).unwrap_or_default(),
            supplier_id,
            justification: self.justification.trim().to_string(),
        })
    }
}

/// Whether the submit control should be enabled.
#[must_use]
pub fn can_submit(form: &ApprovalForm, kind: EntityKind, record_supplier: Option<&str>) -> bool {
    form.validate_for(kind, record_supplier).is_ok()
}
