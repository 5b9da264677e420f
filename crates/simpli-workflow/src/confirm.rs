//! Two-step rejection.
//!
//! A [`Rejection`] starts [`Unconfirmed`]; only [`Rejection::confirm`] turns
//! it into the [`Confirmed`] value the coordinator accepts.

use std::marker::PhantomData;

use simpli_core::enums::EntityKind;

use crate::validation::ApprovalForm;

#[derive(Debug, Clone, Copy)]
pub struct Unconfirmed;

#[derive(Debug, Clone, Copy)]
pub struct Confirmed;

#[derive(Debug, Clone)]
pub struct Rejection<State> {
    kind: EntityKind,
    id: String,
    form: ApprovalForm,
    _state: PhantomData<State>,
}

impl Rejection<Unconfirmed> {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>, form: ApprovalForm) -> Self {
        Self {
            kind,
            id: id.into(),
            form,
            _state: PhantomData,
        }
    }

    /// The question shown before the second step.
    #[must_use]
    pub fn prompt(&self) -> String {
        let noun = match self.kind {
            EntityKind::Requisition => "requisition",
            EntityKind::PurchaseOrder => "purchase order",
        };
        format!("Reject {noun} {}? This cannot be undone.", self.id)
    }

    #[must_use]
    pub fn confirm(self) -> Rejection<Confirmed> {
        Rejection {
            kind: self.kind,
            id: self.id,
            form: self.form,
            _state: PhantomData,
        }
    }
}

impl<State> Rejection<State> {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn form(&self) -> &ApprovalForm {
        &self.form
    }
}
