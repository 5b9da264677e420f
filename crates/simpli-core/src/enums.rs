//! Status enums, permission tags, and approval actions for SimpliP2P.
//!
//! Status enums serialize in the backend's `SCREAMING_SNAKE_CASE` form
//! (`"PENDING"`, `"SAVED_FOR_LATER"`); everything else is `snake_case`.
//! Status enums provide `allowed_next_states()` to enforce valid transitions
//! at the application layer.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PermissionTag
// ---------------------------------------------------------------------------

/// A capability granted to an organization member.
///
/// Closed vocabulary. Each resource family has `manage_*`, `create_*` and
/// `get_*` tags (reports only has `get_reports`); `all_permissions` grants
/// everything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTag {
    AllPermissions,
    ManageSuppliers,
    CreateSuppliers,
    GetSuppliers,
    ManagePurchaseRequisitions,
    CreatePurchaseRequisitions,
    GetPurchaseRequisitions,
    ManagePurchaseOrders,
    CreatePurchaseOrders,
    GetPurchaseOrders,
    ManageMembers,
    CreateMembers,
    GetMembers,
    ManageDepartments,
    CreateDepartments,
    GetDepartments,
    ManageBudgets,
    CreateBudgets,
    GetBudgets,
    ManageProducts,
    CreateProducts,
    GetProducts,
    ManageCategories,
    CreateCategories,
    GetCategories,
    ManageRoles,
    CreateRoles,
    GetRoles,
    GetReports,
}

impl PermissionTag {
    pub const ALL: &'static [Self] = &[
        Self::AllPermissions,
        Self::ManageSuppliers,
        Self::CreateSuppliers,
        Self::GetSuppliers,
        Self::ManagePurchaseRequisitions,
        Self::CreatePurchaseRequisitions,
        Self::GetPurchaseRequisitions,
        Self::ManagePurchaseOrders,
        Self::CreatePurchaseOrders,
        Self::GetPurchaseOrders,
        Self::ManageMembers,
        Self::CreateMembers,
        Self::GetMembers,
        Self::ManageDepartments,
        Self::CreateDepartments,
        Self::GetDepartments,
        Self::ManageBudgets,
        Self::CreateBudgets,
        Self::GetBudgets,
        Self::ManageProducts,
        Self::CreateProducts,
        Self::GetProducts,
        Self::ManageCategories,
        Self::CreateCategories,
        Self::GetCategories,
        Self::ManageRoles,
        Self::CreateRoles,
        Self::GetRoles,
        Self::GetReports,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllPermissions => "all_permissions",
            Self::ManageSuppliers => "manage_suppliers",
            Self::CreateSuppliers => "create_suppliers",
            Self::GetSuppliers => "get_suppliers",
            Self::ManagePurchaseRequisitions => "manage_purchase_requisitions",
            Self::CreatePurchaseRequisitions => "create_purchase_requisitions",
            Self::GetPurchaseRequisitions => "get_purchase_requisitions",
            Self::ManagePurchaseOrders => "manage_purchase_orders",
            Self::CreatePurchaseOrders => "create_purchase_orders",
            Self::GetPurchaseOrders => "get_purchase_orders",
            Self::ManageMembers => "manage_members",
            Self::CreateMembers => "create_members",
            Self::GetMembers => "get_members",
            Self::ManageDepartments => "manage_departments",
            Self::CreateDepartments => "create_departments",
            Self::GetDepartments => "get_departments",
            Self::ManageBudgets => "manage_budgets",
            Self::CreateBudgets => "create_budgets",
            Self::GetBudgets => "get_budgets",
            Self::ManageProducts => "manage_products",
            Self::CreateProducts => "create_products",
            Self::GetProducts => "get_products",
            Self::ManageCategories => "manage_categories",
            Self::CreateCategories => "create_categories",
            Self::GetCategories => "get_categories",
            Self::ManageRoles => "manage_roles",
            Self::CreateRoles => "create_roles",
            Self::GetRoles => "get_roles",
            Self::GetReports => "get_reports",
        }
    }
}

impl fmt::Display for PermissionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownPermission(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RequisitionStatus
// ---------------------------------------------------------------------------

/// Status of a purchase requisition.
///
/// ```text
/// saved_for_later ──submit──▶ pending → approved
///                                     → rejected
///                                     → request_modification
/// ```
///
/// `SavedForLater → Pending` is an explicit submission, not an approver
/// action; it is listed here so the state machine is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequisitionStatus {
    SavedForLater,
    Pending,
    Approved,
    Rejected,
    RequestModification,
}

impl RequisitionStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::SavedForLater => &[Self::Pending],
            Self::Pending => &[Self::Approved, Self::Rejected, Self::RequestModification],
            Self::Approved | Self::Rejected | Self::RequestModification => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether a requisition may be created in this state.
    #[must_use]
    pub const fn is_creation_state(self) -> bool {
        matches!(self, Self::SavedForLater | Self::Pending)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SavedForLater => "SAVED_FOR_LATER",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::RequestModification => "REQUEST_MODIFICATION",
        }
    }
}

impl fmt::Display for RequisitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Status of a purchase order.
///
/// ```text
/// pending → approved
///         → rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved | Self::Rejected => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApprovalAction
// ---------------------------------------------------------------------------

/// An approver's decision on a pending requisition or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    Approve,
    Reject,
    RequestModification,
    /// Approve the requisition and create the dependent purchase order.
    ApproveAndCreatePo,
}

impl ApprovalAction {
    /// Status a requisition ends up in after this action.
    #[must_use]
    pub const fn requisition_target(self) -> RequisitionStatus {
        match self {
            Self::Approve | Self::ApproveAndCreatePo => RequisitionStatus::Approved,
            Self::Reject => RequisitionStatus::Rejected,
            Self::RequestModification => RequisitionStatus::RequestModification,
        }
    }

    /// Status an order ends up in, or `None` if the action does not apply to orders.
    #[must_use]
    pub const fn order_target(self) -> Option<OrderStatus> {
        match self {
            Self::Approve => Some(OrderStatus::Approved),
            Self::Reject => Some(OrderStatus::Rejected),
            Self::RequestModification | Self::ApproveAndCreatePo => None,
        }
    }

    /// Rejection must be confirmed in a second step before it is sent.
    #[must_use]
    pub const fn requires_confirmation(self) -> bool {
        matches!(self, Self::Reject)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::RequestModification => "request_modification",
            Self::ApproveAndCreatePo => "approve_and_create_po",
        }
    }
}

impl fmt::Display for ApprovalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The two approvable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Requisition,
    PurchaseOrder,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requisition => "requisition",
            Self::PurchaseOrder => "purchase_order",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UnmatchedRoutePolicy
// ---------------------------------------------------------------------------

/// What route access does for a path that no table entry covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedRoutePolicy {
    /// Unknown routes are reachable unless explicitly restricted.
    #[default]
    Allow,
    /// Unknown routes are denied unless explicitly listed.
    Deny,
}

impl UnmatchedRoutePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }
}

impl fmt::Display for UnmatchedRoutePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(
        requisition_saved_for_later,
        RequisitionStatus,
        RequisitionStatus::SavedForLater,
        "SAVED_FOR_LATER"
    );
    test_serde_roundtrip!(
        requisition_request_modification,
        RequisitionStatus,
        RequisitionStatus::RequestModification,
        "REQUEST_MODIFICATION"
    );
    test_serde_roundtrip!(order_pending, OrderStatus, OrderStatus::Pending, "PENDING");
    test_serde_roundtrip!(
        action_approve_and_create_po,
        ApprovalAction,
        ApprovalAction::ApproveAndCreatePo,
        "approve_and_create_po"
    );
    test_serde_roundtrip!(
        permission_manage_purchase_orders,
        PermissionTag,
        PermissionTag::ManagePurchaseOrders,
        "manage_purchase_orders"
    );

    #[test]
    fn permission_as_str_matches_serde_for_every_tag() {
        for tag in PermissionTag::ALL {
            let json = serde_json::to_string(tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn permission_parses_from_str() {
        assert_eq!(
            "get_suppliers".parse::<PermissionTag>().unwrap(),
            PermissionTag::GetSuppliers
        );
        assert_eq!(
            "manage-purchase-orders".parse::<PermissionTag>().unwrap(),
            PermissionTag::ManagePurchaseOrders
        );
        let err = "launch_rockets".parse::<PermissionTag>().unwrap_err();
        assert!(err.to_string().contains("launch_rockets"));
    }

    #[test]
    fn pending_requisition_has_three_outcomes() {
        let next = RequisitionStatus::Pending.allowed_next_states();
        assert_eq!(next.len(), 3);
        assert!(RequisitionStatus::Pending.can_transition_to(RequisitionStatus::Approved));
        assert!(RequisitionStatus::Pending.can_transition_to(RequisitionStatus::Rejected));
        assert!(
            RequisitionStatus::Pending.can_transition_to(RequisitionStatus::RequestModification)
        );
    }

    #[test]
    fn requisition_outcomes_are_terminal() {
        for status in [
            RequisitionStatus::Approved,
            RequisitionStatus::Rejected,
            RequisitionStatus::RequestModification,
        ] {
            assert!(status.is_terminal(), "{status} should be terminal");
            assert!(!status.can_transition_to(RequisitionStatus::Pending));
        }
    }

    #[test]
    fn saved_for_later_only_submits_to_pending() {
        assert!(RequisitionStatus::SavedForLater.can_transition_to(RequisitionStatus::Pending));
        assert!(!RequisitionStatus::SavedForLater.can_transition_to(RequisitionStatus::Approved));
        assert!(!RequisitionStatus::Pending.can_transition_to(RequisitionStatus::SavedForLater));
    }

    #[test]
    fn creation_states() {
        assert!(RequisitionStatus::Pending.is_creation_state());
        assert!(RequisitionStatus::SavedForLater.is_creation_state());
        assert!(!RequisitionStatus::Approved.is_creation_state());
    }

    #[test]
    fn order_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Approved));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Approved.can_transition_to(OrderStatus::Rejected));
        assert!(!OrderStatus::Rejected.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn action_targets() {
        assert_eq!(
            ApprovalAction::ApproveAndCreatePo.requisition_target(),
            RequisitionStatus::Approved
        );
        assert_eq!(
            ApprovalAction::RequestModification.requisition_target(),
            RequisitionStatus::RequestModification
        );
        assert_eq!(ApprovalAction::Reject.order_target(), Some(OrderStatus::Rejected));
        assert_eq!(ApprovalAction::ApproveAndCreatePo.order_target(), None);
        assert!(ApprovalAction::Reject.requires_confirmation());
        assert!(!ApprovalAction::Approve.requires_confirmation());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", RequisitionStatus::SavedForLater), "SAVED_FOR_LATER");
        assert_eq!(format!("{}", OrderStatus::Approved), "APPROVED");
        assert_eq!(format!("{}", ApprovalAction::Reject), "reject");
        assert_eq!(format!("{}", EntityKind::PurchaseOrder), "purchase_order");
        assert_eq!(format!("{}", PermissionTag::GetReports), "get_reports");
    }
}
