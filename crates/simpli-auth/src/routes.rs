//! Route access control.
//!
//! Decision order for a feature path (the part after `/{org_name}`):
//! 1. public allowlist → allowed
//! 2. `/settings…` → creator only
//! 3. longest matching prefix in [`ROUTE_PERMISSIONS`] → `allows_any`
//! 4. anything else → [`UnmatchedRoutePolicy`] (allow by default)
//!
//! An inactive membership only reaches public routes.

use serde::Serialize;
use simpli_core::entities::OrganizationMembership;
use simpli_core::enums::{PermissionTag, UnmatchedRoutePolicy};

use crate::paths::{matches_prefix, normalize};
use crate::permissions::EffectivePermissions;

use simpli_core::enums::PermissionTag as P;

pub const PUBLIC_ROUTES: &[&str] = &[
    "/",
    "/dashboard",
    "/profile",
    "/notifications",
    "/restricted-access",
];

pub const SETTINGS_PREFIX: &str = "/settings";

/// Feature prefix → tags of which any one grants access.
pub const ROUTE_PERMISSIONS: &[(&str, &[PermissionTag])] = &[
    (
        "/purchase-requisitions",
        &[P::GetPurchaseRequisitions, P::CreatePurchaseRequisitions],
    ),
    (
        "/purchase-requisition-management",
        &[P::ManagePurchaseRequisitions],
    ),
    ("/purchase-orders", &[P::GetPurchaseOrders]),
    ("/purchase-order-management", &[P::ManagePurchaseOrders]),
    ("/suppliers", &[P::GetSuppliers]),
    ("/supplier-management", &[P::ManageSuppliers]),
    ("/members", &[P::GetMembers]),
    ("/member-management", &[P::ManageMembers]),
    ("/departments", &[P::GetDepartments]),
    ("/budgets", &[P::GetBudgets]),
    ("/products", &[P::GetProducts]),
    ("/categories", &[P::GetCategories]),
    ("/roles", &[P::GetRoles]),
    ("/reports", &[P::GetReports]),
];

/// Which rule produced an access decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum AccessRule {
    Public,
    CreatorOnly,
    Table {
        prefix: &'static str,
        required: &'static [PermissionTag],
    },
    Unmatched {
        policy: UnmatchedRoutePolicy,
    },
    InactiveMembership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub path: String,
    pub allowed: bool,
    #[serde(flatten)]
    pub rule: AccessRule,
}

/// Static route table plus the policy for uncovered paths.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    public: &'static [&'static str],
    entries: &'static [(&'static str, &'static [PermissionTag])],
    unmatched: UnmatchedRoutePolicy,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(UnmatchedRoutePolicy::Allow)
    }
}

impl RouteTable {
    #[must_use]
    pub const fn new(unmatched: UnmatchedRoutePolicy) -> Self {
        Self {
            public: PUBLIC_ROUTES,
            entries: ROUTE_PERMISSIONS,
            unmatched,
        }
    }

    #[must_use]
    pub const fn unmatched_policy(&self) -> UnmatchedRoutePolicy {
        self.unmatched
    }

    /// Decide access to `feature_path` for an already-resolved permission set.
    #[must_use]
    pub fn decide(&self, permissions: &EffectivePermissions, feature_path: &str) -> AccessDecision {
        let path = normalize(feature_path);

        let (allowed, rule) = if self.public.contains(&path.as_str()) {
            (true, AccessRule::Public)
        } else if !permissions.is_active() {
            (false, AccessRule::InactiveMembership)
        } else if matches_prefix(&path, SETTINGS_PREFIX) {
            (permissions.is_creator(), AccessRule::CreatorOnly)
        } else if let Some((prefix, required)) = self.lookup(&path) {
            (
                permissions.allows_any(required),
                AccessRule::Table { prefix, required },
            )
        } else {
            (
                self.unmatched == UnmatchedRoutePolicy::Allow,
                AccessRule::Unmatched {
                    policy: self.unmatched,
                },
            )
        };

        AccessDecision {
            path,
            allowed,
            rule,
        }
    }

    /// Convenience wrapper over [`Self::decide`] for a raw membership.
    #[must_use]
    pub fn has_access(&self, membership: &OrganizationMembership, feature_path: &str) -> bool {
        self.decide(&EffectivePermissions::resolve(membership), feature_path)
            .allowed
    }

    fn lookup(&self, path: &str) -> Option<(&'static str, &'static [PermissionTag])> {
        self.entries
            .iter()
            .filter(|(prefix, _)| matches_prefix(path, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .copied()
    }
}

/// Route check with the default (fail-open) table.
#[must_use]
pub fn has_access(membership: &OrganizationMembership, feature_path: &str) -> bool {
    RouteTable::default().has_access(membership, feature_path)
}

/// Route check with the default table, returning the deciding rule.
#[must_use]
pub fn explain_access(membership: &OrganizationMembership, feature_path: &str) -> AccessDecision {
    RouteTable::default().decide(&EffectivePermissions::resolve(membership), feature_path)
}
