//! Capability checks against an organization membership.
//!
//! Parent permissions imply their children (`manage_suppliers` grants
//! `create_suppliers` and `get_suppliers`). The relation lives in one table,
//! [`IMPLICATIONS`], and is resolved once per evaluation into an
//! [`EffectivePermissions`] set. Implication only flows from parent to child.

use std::collections::BTreeSet;

use simpli_core::entities::OrganizationMembership;
use simpli_core::enums::PermissionTag;

use simpli_core::enums::PermissionTag as P;

/// Parent → children it implies.
pub const IMPLICATIONS: &[(PermissionTag, &[PermissionTag])] = &[
    (P::ManageSuppliers, &[P::CreateSuppliers, P::GetSuppliers]),
    (
        P::ManagePurchaseRequisitions,
        &[P::CreatePurchaseRequisitions, P::GetPurchaseRequisitions],
    ),
    (
        P::ManagePurchaseOrders,
        &[P::CreatePurchaseOrders, P::GetPurchaseOrders],
    ),
    (P::ManageMembers, &[P::CreateMembers, P::GetMembers]),
    (P::ManageDepartments, &[P::CreateDepartments, P::GetDepartments]),
    (P::ManageBudgets, &[P::CreateBudgets, P::GetBudgets]),
    (P::ManageProducts, &[P::CreateProducts, P::GetProducts]),
    (P::ManageCategories, &[P::CreateCategories, P::GetCategories]),
    (P::ManageRoles, &[P::CreateRoles, P::GetRoles]),
];

/// Direct children of `tag` in the implication table.
#[must_use]
pub fn implied_by(tag: PermissionTag) -> &'static [PermissionTag] {
    for (parent, children) in IMPLICATIONS {
        if *parent == tag {
            return *children;
        }
    }
    &[]
}

/// The resolved capability set of one membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissions {
    active: bool,
    is_creator: bool,
    tags: BTreeSet<PermissionTag>,
}

impl EffectivePermissions {
    /// Expand the membership's granted tags through the implication table.
    #[must_use]
    pub fn resolve(membership: &OrganizationMembership) -> Self {
        let mut tags = BTreeSet::new();
        let mut pending: Vec<PermissionTag> = membership.permissions.iter().copied().collect();
        while let Some(tag) = pending.pop() {
            if tags.insert(tag) {
                pending.extend_from_slice(implied_by(tag));
            }
        }

        Self {
            active: membership.is_active(),
            is_creator: membership.is_creator,
            tags,
        }
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn is_creator(&self) -> bool {
        self.active && self.is_creator
    }

    /// Creators and `all_permissions` holders pass every check.
    #[must_use]
    pub fn grants_everything(&self) -> bool {
        self.active && (self.is_creator || self.tags.contains(&PermissionTag::AllPermissions))
    }

    #[must_use]
    pub fn contains(&self, tag: PermissionTag) -> bool {
        self.grants_everything() || (self.active && self.tags.contains(&tag))
    }

    /// OR semantics: true when any of `required` is held.
    #[must_use]
    pub fn allows_any(&self, required: &[PermissionTag]) -> bool {
        if self.grants_everything() {
            return true;
        }
        self.active && required.iter().any(|tag| self.tags.contains(tag))
    }

    pub fn tags(&self) -> impl Iterator<Item = PermissionTag> + '_ {
        self.tags.iter().copied()
    }
}

/// True if the membership is a creator, holds `all_permissions`, or holds any
/// tag in `required` (after implication).
#[must_use]
pub fn check_permission(membership: &OrganizationMembership, required: &[PermissionTag]) -> bool {
    EffectivePermissions::resolve(membership).allows_any(required)
}
