use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PermissionTag;
use crate::errors::CoreError;
use crate::org_name::OrgName;

/// A user's membership in one organization.
///
/// Created when an invitation is accepted, edited when the role or permission
/// list changes. Deactivation is soft: `deactivated_at` is set and the record
/// is kept.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OrganizationMembership {
    pub org_id: String,
    pub org_name: OrgName,
    pub role: String,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub permissions: BTreeSet<PermissionTag>,
    #[serde(default)]
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl OrganizationMembership {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deactivated_at.is_none()
    }

    /// Literal membership of `tag` in the permission list, without implication.
    #[must_use]
    pub fn holds(&self, tag: PermissionTag) -> bool {
        self.permissions.contains(&tag)
    }
}

/// All memberships of one user, at most one per organization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memberships {
    by_org: BTreeMap<String, OrganizationMembership>,
}

impl Memberships {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, rejecting a second entry for the same organization.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateMembership` on the first repeated `org_id`.
    pub fn from_vec(memberships: Vec<OrganizationMembership>) -> Result<Self, CoreError> {
        let mut set = Self::new();
        for membership in memberships {
            set.insert(membership)?;
        }
        Ok(set)
    }

    /// Add a membership (invitation accepted).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateMembership` if the user already belongs to the org.
    pub fn insert(&mut self, membership: OrganizationMembership) -> Result<(), CoreError> {
        if self.by_org.contains_key(&membership.org_id) {
            return Err(CoreError::DuplicateMembership {
                org_id: membership.org_id,
            });
        }
        self.by_org.insert(membership.org_id.clone(), membership);
        Ok(())
    }

    /// Replace the role and permission list of an existing membership.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if there is no membership for `org_id`.
    pub fn update_grants(
        &mut self,
        org_id: &str,
        role: &str,
        permissions: BTreeSet<PermissionTag>,
    ) -> Result<(), CoreError> {
        let membership = self.by_org.get_mut(org_id).ok_or_else(|| not_found(org_id))?;
        membership.role = role.to_string();
        membership.permissions = permissions;
        Ok(())
    }

    /// Soft-deactivate a membership. Deactivating twice keeps the first timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if there is no membership for `org_id`.
    pub fn deactivate(&mut self, org_id: &str, at: DateTime<Utc>) -> Result<(), CoreError> {
        let membership = self.by_org.get_mut(org_id).ok_or_else(|| not_found(org_id))?;
        if membership.deactivated_at.is_none() {
            membership.deactivated_at = Some(at);
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, org_id: &str) -> Option<&OrganizationMembership> {
        self.by_org.get(org_id)
    }

    /// Look up an active membership by the sanitized organization name used
    /// in routes. Deactivated memberships never shadow an active namesake.
    #[must_use]
    pub fn find_active_by_name(&self, name: &OrgName) -> Option<&OrganizationMembership> {
        self.active().find(|m| &m.org_name == name)
    }

    pub fn active(&self) -> impl Iterator<Item = &OrganizationMembership> {
        self.by_org.values().filter(|m| m.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrganizationMembership> {
        self.by_org.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_org.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_org.is_empty()
    }
}

fn not_found(org_id: &str) -> CoreError {
    CoreError::NotFound {
        entity_type: "membership".into(),
        id: org_id.to_string(),
    }
}
