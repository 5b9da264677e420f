//! Navigation guard.
//!
//! Every navigation is evaluated once, in order: authentication, then
//! organization validity, then route permission. The first failing check
//! yields at most one redirect. States move `Checking → Denied → Redirecting`
//! or `Checking → Allowed`.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use simpli_core::OrgName;
use simpli_core::entities::{Memberships, OrganizationMembership};

use crate::error::AuthError;
use crate::paths::{
    DASHBOARD_FEATURE, LOGIN_PATH, is_auth_route, org_path, restricted_access_path,
    split_org_path,
};
use crate::permissions::EffectivePermissions;
use crate::routes::{AccessDecision, RouteTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    Unauthenticated,
    AlreadySignedIn,
    NoOrganization,
    UnknownOrganization { org: String },
    Forbidden { decision: AccessDecision },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GuardState {
    Checking,
    Denied(DenialReason),
    Redirecting { to: String },
    Allowed,
}

impl GuardState {
    #[must_use]
    pub const fn can_transition_to(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Checking, Self::Denied(_) | Self::Allowed)
                | (Self::Denied(_), Self::Redirecting { .. })
        )
    }

    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Redirecting { .. } | Self::Allowed)
    }
}

/// The evaluated outcome of one navigation, with the states it passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub path: String,
    pub trail: Vec<GuardState>,
}

impl Navigation {
    fn start(path: &str) -> Self {
        Self {
            path: path.to_string(),
            trail: vec![GuardState::Checking],
        }
    }

    fn advance(&mut self, next: GuardState) {
        debug_assert!(
            self.state().can_transition_to(&next),
            "invalid guard transition {:?} -> {next:?}",
            self.state()
        );
        self.trail.push(next);
    }

    fn allow(mut self) -> Self {
        self.advance(GuardState::Allowed);
        self
    }

    fn deny(mut self, reason: DenialReason, to: String) -> Self {
        self.advance(GuardState::Denied(reason));
        self.advance(GuardState::Redirecting { to });
        self
    }

    #[must_use]
    pub fn state(&self) -> &GuardState {
        self.trail.last().unwrap_or(&GuardState::Checking)
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self.state(), GuardState::Allowed)
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        match self.state() {
            GuardState::Redirecting { to } => Some(to),
            _ => None,
        }
    }

    #[must_use]
    pub fn denial(&self) -> Option<&DenialReason> {
        self.trail.iter().find_map(|state| match state {
            GuardState::Denied(reason) => Some(reason),
            _ => None,
        })
    }

    /// Convert a denied navigation into the matching `AuthError`.
    ///
    /// # Errors
    ///
    /// Returns the error for the failed check; `Ok` when allowed.
    pub fn into_result(self) -> Result<(), AuthError> {
        let redirect = self.redirect().unwrap_or(LOGIN_PATH).to_string();
        match self.denial() {
            None | Some(DenialReason::AlreadySignedIn) => Ok(()),
            Some(DenialReason::Unauthenticated) => Err(AuthError::NotAuthenticated),
            Some(DenialReason::NoOrganization | DenialReason::UnknownOrganization { .. }) => {
                Err(AuthError::NoOrganization)
            }
            Some(DenialReason::Forbidden { .. }) => Err(AuthError::Forbidden {
                path: self.path,
                redirect,
            }),
        }
    }
}

pub struct NavigationGuard<'a> {
    table: RouteTable,
    memberships: &'a Memberships,
    preferred_org: Option<&'a str>,
}

impl<'a> NavigationGuard<'a> {
    #[must_use]
    pub const fn new(table: RouteTable, memberships: &'a Memberships) -> Self {
        Self {
            table,
            memberships,
            preferred_org: None,
        }
    }

    /// Prefer this org (by id) when choosing a landing page.
    #[must_use]
    pub const fn with_preferred_org(mut self, org_id: Option<&'a str>) -> Self {
        self.preferred_org = org_id;
        self
    }

    /// Dashboard of the preferred org if it is active, else of the first
    /// active membership, else `/login`.
    #[must_use]
    pub fn landing_path(&self) -> String {
        self.preferred_org
            .and_then(|id| self.memberships.get(id))
            .filter(|m| m.is_active())
            .or_else(|| self.memberships.active().next())
            .map_or_else(
                || LOGIN_PATH.to_string(),
                |m| org_path(&m.org_name, DASHBOARD_FEATURE),
            )
    }

    fn membership_for(&self, segment: &str) -> Option<&'a OrganizationMembership> {
        self.memberships.find_active_by_name(&OrgName::new(segment))
    }

    #[must_use]
    pub fn evaluate(&self, authenticated: bool, path: &str) -> Navigation {
        let navigation = Navigation::start(path);

        if is_auth_route(path) {
            let landing = self.landing_path();
            if authenticated && landing != LOGIN_PATH {
                return navigation.deny(DenialReason::AlreadySignedIn, landing);
            }
            return navigation.allow();
        }

        if !authenticated {
            return navigation.deny(DenialReason::Unauthenticated, LOGIN_PATH.to_string());
        }

        let Some((segment, feature)) = split_org_path(path) else {
            return navigation.deny(DenialReason::NoOrganization, self.landing_path());
        };
        let Some(membership) = self.membership_for(segment) else {
            tracing::debug!(org = segment, "navigation to unknown or inactive org");
            return navigation.deny(
                DenialReason::UnknownOrganization {
                    org: segment.to_string(),
                },
                self.landing_path(),
            );
        };

        let decision = self
            .table
            .decide(&EffectivePermissions::resolve(membership), &feature);
        if decision.allowed {
            navigation.allow()
        } else {
            let to = restricted_access_path(&membership.org_name, path);
            navigation.deny(DenialReason::Forbidden { decision }, to)
        }
    }
}

/// Check-and-set flag so that only the first of several racing failures
/// reports to the user.
#[derive(Debug, Default)]
pub struct ErrorLatch {
    raised: AtomicBool,
}

impl ErrorLatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    /// True for exactly one caller until [`Self::reset`].
    pub fn try_claim(&self) -> bool {
        !self.raised.swap(true, Ordering::AcqRel)
    }

    pub fn reset(&self) {
        self.raised.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use simpli_core::enums::PermissionTag;

    use super::*;

    fn membership(
        org_id: &str,
        name: &str,
        permissions: &[PermissionTag],
    ) -> OrganizationMembership {
        OrganizationMembership {
            org_id: org_id.into(),
            org_name: OrgName::new(name),
            role: "member".into(),
            is_creator: false,
            permissions: permissions.iter().copied().collect(),
            deactivated_at: None,
        }
    }

    fn memberships() -> Memberships {
        Memberships::from_vec(vec![
            membership("org_a", "Acme Corp", &[PermissionTag::GetSuppliers]),
            membership("org_b", "Globex", &[PermissionTag::AllPermissions]),
        ])
        .unwrap()
    }

    #[test]
    fn unauthenticated_goes_to_login_once() {
        let set = memberships();
        let nav = NavigationGuard::new(RouteTable::default(), &set)
            .evaluate(false, "/AcmeCorp/suppliers");
        assert_eq!(nav.redirect(), Some("/login"));
        assert_eq!(nav.denial(), Some(&DenialReason::Unauthenticated));
        assert_eq!(nav.trail.len(), 3);
    }

    #[test]
    fn auth_routes_open_when_signed_out() {
        let set = memberships();
        let guard = NavigationGuard::new(RouteTable::default(), &set);
        assert!(guard.evaluate(false, "/login").is_allowed());
        assert!(guard.evaluate(false, "/reset-password/tok").is_allowed());
    }

    #[test]
    fn signed_in_user_leaves_login_page() {
        let set = memberships();
        let guard =
            NavigationGuard::new(RouteTable::default(), &set).with_preferred_org(Some("org_b"));
        assert_eq!(guard.evaluate(true, "/login").redirect(), Some("/Globex/dashboard"));
    }

    #[test]
    fn unknown_org_lands_on_first_active_dashboard() {
        let set = memberships();
        let nav =
            NavigationGuard::new(RouteTable::default(), &set).evaluate(true, "/Initech/suppliers");
        assert_eq!(nav.redirect(), Some("/AcmeCorp/dashboard"));
        assert!(matches!(
            nav.denial(),
            Some(DenialReason::UnknownOrganization { org }) if org == "Initech"
        ));
    }

    #[test]
    fn deactivated_org_is_unknown() {
        let mut set = memberships();
        set.deactivate("org_a", Utc::now()).unwrap();
        let guard = NavigationGuard::new(RouteTable::default(), &set);
        assert_eq!(
            guard.evaluate(true, "/AcmeCorp/dashboard").redirect(),
            Some("/Globex/dashboard")
        );
    }

    #[test]
    fn deactivated_namesake_does_not_hide_active_org() {
        let mut set = Memberships::from_vec(vec![
            membership("org_a", "Acme", &[]),
            membership("org_b", "Acme", &[PermissionTag::GetSuppliers]),
        ])
        .unwrap();
        set.deactivate("org_a", Utc::now()).unwrap();

        let nav =
            NavigationGuard::new(RouteTable::default(), &set).evaluate(true, "/Acme/suppliers");
        assert!(nav.is_allowed());
    }

    #[test]
    fn root_without_memberships_goes_to_login() {
        let empty = Memberships::new();
        let nav = NavigationGuard::new(RouteTable::default(), &empty).evaluate(true, "/");
        assert_eq!(nav.redirect(), Some("/login"));
        assert!(matches!(nav.into_result(), Err(AuthError::NoOrganization)));
    }

    #[test]
    fn forbidden_route_redirects_to_restricted_page() {
        let set = memberships();
        let nav = NavigationGuard::new(RouteTable::default(), &set)
            .evaluate(true, "/AcmeCorp/supplier-management");
        assert_eq!(
            nav.redirect(),
            Some("/AcmeCorp/restricted-access?from=%2FAcmeCorp%2Fsupplier-management")
        );
        assert!(matches!(nav.into_result(), Err(AuthError::Forbidden { .. })));
    }

    #[test]
    fn permitted_route_is_allowed() {
        let set = memberships();
        let nav = NavigationGuard::new(RouteTable::default(), &set)
            .evaluate(true, "/AcmeCorp/suppliers/7");
        assert!(nav.is_allowed());
        assert_eq!(nav.trail, vec![GuardState::Checking, GuardState::Allowed]);
        assert!(nav.into_result().is_ok());
    }

    #[test]
    fn transitions_are_ordered() {
        let denied = GuardState::Denied(DenialReason::Unauthenticated);
        assert!(GuardState::Checking.can_transition_to(&denied));
        assert!(GuardState::Checking.can_transition_to(&GuardState::Allowed));
        assert!(!GuardState::Allowed.can_transition_to(&denied));
        let redirecting = GuardState::Redirecting { to: "/".into() };
        assert!(!GuardState::Checking.can_transition_to(&redirecting));
        assert!(GuardState::Allowed.is_final());
    }

    #[test]
    fn latch_admits_exactly_one_racer() {
        let latch = Arc::new(ErrorLatch::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.try_claim())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
        assert!(latch.is_raised());

        latch.reset();
        assert!(latch.try_claim());
    }
}
