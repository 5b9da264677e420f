//! # simpli-auth
//!
//! Access control and session state for SimpliP2P.
//!
//! Provides the permission evaluator (implication table + OR checks), the
//! route access table, the ordered navigation guard, auth cookie issuance,
//! OS keychain storage of the cookie jar (`keyring`), and the persisted
//! current-organization context.

pub mod cookies;
pub mod error;
pub mod expiry;
pub mod guard;
pub mod org_context;
pub mod paths;
pub mod permissions;
pub mod routes;
pub mod token_store;

use chrono::Utc;

pub use cookies::{AuthTokens, CookieJar, CookieSpec};
pub use error::AuthError;
pub use guard::{ErrorLatch, Navigation, NavigationGuard};
pub use org_context::{SessionContext, SessionStore};
pub use permissions::{EffectivePermissions, check_permission};
pub use routes::{AccessDecision, RouteTable, explain_access, has_access};

/// Resolve the stored session's bearer token.
///
/// # Errors
///
/// `AuthError::NotAuthenticated` when nothing is stored, or
/// `AuthError::TokenExpired` when the access token is stale.
pub fn resolve_token() -> Result<String, AuthError> {
    let (jar, _) = token_store::load().ok_or(AuthError::NotAuthenticated)?;
    expiry::usable_access_token(&jar, Utc::now())
}

/// Clear stored credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
