//! Top-level failure reporting.

use simpli_api::ApiError;
use simpli_auth::{AuthError, ErrorLatch};

/// Whether any cause in the chain means the stored session is unusable.
pub fn is_auth_failure(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<ApiError>()
            .is_some_and(ApiError::is_auth_failure)
            || matches!(
                cause.downcast_ref::<AuthError>(),
                Some(AuthError::NotAuthenticated | AuthError::TokenExpired)
            )
    })
}

/// Print `error` to stderr. The first auth failure claimed on `latch` also
/// runs `forget` to drop the rejected credentials; later ones only print.
///
/// Returns whether `forget` ran.
pub fn report<F>(error: &anyhow::Error, latch: &ErrorLatch, forget: F) -> bool
where
    F: FnOnce() -> Result<(), AuthError>,
{
    eprintln!("simpli error: {error:#}");
    if !is_auth_failure(error) || !latch.try_claim() {
        return false;
    }
    if let Err(error) = forget() {
        tracing::warn!(%error, "failed to drop rejected credentials");
    }
    true
}
