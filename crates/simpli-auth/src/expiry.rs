//! Token freshness checks for the stored cookie jar.

use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};

use crate::cookies::CookieJar;
use crate::error::AuthError;

const EXPIRY_BUFFER_SECS: i64 = 60;

/// Return the access token if the session is usable at `now`.
///
/// A missing `simpliToken` means signed out. An access token that is gone,
/// past its cookie expiry, or whose JWT `exp` falls within the next minute
/// means the session expired. Opaque (non-JWT) tokens rely on the cookie
/// expiry alone.
///
/// # Errors
///
/// `AuthError::NotAuthenticated` or `AuthError::TokenExpired`.
pub fn usable_access_token(jar: &CookieJar, now: DateTime<Utc>) -> Result<String, AuthError> {
    if !jar.is_authenticated(now) && jar.refresh_token(now).is_none() {
        return Err(AuthError::NotAuthenticated);
    }
    let Some(token) = jar.access_token(now) else {
        return Err(AuthError::TokenExpired);
    };
    if let Ok(expires_at) = decode_expiry(token)
        && is_near_expiry(expires_at, now)
    {
        tracing::warn!(
            %expires_at,
            "access token expires within {EXPIRY_BUFFER_SECS}s; run `simpli auth login`",
        );
        return Err(AuthError::TokenExpired);
    }
    Ok(token.to_string())
}

#[must_use]
pub fn is_near_expiry(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    expires_at - now <= Duration::seconds(EXPIRY_BUFFER_SECS)
}

/// Decode the JWT `exp` claim without verifying the signature.
///
/// # Errors
///
/// Returns `AuthError::Other` if the JWT format is invalid or the `exp` claim
/// is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}
