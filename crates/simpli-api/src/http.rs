//! Shared HTTP response helpers for endpoint modules.
//!
//! Centralizes status-code checks (401/403 auth failures, 429 rate limiting
//! with `Retry-After` parsing, non-success → [`ApiError::Api`]) and the
//! optional `{"data": ...}` envelope.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → [`ApiError::Unauthorized`].
/// - **403 Forbidden** → [`ApiError::Forbidden`] with the response body.
/// - **429 Too Many Requests** → [`ApiError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`ApiError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    match resp.status().as_u16() {
        401 => return Err(ApiError::Unauthorized),
        403 => {
            return Err(ApiError::Forbidden {
                message: resp.text().await.unwrap_or_default(),
            });
        }
        429 => {
            return Err(ApiError::RateLimited {
                retry_after_secs: parse_retry_after(&resp),
            });
        }
        _ => {}
    }
    if !resp.status().is_success() {
        return Err(ApiError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Decode a body that is either `T` or `{"data": T}`.
///
/// # Errors
///
/// Returns [`ApiError::Parse`] if neither shape matches.
pub fn unwrap_data<T: DeserializeOwned>(mut value: serde_json::Value) -> Result<T, ApiError> {
    if let Some(object) = value.as_object_mut()
        && object.len() == 1
        && let Some(inner) = object.remove("data")
    {
        return serde_json::from_value(inner).map_err(|e| ApiError::Parse(e.to_string()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Check the response, then decode its (possibly enveloped) JSON body.
///
/// # Errors
///
/// Any [`check_response`] error, or [`ApiError::Parse`] on a bad body.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let resp = check_response(resp).await?;
    let text = resp.text().await?;
    if text.trim().is_empty() {
        return unwrap_data(serde_json::Value::Null);
    }
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))?;
    unwrap_data(value)
}
