//! API client error types.

use thiserror::Error;

/// Errors that can occur when talking to the SimpliP2P API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 401: the bearer token is missing, expired, or revoked.
    #[error("unauthorized — run `simpli auth login`")]
    Unauthorized,

    /// 403: the caller lacks the permission the endpoint requires.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Response body, if any.
        message: String,
    },

    /// Any other non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// An org-scoped query was issued with no organization selected.
    #[error("{query} requires an organization — run `simpli org switch <org>`")]
    OrganizationRequired {
        /// Name of the disabled query.
        query: &'static str,
    },

    /// The client could not be built from configuration.
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Authentication failures send the user back to login.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
