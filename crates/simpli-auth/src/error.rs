use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated — run `simpli auth login`")]
    NotAuthenticated,

    #[error("session expired — run `simpli auth login` to sign in again")]
    TokenExpired,

    #[error("access to {path} is restricted (redirect: {redirect})")]
    Forbidden { path: String, redirect: String },

    #[error("no active organization — run `simpli org switch <org>`")]
    NoOrganization,

    #[error("cookie lifetime of {secs}s for {name} is out of range")]
    CookieLifetime { name: &'static str, secs: u64 },

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("session store error: {0}")]
    SessionStoreError(String),

    #[error("{0}")]
    Other(String),
}
