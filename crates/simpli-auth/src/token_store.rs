use std::fs;
use std::path::{Path, PathBuf};

use crate::cookies::CookieJar;
use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "simplip2p-cli";
const KEYRING_USER: &str = "session-cookies";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "SIMPLI_AUTH__TOKEN";

/// Where a loaded session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Override with `SIMPLI_KEYRING_SERVICE` in tests to keep real credentials untouched.
fn keyring_service() -> String {
    std::env::var("SIMPLI_KEYRING_SERVICE")
        .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Persist the cookie jar in the OS keychain, falling back to a 0600 file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if serialization or both storage tiers fail.
pub fn store(jar: &CookieJar) -> Result<(), AuthError> {
    let payload = serde_json::to_string(jar)
        .map_err(|e| AuthError::TokenStoreError(format!("serialize cookies: {e}")))?;

    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(&payload) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(&credentials_path()?, &payload)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(&credentials_path()?, &payload)
        }
    }
}

/// Load the session. Priority: keyring → `SIMPLI_AUTH__TOKEN` → `~/.simpli/credentials`.
///
/// The env tier holds a bare access token rather than a serialized jar.
#[must_use]
pub fn load() -> Option<(CookieJar, TokenSource)> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(payload) = entry.get_password()
        && let Some(jar) = parse_jar(&payload)
    {
        return Some((jar, TokenSource::Keyring));
    }

    if let Ok(token) = std::env::var(TOKEN_ENV)
        && !token.trim().is_empty()
    {
        return Some((CookieJar::from_access_token(token.trim()), TokenSource::Env));
    }

    let path = credentials_path().ok()?;
    load_file(&path).map(|jar| (jar, TokenSource::File))
}

/// Remove stored credentials from the keychain and the credentials file.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }
    Ok(())
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".simpli").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found; cannot store credentials".into())
        })
}

fn parse_jar(payload: &str) -> Option<CookieJar> {
    if payload.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(payload) {
        Ok(jar) => Some(jar),
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable stored session");
            None
        }
    }
}

fn store_file(path: &Path, payload: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, payload)
        .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file(path: &Path) -> Option<CookieJar> {
    fs::read_to_string(path).ok().as_deref().and_then(parse_jar)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn credentials_path_is_under_home() {
        let path = credentials_path().expect("should resolve");
        assert!(path.ends_with(".simpli/credentials"));
    }

    #[test]
    fn file_tier_roundtrips_jar_with_owner_only_mode() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("credentials");
        let jar = CookieJar::from_access_token("tok_abc");

        store_file(&path, &serde_json::to_string(&jar).unwrap()).expect("store");
        let loaded = load_file(&path).expect("load");
        assert!(loaded.is_authenticated(Utc::now()));
        assert_eq!(loaded.access_token(Utc::now()), Some("tok_abc"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }
    }

    #[test]
    fn blank_or_corrupt_file_loads_nothing() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials");

        fs::write(&path, "   \n  ").unwrap();
        assert!(load_file(&path).is_none());

        fs::write(&path, "{not json").unwrap();
        assert!(load_file(&path).is_none());
    }

    #[test]
    fn source_labels() {
        assert_eq!(TokenSource::Keyring.as_str(), "keyring");
        assert_eq!(TokenSource::Env.as_str(), "env");
        assert_eq!(TokenSource::File.as_str(), "file");
    }
}
