//! Auth cookies: `simpliToken` marks a signed-in browser, `accessToken`
//! carries the bearer token, `refreshToken` renews it.
//!
//! Each cookie is issued once per configured domain (local and production).

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use simpli_config::CookieConfig;

use crate::error::AuthError;

pub const SIMPLI_TOKEN: &str = "simpliToken";
pub const ACCESS_TOKEN: &str = "accessToken";
pub const REFRESH_TOKEN: &str = "refreshToken";

const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Token pair returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// One cookie as it would be sent in a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieSpec {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub expires: Option<DateTime<Utc>>,
    pub secure: bool,
}

impl CookieSpec {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    /// Render as a `Set-Cookie` header value.
    #[must_use]
    pub fn to_set_cookie_header(&self) -> String {
        let mut header = format!(
            "{}={}; Domain={}; Path={}",
            self.name, self.value, self.domain, self.path
        );
        if let Some(expires) = self.expires {
            header.push_str("; Expires=");
            header.push_str(&expires.format(EXPIRES_FORMAT).to_string());
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header.push_str("; SameSite=Lax");
        header
    }
}

fn expires_after(
    now: DateTime<Utc>,
    name: &'static str,
    secs: u64,
) -> Result<DateTime<Utc>, AuthError> {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(AuthError::CookieLifetime { name, secs })
}

fn spec(
    config: &CookieConfig,
    domain: &str,
    name: &str,
    value: &str,
    expires: DateTime<Utc>,
) -> CookieSpec {
    CookieSpec {
        name: name.to_string(),
        value: value.to_string(),
        domain: domain.to_string(),
        path: "/".to_string(),
        expires: Some(expires),
        secure: config.secure && domain != config.local_domain,
    }
}

/// Cookies set after a successful login. `simpliToken` mirrors the access
/// token and shares its lifetime.
///
/// # Errors
///
/// `CookieLifetime` when a configured lifetime cannot be added to `now`.
pub fn issue_cookies(
    tokens: &AuthTokens,
    config: &CookieConfig,
    now: DateTime<Utc>,
) -> Result<Vec<CookieSpec>, AuthError> {
    let access_expires = expires_after(now, ACCESS_TOKEN, config.access_token_ttl_secs)?;
    let refresh_expires = expires_after(now, REFRESH_TOKEN, config.refresh_token_ttl_secs)?;

    Ok(config
        .domains()
        .into_iter()
        .flat_map(|domain| {
            let access = &tokens.access_token;
            [
                spec(config, domain, SIMPLI_TOKEN, access, access_expires),
                spec(config, domain, ACCESS_TOKEN, access, access_expires),
                spec(config, domain, REFRESH_TOKEN, &tokens.refresh_token, refresh_expires),
            ]
        })
        .collect())
}

/// Cookies that erase every auth cookie on logout.
#[must_use]
pub fn clear_cookies(config: &CookieConfig) -> Vec<CookieSpec> {
    config
        .domains()
        .into_iter()
        .flat_map(|domain| {
            [SIMPLI_TOKEN, ACCESS_TOKEN, REFRESH_TOKEN]
                .map(|name| spec(config, domain, name, "", DateTime::<Utc>::UNIX_EPOCH))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    expires: Option<DateTime<Utc>>,
}

/// Client-side cookie store keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieJar {
    cookies: BTreeMap<String, StoredCookie>,
}

impl CookieJar {
    /// Keep one entry per cookie name; the first domain's copy wins.
    #[must_use]
    pub fn from_specs(specs: &[CookieSpec]) -> Self {
        let mut cookies = BTreeMap::new();
        for spec in specs {
            cookies
                .entry(spec.name.clone())
                .or_insert_with(|| StoredCookie {
                    value: spec.value.clone(),
                    expires: spec.expires,
                });
        }
        Self { cookies }
    }

    /// Parse a `Cookie:` request header (`a=1; b=2`). Header cookies carry no expiry.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let cookies = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| {
                (
                    name.trim().to_string(),
                    StoredCookie {
                        value: value.trim().to_string(),
                        expires: None,
                    },
                )
            })
            .collect();
        Self { cookies }
    }

    /// A jar holding only a bearer token, with no known expiry.
    #[must_use]
    pub fn from_access_token(token: &str) -> Self {
        let stored = StoredCookie {
            value: token.to_string(),
            expires: None,
        };
        let mut cookies = BTreeMap::new();
        cookies.insert(SIMPLI_TOKEN.to_string(), stored.clone());
        cookies.insert(ACCESS_TOKEN.to_string(), stored);
        Self { cookies }
    }

    /// Value of a live, non-empty cookie.
    #[must_use]
    pub fn get(&self, name: &str, now: DateTime<Utc>) -> Option<&str> {
        self.cookies
            .get(name)
            .filter(|c| !c.value.is_empty())
            .filter(|c| c.expires.is_none_or(|at| at > now))
            .map(|c| c.value.as_str())
    }

    #[must_use]
    pub fn expires(&self, name: &str) -> Option<DateTime<Utc>> {
        self.cookies.get(name).and_then(|c| c.expires)
    }

    /// Presence of a live `simpliToken` means signed in.
    #[must_use]
    pub fn is_authenticated(&self, now: DateTime<Utc>) -> bool {
        self.get(SIMPLI_TOKEN, now).is_some()
    }

    #[must_use]
    pub fn access_token(&self, now: DateTime<Utc>) -> Option<&str> {
        self.get(ACCESS_TOKEN, now)
    }

    #[must_use]
    pub fn refresh_token(&self, now: DateTime<Utc>) -> Option<&str> {
        self.get(REFRESH_TOKEN, now)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "acc".into(),
            refresh_token: "ref".into(),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn issues_three_cookies_per_domain() {
        let specs = issue_cookies(&tokens(), &CookieConfig::default(), fixed_now()).unwrap();
        assert_eq!(specs.len(), 6);
        let domains: Vec<_> = specs.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(&domains[..3], &["localhost"; 3]);
        assert_eq!(&domains[3..], &["simplip2p.com"; 3]);
    }

    #[test]
    fn lifetimes_follow_config() {
        let now = fixed_now();
        let specs = issue_cookies(&tokens(), &CookieConfig::default(), now).unwrap();
        let by_name = |name: &str| specs.iter().find(|s| s.name == name).unwrap();
        assert_eq!(by_name(ACCESS_TOKEN).expires, Some(now + Duration::hours(1)));
        assert_eq!(by_name(SIMPLI_TOKEN).expires, Some(now + Duration::hours(1)));
        assert_eq!(by_name(REFRESH_TOKEN).expires, Some(now + Duration::days(30)));
    }

    #[test]
    fn oversized_lifetime_is_an_error() {
        let config = CookieConfig {
            refresh_token_ttl_secs: u64::MAX,
            ..Default::default()
        };
        let err = issue_cookies(&tokens(), &config, fixed_now()).unwrap_err();
        assert!(matches!(
            err,
            AuthError::CookieLifetime {
                name: REFRESH_TOKEN,
                secs: u64::MAX
            }
        ));

        let config = CookieConfig {
            access_token_ttl_secs: u64::try_from(i64::MAX / 1_000).unwrap(),
            ..Default::default()
        };
        assert!(issue_cookies(&tokens(), &config, fixed_now()).is_err());
    }

    #[test]
    fn localhost_cookie_is_never_secure() {
        let specs = issue_cookies(&tokens(), &CookieConfig::default(), fixed_now()).unwrap();
        assert!(specs.iter().filter(|s| s.domain == "localhost").all(|s| !s.secure));
        assert!(specs.iter().filter(|s| s.domain != "localhost").all(|s| s.secure));
    }

    #[test]
    fn renders_set_cookie_header() {
        let specs = issue_cookies(&tokens(), &CookieConfig::default(), fixed_now()).unwrap();
        let prod_access = specs
            .iter()
            .find(|s| s.name == ACCESS_TOKEN && s.domain == "simplip2p.com")
            .unwrap();
        assert_eq!(
            prod_access.to_set_cookie_header(),
            "accessToken=acc; Domain=simplip2p.com; Path=/; Expires=Mon, 06 Jan 2025 13:00:00 GMT; Secure; SameSite=Lax"
        );
    }

    #[test]
    fn jar_tracks_expiry() {
        let now = fixed_now();
        let specs = issue_cookies(&tokens(), &CookieConfig::default(), now).unwrap();
        let jar = CookieJar::from_specs(&specs);
        assert!(jar.is_authenticated(now));
        assert_eq!(jar.access_token(now), Some("acc"));

        let later = now + Duration::hours(2);
        assert!(!jar.is_authenticated(later));
        assert_eq!(jar.access_token(later), None);
        assert_eq!(jar.refresh_token(later), Some("ref"));
    }

    #[test]
    fn cleared_cookies_are_expired_and_empty() {
        let cleared = clear_cookies(&CookieConfig::default());
        assert_eq!(cleared.len(), 6);
        assert!(cleared.iter().all(|c| c.value.is_empty() && c.is_expired(fixed_now())));
        assert!(!CookieJar::from_specs(&cleared).is_authenticated(fixed_now()));
    }

    #[test]
    fn parses_request_header() {
        let jar = CookieJar::from_header("simpliToken=abc; theme=dark;accessToken=abc");
        assert!(jar.is_authenticated(fixed_now()));
        assert_eq!(jar.get("theme", fixed_now()), Some("dark"));
        assert!(!CookieJar::from_header("theme=dark").is_authenticated(fixed_now()));
    }

    #[test]
    fn jar_serializes_for_storage() {
        let jar = CookieJar::from_access_token("tok");
        let json = serde_json::to_string(&jar).unwrap();
        let back: CookieJar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, jar);
    }
}
