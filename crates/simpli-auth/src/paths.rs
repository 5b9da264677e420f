//! Application route paths.
//!
//! Organization-scoped pages live under `/{org_name}/{feature}`; the auth
//! pages (`/login`, `/register`, `/forgot-password`, `/reset-password/{token}`)
//! are top level.

use simpli_core::OrgName;

pub const LOGIN_PATH: &str = "/login";
pub const RESTRICTED_ACCESS_FEATURE: &str = "/restricted-access";
pub const DASHBOARD_FEATURE: &str = "/dashboard";

const AUTH_ROUTES: &[&str] = &["/login", "/register", "/forgot-password", "/reset-password"];

/// Drop the query string and fragment, ensure a leading slash, and trim a
/// trailing slash (the root stays `/`).
#[must_use]
pub fn normalize(path: &str) -> String {
    let without_query = path.split(['?', '#']).next().unwrap_or_default().trim();
    let mut normalized = if without_query.starts_with('/') {
        without_query.to_string()
    } else {
        format!("/{without_query}")
    };
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Segment-boundary prefix match: `/suppliers` matches `/suppliers` and
/// `/suppliers/12` but not `/suppliers-archive`.
#[must_use]
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether `path` is one of the top-level auth pages.
#[must_use]
pub fn is_auth_route(path: &str) -> bool {
    let path = normalize(path);
    AUTH_ROUTES.iter().any(|route| matches_prefix(&path, route))
}

/// Build `/{org}/{feature}`. `feature` may be given with or without a leading slash.
#[must_use]
pub fn org_path(org: &OrgName, feature: &str) -> String {
    let feature = feature.trim_start_matches('/');
    if feature.is_empty() {
        format!("/{org}")
    } else {
        format!("/{org}/{feature}")
    }
}

/// Split `/{org}/{rest}` into the org segment and the feature path (`/rest`).
///
/// Returns `None` for the root path.
#[must_use]
pub fn split_org_path(path: &str) -> Option<(&str, String)> {
    let trimmed = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = trimmed.trim_start_matches('/');
    let (org, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    if org.is_empty() {
        return None;
    }
    Some((org, normalize(rest)))
}

/// Where a denied navigation lands: `/{org}/restricted-access?from=<attempted>`.
#[must_use]
pub fn restricted_access_path(org: &OrgName, attempted: &str) -> String {
    format!(
        "{}?from={}",
        org_path(org, RESTRICTED_ACCESS_FEATURE),
        urlencoding::encode(attempted)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/suppliers/", "/suppliers")]
    #[case("suppliers", "/suppliers")]
    #[case("/suppliers?page=2", "/suppliers")]
    #[case("/", "/")]
    #[case("", "/")]
    fn normalize_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn prefix_respects_segment_boundaries() {
        assert!(matches_prefix("/suppliers", "/suppliers"));
        assert!(matches_prefix("/suppliers/12", "/suppliers"));
        assert!(!matches_prefix("/suppliers-archive", "/suppliers"));
        assert!(!matches_prefix("/purchase-order-management", "/purchase-orders"));
    }

    #[test]
    fn auth_routes_include_reset_tokens() {
        assert!(is_auth_route("/login"));
        assert!(is_auth_route("/reset-password/abc123"));
        assert!(!is_auth_route("/Acme/login-history"));
    }

    #[test]
    fn split_org_path_extracts_feature() {
        assert_eq!(
            split_org_path("/AcmeCorp/purchase-orders/42?tab=items"),
            Some(("AcmeCorp", "/purchase-orders/42".to_string()))
        );
        assert_eq!(
            split_org_path("/AcmeCorp"),
            Some(("AcmeCorp", "/".to_string()))
        );
        assert_eq!(split_org_path("/"), None);
    }

    #[test]
    fn restricted_path_encodes_origin() {
        let org = OrgName::new("Acme Corp");
        assert_eq!(
            restricted_access_path(&org, "/AcmeCorp/purchase-order-management"),
            "/AcmeCorp/restricted-access?from=%2FAcmeCorp%2Fpurchase-order-management"
        );
    }

    #[test]
    fn org_path_joins_segments() {
        let org = OrgName::new("Acme");
        assert_eq!(org_path(&org, "dashboard"), "/Acme/dashboard");
        assert_eq!(org_path(&org, "/dashboard"), "/Acme/dashboard");
    }
}
