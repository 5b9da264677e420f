use serde::de::DeserializeOwned;
use simpli_core::enums::PermissionTag;

/// Parse a status value in any case, with `-` or `_` separators.
pub fn parse_status<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse permission tags, rejecting the whole list on the first unknown tag.
pub fn parse_permissions(raw: &[String]) -> anyhow::Result<Vec<PermissionTag>> {
    raw.iter()
        .map(|tag| {
            tag.parse::<PermissionTag>()
                .map_err(|error| anyhow::anyhow!("invalid permission '{tag}': {error}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use simpli_core::enums::{OrderStatus, PermissionTag, RequisitionStatus};

    use super::{parse_permissions, parse_status};

    #[test]
    fn parses_lowercase_status() {
        let status: RequisitionStatus =
            parse_status("pending", "status").expect("status should parse");
        assert_eq!(status, RequisitionStatus::Pending);
    }

    #[test]
    fn parses_hyphenated_status() {
        let status: RequisitionStatus =
            parse_status("saved-for-later", "status").expect("status should parse");
        assert_eq!(status, RequisitionStatus::SavedForLater);
    }

    #[test]
    fn errors_on_invalid_status() {
        let err = parse_status::<OrderStatus>("shipped", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'shipped'"));
    }

    #[test]
    fn permissions_accept_hyphens() {
        let tags = parse_permissions(&["get-budgets".to_string(), "manage_suppliers".to_string()])
            .expect("tags should parse");
        assert_eq!(
            tags,
            vec![PermissionTag::GetBudgets, PermissionTag::ManageSuppliers]
        );
    }

    #[test]
    fn unknown_permission_is_an_error() {
        assert!(parse_permissions(&["approve_everything".to_string()]).is_err());
    }
}
