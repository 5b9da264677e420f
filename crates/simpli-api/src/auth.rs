//! Login and membership endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use simpli_core::OrgName;
use simpli_core::entities::{Memberships, OrganizationMembership};
use simpli_core::enums::PermissionTag;
use simpli_core::identity::AuthIdentity;

use crate::{ApiClient, error::ApiError};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Tokens and identity returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthIdentity,
}

/// Membership as the API sends it. Permission tags stay strings until
/// conversion so one unknown tag cannot fail the whole list.
#[derive(Debug, Clone, Deserialize)]
struct MembershipRecord {
    #[serde(alias = "orgId", alias = "organizationId")]
    org_id: String,
    #[serde(alias = "orgName", alias = "organizationName")]
    org_name: String,
    #[serde(default)]
    role: String,
    #[serde(default, alias = "isCreator")]
    is_creator: bool,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default, alias = "deactivatedAt")]
    deactivated_at: Option<DateTime<Utc>>,
}

impl MembershipRecord {
    fn into_membership(self) -> OrganizationMembership {
        let permissions = self
            .permissions
            .iter()
            .filter_map(|raw| match raw.parse::<PermissionTag>() {
                Ok(tag) => Some(tag),
                Err(_) => {
                    tracing::debug!(
                        org_id = %self.org_id,
                        tag = %raw,
                        "dropping unknown permission tag"
                    );
                    None
                }
            })
            .collect();

        OrganizationMembership {
            org_name: OrgName::new(&self.org_name),
            org_id: self.org_id,
            role: self.role,
            is_creator: self.is_creator,
            permissions,
            deactivated_at: self.deactivated_at,
        }
    }
}

fn parse_memberships(records: Vec<MembershipRecord>) -> Result<Memberships, ApiError> {
    Memberships::from_vec(
        records
            .into_iter()
            .map(MembershipRecord::into_membership)
            .collect(),
    )
    .map_err(|e| ApiError::Parse(e.to_string()))
}

impl ApiClient {
    /// Exchange credentials for a token pair.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthorized`] on bad credentials, or any transport error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest { email, password };
        self.send(self.post("/auth/login").json(&body)).await
    }

    /// All of the signed-in user's organization memberships.
    ///
    /// # Errors
    ///
    /// Transport or status errors, or [`ApiError::Parse`] if the list holds
    /// two memberships for one organization.
    pub async fn memberships(&self) -> Result<Memberships, ApiError> {
        let records: Vec<MembershipRecord> = self.send(self.get("/auth/memberships")).await?;
        parse_memberships(records)
    }
}
