//! Current-organization session context and its on-disk snapshot.
//!
//! The snapshot is JSON at `<state_dir>/<storage_key>.json`:
//!
//! ```json
//! {"version": 1, "current_org": "org_1", "org_name": "AcmeCorp",
//!  "selected_requisition": null, "sidebar_open": true}
//! ```
//!
//! A snapshot with any other version is discarded.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simpli_config::SessionConfig;
use simpli_core::OrgName;
use simpli_core::entities::{Memberships, OrganizationMembership};

use crate::error::AuthError;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Which organization the user is acting in, plus small UI preferences.
///
/// An empty `current_org` means no organization is selected, and every
/// org-scoped query is disabled until one is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub current_org: String,
    #[serde(default)]
    pub org_name: OrgName,
    #[serde(default)]
    pub selected_requisition: Option<String>,
    #[serde(default = "default_sidebar_open")]
    pub sidebar_open: bool,
}

const fn default_sidebar_open() -> bool {
    true
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            current_org: String::new(),
            org_name: OrgName::default(),
            selected_requisition: None,
            sidebar_open: default_sidebar_open(),
        }
    }
}

impl SessionContext {
    pub fn set_current_org(&mut self, org_id: &str) {
        self.current_org = org_id.trim().to_string();
    }

    /// Store the sanitized form of `display_name`.
    pub fn set_org_name(&mut self, display_name: &str) {
        self.org_name = OrgName::new(display_name);
    }

    pub fn select_requisition(&mut self, requisition_id: Option<String>) {
        self.selected_requisition = requisition_id;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    #[must_use]
    pub fn current_org(&self) -> Option<&str> {
        Some(self.current_org.as_str()).filter(|id| !id.is_empty())
    }

    /// The active membership for the current org.
    ///
    /// # Errors
    ///
    /// `AuthError::NoOrganization` when no org is selected or the membership
    /// is gone or deactivated.
    pub fn membership<'a>(
        &self,
        memberships: &'a Memberships,
    ) -> Result<&'a OrganizationMembership, AuthError> {
        self.current_org()
            .and_then(|id| memberships.get(id))
            .filter(|m| m.is_active())
            .ok_or(AuthError::NoOrganization)
    }

    /// Switch to the org matching `target` by id or by (sanitized) name.
    ///
    /// Selecting a different org clears the selected requisition.
    ///
    /// # Errors
    ///
    /// `AuthError::NoOrganization` if no active membership matches.
    pub fn switch_org<'a>(
        &mut self,
        memberships: &'a Memberships,
        target: &str,
    ) -> Result<&'a OrganizationMembership, AuthError> {
        let membership = memberships
            .get(target)
            .filter(|m| m.is_active())
            .or_else(|| memberships.find_active_by_name(&OrgName::new(target)))
            .ok_or(AuthError::NoOrganization)?;

        if self.current_org != membership.org_id {
            self.selected_requisition = None;
        }
        self.set_current_org(&membership.org_id);
        self.org_name = membership.org_name.clone();
        tracing::info!(
            org_id = %membership.org_id,
            org_name = %membership.org_name,
            "switched organization"
        );
        Ok(membership)
    }

    /// Fill an empty context with the first active membership.
    ///
    /// Returns whether the context changed.
    pub fn ensure_org(&mut self, memberships: &Memberships) -> bool {
        if self.membership(memberships).is_ok() {
            return false;
        }
        match memberships.active().next() {
            Some(first) => {
                self.set_current_org(&first.org_id);
                self.org_name = first.org_name.clone();
                self.selected_requisition = None;
                true
            }
            None => {
                let changed = self.current_org().is_some();
                self.current_org.clear();
                self.org_name = OrgName::default();
                changed
            }
        }
    }
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    #[serde(flatten)]
    context: &'a SessionContext,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Reads and writes the [`SessionContext`] snapshot file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// # Errors
    ///
    /// `AuthError::SessionStoreError` when no state directory can be resolved.
    pub fn from_config(config: &SessionConfig) -> Result<Self, AuthError> {
        config
            .snapshot_path()
            .map(Self::new)
            .ok_or_else(|| AuthError::SessionStoreError("cannot resolve state directory".into()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot. A missing, unreadable, or unknown-version file
    /// yields the default context.
    ///
    /// # Errors
    ///
    /// `AuthError::SessionStoreError` only on I/O errors other than not-found.
    pub fn load(&self) -> Result<SessionContext, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionContext::default());
            }
            Err(e) => {
                return Err(AuthError::SessionStoreError(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        Ok(parse_snapshot(&raw, &self.path))
    }

    /// # Errors
    ///
    /// `AuthError::SessionStoreError` if the directory or file cannot be written.
    pub fn save(&self, context: &SessionContext) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::SessionStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
        }
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            context,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AuthError::SessionStoreError(format!("serialize session: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| AuthError::SessionStoreError(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AuthError::SessionStoreError(format!("rename to {}: {e}", self.path.display()))
        })
    }

    /// # Errors
    ///
    /// `AuthError::SessionStoreError` if the file exists and cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStoreError(format!(
                "remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

fn parse_snapshot(raw: &str, path: &Path) -> SessionContext {
    match serde_json::from_str::<VersionProbe>(raw) {
        Ok(VersionProbe {
            version: Some(SNAPSHOT_VERSION),
        }) => serde_json::from_str(raw).unwrap_or_else(|error| {
            tracing::warn!(
                %error,
                path = %path.display(),
                "discarding unreadable session snapshot"
            );
            SessionContext::default()
        }),
        Ok(VersionProbe { version }) => {
            tracing::warn!(
                ?version,
                expected = SNAPSHOT_VERSION,
                path = %path.display(),
                "discarding session snapshot with unknown version"
            );
            SessionContext::default()
        }
        Err(error) => {
            tracing::warn!(
                %error,
                path = %path.display(),
                "discarding unreadable session snapshot"
            );
            SessionContext::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use simpli_core::enums::PermissionTag;

    use super::*;

    fn memberships() -> Memberships {
        let make = |id: &str, name: &str| OrganizationMembership {
            org_id: id.into(),
            org_name: OrgName::new(name),
            role: "member".into(),
            is_creator: false,
            permissions: [PermissionTag::GetSuppliers].into_iter().collect(),
            deactivated_at: None,
        };
        Memberships::from_vec(vec![make("org_a", "Acme Corp"), make("org_b", "Globex")]).unwrap()
    }

    #[test]
    fn org_name_is_sanitized() {
        let mut ctx = SessionContext::default();
        ctx.set_org_name("Acme Corp");
        assert_eq!(ctx.org_name.as_str(), "AcmeCorp");
    }

    #[test]
    fn empty_current_org_is_none() {
        let mut ctx = SessionContext::default();
        assert_eq!(ctx.current_org(), None);
        ctx.set_current_org("  ");
        assert_eq!(ctx.current_org(), None);
        ctx.set_current_org("org_a");
        assert_eq!(ctx.current_org(), Some("org_a"));
    }

    #[test]
    fn switch_by_name_or_id() {
        let set = memberships();
        let mut ctx = SessionContext::default();
        ctx.select_requisition(Some("pr_1".into()));

        let m = ctx.switch_org(&set, "Acme Corp").unwrap();
        assert_eq!(m.org_id, "org_a");
        assert_eq!(ctx.org_name.as_str(), "AcmeCorp");
        assert_eq!(ctx.selected_requisition, None);

        ctx.switch_org(&set, "org_b").unwrap();
        assert_eq!(ctx.current_org(), Some("org_b"));
        assert_eq!(ctx.org_name.as_str(), "Globex");
    }

    #[test]
    fn switch_to_inactive_or_unknown_fails() {
        let mut set = memberships();
        set.deactivate("org_b", Utc::now()).unwrap();
        let mut ctx = SessionContext::default();
        assert!(matches!(
            ctx.switch_org(&set, "Globex"),
            Err(AuthError::NoOrganization)
        ));
        assert!(ctx.switch_org(&set, "Initech").is_err());
        assert_eq!(ctx.current_org(), None);
    }

    #[test]
    fn ensure_org_picks_first_active() {
        let set = memberships();
        let mut ctx = SessionContext::default();
        assert!(ctx.ensure_org(&set));
        assert_eq!(ctx.current_org(), Some("org_a"));
        assert!(!ctx.ensure_org(&set));
    }

    #[test]
    fn store_roundtrips_versioned_snapshot() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("state").join("pcp.json"));

        let mut ctx = SessionContext::default();
        ctx.switch_org(&memberships(), "Globex").unwrap();
        ctx.toggle_sidebar();
        store.save(&ctx).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["org_name"], "Globex");

        assert_eq!(store.load().unwrap(), ctx);
    }

    #[test]
    fn missing_snapshot_loads_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("pcp.json"));
        assert_eq!(store.load().unwrap(), SessionContext::default());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn unknown_version_is_discarded() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pcp.json");
        fs::write(&path, r#"{"version":2,"current_org":"org_a","org_name":"Acme"}"#).unwrap();
        assert_eq!(
            SessionStore::new(path.clone()).load().unwrap(),
            SessionContext::default()
        );

        fs::write(&path, r#"{"current_org":"org_a"}"#).unwrap();
        assert_eq!(SessionStore::new(path).load().unwrap(), SessionContext::default());
    }

    #[test]
    fn persisted_org_name_is_resanitized() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("pcp.json");
        fs::write(&path, r#"{"version":1,"current_org":"org_a","org_name":"Acme Corp"}"#).unwrap();
        let ctx = SessionStore::new(path).load().unwrap();
        assert_eq!(ctx.org_name.as_str(), "AcmeCorp");
        assert!(ctx.sidebar_open);
    }
}
