use anyhow::Context;
use simpli_api::ApiClient;
use simpli_auth::{NavigationGuard, RouteTable, SessionContext, SessionStore};
use simpli_config::SimpliConfig;
use simpli_core::entities::{Memberships, OrganizationMembership};

/// Shared resources for one authenticated command.
pub struct AppContext {
    pub config: SimpliConfig,
    pub client: ApiClient,
    pub memberships: Memberships,
    pub session: SessionContext,
    pub store: SessionStore,
}

impl AppContext {
    /// Resolve the stored token, fetch memberships, and restore the org context.
    ///
    /// A snapshot pointing at an org the user no longer belongs to is replaced
    /// with the first active membership.
    pub async fn init(config: SimpliConfig) -> anyhow::Result<Self> {
        let api = config.require_api()?;
        let token = simpli_auth::resolve_token()?;
        let client = ApiClient::new(api)?.with_token(token);

        let memberships = client
            .memberships()
            .await
            .context("failed to load organization memberships")?;

        let store = SessionStore::from_config(&config.session)?;
        let mut session = store.load()?;
        if session.ensure_org(&memberships) {
            tracing::debug!(org_id = ?session.current_org(), "reset organization context");
            store.save(&session)?;
        }

        let client = match session.current_org() {
            Some(org_id) => client.with_org(org_id),
            None => client,
        };

        Ok(Self {
            config,
            client,
            memberships,
            session,
            store,
        })
    }

    /// Active membership for the current org.
    pub fn membership(&self) -> anyhow::Result<&OrganizationMembership> {
        Ok(self.session.membership(&self.memberships)?)
    }

    pub const fn route_table(&self) -> RouteTable {
        RouteTable::new(self.config.access.unmatched_routes)
    }

    pub fn guard(&self) -> NavigationGuard<'_> {
        NavigationGuard::new(self.route_table(), &self.memberships)
            .with_preferred_org(self.session.current_org())
    }

    /// Rebind the API client to the current org and persist the context.
    pub fn commit_session(&mut self) -> anyhow::Result<()> {
        self.store.save(&self.session)?;
        if let Some(org_id) = self.session.current_org() {
            self.client = self.client.clone().with_org(org_id);
        }
        Ok(())
    }
}
