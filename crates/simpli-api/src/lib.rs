//! # simpli-api
//!
//! HTTP client for the SimpliP2P REST API.
//!
//! Every request carries `Content-Type: application/json`, the bearer token
//! when signed in, and the `oid` header naming the current organization.
//! Org-scoped reads go through an in-process [`QueryCache`] keyed by
//! organization; endpoint wrappers live in one module per resource:
//! - [`auth`]: login and memberships
//! - [`requisitions`]: purchase requisitions and their status transitions
//! - [`orders`]: purchase orders, creation, and status transitions
//! - [`directory`]: budgets, suppliers, members

pub mod auth;
pub mod cache;
pub mod directory;
pub mod orders;
pub mod requisitions;

mod error;
mod http;

pub use cache::{CacheKey, QueryCache};
pub use error::ApiError;
pub use http::{check_response, read_json, unwrap_data};

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use simpli_config::ApiConfig;

/// Header naming the organization a request acts in.
pub const ORG_HEADER: &str = "oid";

/// Names of the cached org-scoped queries.
pub mod queries {
    pub const REQUISITIONS: &str = "requisitions";
    pub const REQUISITION: &str = "requisition";
    pub const ORDERS: &str = "purchase_orders";
    pub const ORDER: &str = "purchase_order";
    pub const BUDGETS: &str = "budgets";
    pub const SUPPLIERS: &str = "suppliers";
    pub const MEMBERS: &str = "members";
}

/// Body of every status-transition `PATCH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub status: String,
    pub budget_id: String,
    pub justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

/// Client for one user acting in (at most) one organization.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    org_id: String,
    cache: Arc<QueryCache>,
}

impl ApiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is unset or the
    /// underlying `reqwest::Client` fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        if !config.is_configured() {
            return Err(ApiError::Config("api.base_url is not set".into()));
        }
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            token: None,
            org_id: String::new(),
            cache: Arc::new(QueryCache::new()),
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Act in `org_id`. An empty id disables org-scoped queries.
    #[must_use]
    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = org_id.into();
        self
    }

    #[must_use]
    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the JSON, bearer, and `oid` headers attached.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if !self.org_id.is_empty() {
            builder = builder.header(ORG_HEADER, &self.org_id);
        }
        builder
    }

    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    #[must_use]
    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Transport, status, or parse errors as [`ApiError`].
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = builder.send().await?;
        tracing::debug!(status = %resp.status(), url = %resp.url(), "api response");
        read_json(resp).await
    }

    /// Org-scoped cached `GET`.
    ///
    /// # Errors
    ///
    /// [`ApiError::OrganizationRequired`] when no org is selected; otherwise
    /// the errors of [`Self::send`].
    pub async fn cached_get<T: DeserializeOwned>(
        &self,
        query: &'static str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let target = request_target(path, params);
        let key = CacheKey::new(query, &self.org_id, target.as_str())
            .ok_or(ApiError::OrganizationRequired { query })?;

        let value = if let Some(hit) = self.cache.get(&key) {
            hit
        } else {
            let fresh: serde_json::Value = self.send(self.get(&target)).await?;
            self.cache.insert(key, fresh.clone());
            fresh
        };
        unwrap_data(value)
    }

    /// Invalidate cached `queries` for the current org.
    pub fn invalidate(&self, queries: &[&str]) {
        for query in queries {
            self.cache.invalidate(query, &self.org_id);
        }
    }
}

/// `path?query`, or just `path` when every param is empty.
#[must_use]
pub fn request_target(path: &str, params: &[(&str, String)]) -> String {
    let qs = query_string(params);
    if qs.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{qs}")
    }
}

/// `a=1&b=two%20words`, skipping empty values.
#[must_use]
pub fn query_string(params: &[(&str, String)]) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
