//! Org-scoped query cache.
//!
//! Entries are keyed by `(query name, org id, request target)`, so the same
//! query issued under two organizations never shares a result. The target
//! is the path plus query string, which keeps `/requisitions/pr_1` and
//! `/requisitions/pr_2` apart. A query with an
//! empty org id is disabled: it is neither read from nor written to the cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub query: &'static str,
    pub org: String,
    pub target: String,
}

impl CacheKey {
    /// `None` when `org` is empty (the query is disabled).
    #[must_use]
    pub fn new(query: &'static str, org: &str, target: impl Into<String>) -> Option<Self> {
        let org = org.trim();
        if org.is_empty() {
            return None;
        }
        Some(Self {
            query,
            org: org.to_string(),
            target: target.into(),
        })
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<CacheKey, Value>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let hit = self.lock().get(key).cloned();
        tracing::debug!(
            query = key.query,
            org = %key.org,
            target = %key.target,
            hit = hit.is_some(),
            "query cache lookup"
        );
        hit
    }

    pub fn insert(&self, key: CacheKey, value: Value) {
        self.lock().insert(key, value);
    }

    /// Drop every entry of `query` under `org`, whatever its target.
    pub fn invalidate(&self, query: &str, org: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !(key.query == query && key.org == org));
        let removed = before - entries.len();
        tracing::debug!(query, org, removed, "invalidated cached query");
        removed
    }

    /// Drop every entry belonging to `org`.
    pub fn invalidate_org(&self, org: &str) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.org != org);
        before - entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
