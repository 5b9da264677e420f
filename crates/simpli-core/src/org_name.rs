//! Sanitized organization names.
//!
//! Organization display names are embedded directly in route paths
//! (`/{org_name}/dashboard`), so every stored name has its whitespace removed.
//! Case is preserved.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Strip all whitespace from an organization display name.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// An organization name that is always in sanitized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct OrgName(String);

impl OrgName {
    #[must_use]
    pub fn new(display_name: &str) -> Self {
        Self(sanitize(display_name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrgName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrgName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl<'de> Deserialize<'de> for OrgName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(|raw| Self::new(&raw))
    }
}
