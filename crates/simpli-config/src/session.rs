//! Where the persisted session snapshot lives.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_storage_key() -> String {
    "pcp".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory for session state. Empty means `~/.simpli`.
    #[serde(default)]
    pub state_dir: String,

    /// File stem of the persisted snapshot (`<state_dir>/<storage_key>.json`).
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: String::new(),
            storage_key: default_storage_key(),
        }
    }
}

impl SessionConfig {
    pub fn resolve_state_dir(&self) -> Option<PathBuf> {
        if self.state_dir.is_empty() {
            dirs::home_dir().map(|home| home.join(".simpli"))
        } else {
            Some(PathBuf::from(&self.state_dir))
        }
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.resolve_state_dir()
            .map(|dir| dir.join(format!("{}.json", self.storage_key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_state_dir_wins() {
        let config = SessionConfig {
            state_dir: "/tmp/simpli-test".into(),
            ..Default::default()
        };
        assert_eq!(
            config.snapshot_path(),
            Some(PathBuf::from("/tmp/simpli-test/pcp.json"))
        );
    }

    #[test]
    fn default_storage_key_is_pcp() {
        assert_eq!(SessionConfig::default().storage_key, "pcp");
    }
}
