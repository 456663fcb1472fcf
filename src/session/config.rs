use crate::graph::{Field, default_headers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

/// Tunables for a `Session`. Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of entries kept in the request history.
    pub history_limit: usize,
    /// Maximum number of sent bodies remembered per method node.
    pub body_history_limit: usize,
    /// Quiet period after the last mutation before a snapshot is written.
    pub persist_debounce_ms: u64,
    pub request_timeout_ms: u64,
    /// Header seed for method nodes created through the session.
    pub default_headers: Vec<Field>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            body_history_limit: 10,
            persist_debounce_ms: 500,
            request_timeout_ms: 30_000,
            default_headers: default_headers(),
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn persist_debounce(&self) -> Duration {
        Duration::from_millis(self.persist_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
