//! Configuration for the remote task service.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::TaskServiceError;

/// Default feed host.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Connection settings for [`RemoteTaskService`](crate::service::remote::RemoteTaskService).
///
/// Typically loaded from a `tasklist.toml` file:
///
/// ```toml
/// base_url = "https://dummyjson.com"
/// timeout_ms = 10000
/// ```
///
/// # Examples
///
/// ```
/// use tasklist::config::ServiceConfig;
///
/// let config = ServiceConfig::default();
/// assert_eq!(config.base_url, "https://dummyjson.com");
/// assert_eq!(config.timeout_ms, 30_000);
/// assert_eq!(config.todos_url(), "https://dummyjson.com/todos?limit=0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Root URL of the feed; `/todos?limit=0` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30_000 // 30 seconds
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
        }
    }
}

impl ServiceConfig {
    /// Create a configuration pointing at `base_url` with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaskServiceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, TaskServiceError> {
        toml::from_str(content).map_err(Into::into)
    }

    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// - `TASKLIST_BASE_URL` - feed root URL
    /// - `TASKLIST_TIMEOUT_MS` - request timeout in milliseconds
    ///
    /// Unparseable timeouts are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("TASKLIST_BASE_URL") {
            config.base_url = url;
        }
        if let Some(ms) = lookup("TASKLIST_TIMEOUT_MS").and_then(|v| v.parse::<u64>().ok()) {
            config.timeout_ms = ms;
        }
        config
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of the todo feed.
    ///
    /// The feed pages at 30 items by default; `limit=0` asks for all of them.
    pub fn todos_url(&self) -> String {
        format!("{}/todos?limit=0", self.base_url.trim_end_matches('/'))
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, TaskServiceError> {
        toml::to_string_pretty(self).map_err(|e| TaskServiceError::Config(e.to_string()))
    }
}
