//! Error types for task service operations.
//!
//! [`TaskServiceError`] is the single error category surfaced by a
//! [`TaskService`](crate::service::TaskService). The manager never inspects
//! the variant; it forwards the value to the listener as-is.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while loading, updating or deleting task items.
///
/// # Examples
///
/// ```
/// use tasklist::TaskServiceError;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// let err = TaskServiceError::NotFound { id };
/// assert!(err.to_string().contains("00000000-0000-0000-0000-000000000000"));
/// assert!(!err.is_transient());
/// ```
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// No task item with the given identifier exists.
    #[error("task item not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote endpoint answered with a non-success status.
    #[error("unexpected response status: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O failure (reading a config file, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No tokio runtime was available to run requests on.
    #[error("no tokio runtime available: {0}")]
    Runtime(String),
}

impl TaskServiceError {
    /// Returns `true` for failures that may succeed if the caller asks again.
    ///
    /// The manager itself never retries; this is a hint for the listener.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::NotFound { .. }
            | Self::Decode(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Runtime(_) => false,
        }
    }
}

impl From<serde_json::Error> for TaskServiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for TaskServiceError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML parse error: {err}"))
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for TaskServiceError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TaskServiceError>;
