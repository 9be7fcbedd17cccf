//! The UUID-identified task item handled by the manager.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Task;

/// A to-do entry managed by a [`TaskService`](crate::service::TaskService).
///
/// Items are created by the service (on load or import) and replaced by the
/// authoritative copy the service returns on update. The manager never builds
/// or edits one.
///
/// # Examples
///
/// ```
/// use tasklist::TaskItem;
///
/// let item = TaskItem::new("Write report");
/// assert!(!item.completed);
/// assert!(item.created_at.is_some());
///
/// let undated = TaskItem::new("Call back").without_timestamp();
/// assert!(undated.created_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    /// Unique identifier.
    pub id: Uuid,
    /// Creation time. Items imported without one sort after dated items.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Task description.
    pub text: String,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

impl TaskItem {
    /// Creates an open item with a fresh v4 id, stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Some(Utc::now()),
            text: text.into(),
            completed: false,
        }
    }

    /// Converts a remote [`Task`] record into an item with a fresh id.
    ///
    /// The record's integer id and owner are not carried over.
    pub fn from_record(task: &Task, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            text: task.todo.clone(),
            completed: task.completed,
        }
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Clears the creation timestamp.
    pub fn without_timestamp(mut self) -> Self {
        self.created_at = None;
        self
    }

    /// Returns a copy with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}
