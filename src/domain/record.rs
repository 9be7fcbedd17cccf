//! The remote to-do record.

use serde::{Deserialize, Serialize};

/// One to-do entry as served by the remote feed.
///
/// Records are immutable values: an update produces a new record rather than
/// mutating this one.
///
/// # Serialization
///
/// Field names follow the feed's JSON (`userId` in camelCase).
///
/// # Examples
///
/// ```
/// use tasklist::Task;
///
/// let json = r#"{"id":1,"todo":"Buy milk","completed":false,"userId":26}"#;
/// let task: Task = serde_json::from_str(json).unwrap();
/// assert_eq!(task.id, 1);
/// assert_eq!(task.todo, "Buy milk");
/// assert_eq!(task.user_id, 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within a fetched collection.
    pub id: i64,
    /// Task description.
    pub todo: String,
    /// Completion flag.
    pub completed: bool,
    /// Owning user.
    pub user_id: i64,
}

/// One page of the remote feed: `{"todos": [...], "total", "skip", "limit"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskFeed {
    /// Records in this page.
    pub todos: Vec<Task>,
    /// Total number of records known to the server.
    #[serde(default)]
    pub total: u64,
    /// Offset of this page.
    #[serde(default)]
    pub skip: u64,
    /// Page size requested.
    #[serde(default)]
    pub limit: u64,
}
