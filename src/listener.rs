//! Result notifications from the task list manager.
//!
//! The presentation layer implements [`TaskListListener`] to receive outcomes.
//! Consumers that prefer an async stream can use [`ChannelListener`], which
//! turns each callback into a [`TaskListEvent`] on an unbounded tokio channel.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::TaskItem;
use crate::error::TaskServiceError;

/// Receiver of [`TaskListManager`](crate::manager::TaskListManager) outcomes.
///
/// Callbacks run on whichever runtime worker completed the request, so
/// implementations must be `Send + Sync` and should not block.
pub trait TaskListListener: Send + Sync {
    /// All items were loaded; `tasks` is already ordered by creation date.
    fn did_fetch_tasks(&self, tasks: Vec<TaskItem>);

    /// A single item was updated; `task` is the service's authoritative copy.
    fn did_fetch_task(&self, task: TaskItem);

    /// An item was deleted; `task_id` is the identifier the service returned.
    fn did_fetch_id(&self, task_id: Uuid);

    /// Any operation failed. Fetch, update and delete share this callback.
    fn did_fail_to_fetch_tasks(&self, error: TaskServiceError);
}

/// One listener notification as a value.
#[derive(Debug)]
pub enum TaskListEvent {
    /// See [`TaskListListener::did_fetch_tasks`].
    TasksFetched(Vec<TaskItem>),
    /// See [`TaskListListener::did_fetch_task`].
    TaskUpdated(TaskItem),
    /// See [`TaskListListener::did_fetch_id`].
    IdReceived(Uuid),
    /// See [`TaskListListener::did_fail_to_fetch_tasks`].
    Failed(TaskServiceError),
}

/// [`TaskListListener`] that forwards every callback into an mpsc channel.
///
/// Events sent after the receiver is dropped are discarded.
///
/// # Examples
///
/// ```
/// use tasklist::listener::{ChannelListener, TaskListEvent, TaskListListener};
/// use uuid::Uuid;
///
/// let (listener, mut events) = ChannelListener::new();
/// listener.did_fetch_id(Uuid::nil());
/// assert!(matches!(events.try_recv(), Ok(TaskListEvent::IdReceived(id)) if id.is_nil()));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<TaskListEvent>,
}

impl ChannelListener {
    /// Creates a listener and the receiving end of its channel.
    ///
    /// The listener is returned in an `Arc` because the manager only keeps a
    /// weak reference; the caller must hold on to it.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<TaskListEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }

    fn send(&self, event: TaskListEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("task list event receiver dropped; discarding event");
        }
    }
}

impl TaskListListener for ChannelListener {
    fn did_fetch_tasks(&self, tasks: Vec<TaskItem>) {
        self.send(TaskListEvent::TasksFetched(tasks));
    }

    fn did_fetch_task(&self, task: TaskItem) {
        self.send(TaskListEvent::TaskUpdated(task));
    }

    fn did_fetch_id(&self, task_id: Uuid) {
        self.send(TaskListEvent::IdReceived(task_id));
    }

    fn did_fail_to_fetch_tasks(&self, error: TaskServiceError) {
        self.send(TaskListEvent::Failed(error));
    }
}
