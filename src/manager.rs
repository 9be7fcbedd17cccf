//! The task list manager.
//!
//! [`TaskListManager`] issues one request per call against its
//! [`TaskService`], orders fetched items by creation date, and reports each
//! outcome to its [`TaskListListener`].
//!
//! # Concurrency
//!
//! Every operation is spawned onto the tokio runtime and returns immediately.
//! Calls are independent: nothing is queued, deduplicated or cancelled, and
//! completions may arrive in any order. The returned [`JoinHandle`] can be
//! dropped without cancelling the request.
//!
//! # Listener lifetime
//!
//! The manager keeps only a [`Weak`] reference to its listener, looked up when
//! a request completes. If the listener (or the manager itself) has been
//! dropped by then, the notification is discarded.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use tasklist::listener::{ChannelListener, TaskListEvent};
//! use tasklist::manager::TaskListManager;
//! use tasklist::service::InMemoryTaskService;
//! use tasklist::TaskItem;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let service = Arc::new(InMemoryTaskService::with_items([TaskItem::new("Buy milk")]));
//! let (listener, mut events) = ChannelListener::new();
//!
//! let manager = TaskListManager::for_current_runtime(service).unwrap();
//! manager.set_listener(&listener);
//! manager.fetch_tasks();
//!
//! match events.recv().await {
//!     Some(TaskListEvent::TasksFetched(tasks)) => assert_eq!(tasks.len(), 1),
//!     other => panic!("unexpected event: {other:?}"),
//! }
//! # }
//! ```

use std::future::Future;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::TaskItem;
use crate::error::TaskServiceError;
use crate::listener::TaskListListener;
use crate::ordering::sort_by_created_at;
use crate::service::TaskService;

type ListenerSlot = RwLock<Option<Weak<dyn TaskListListener>>>;

/// Orchestrates fetch, update and delete against a [`TaskService`].
///
/// Requests run on the runtime [`Handle`] given at construction, so operations
/// can be called from any thread, inside a runtime or not.
pub struct TaskListManager {
    service: Arc<dyn TaskService>,
    listener: Arc<ListenerSlot>,
    runtime: Handle,
}

impl std::fmt::Debug for TaskListManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListManager")
            .field("has_listener", &self.listener().is_some())
            .field("runtime", &self.runtime.runtime_flavor())
            .finish()
    }
}

impl TaskListManager {
    /// Creates a manager over `service` with no listener; requests are spawned
    /// onto `runtime`.
    pub fn new(service: Arc<dyn TaskService>, runtime: Handle) -> Self {
        Self {
            service,
            listener: Arc::new(RwLock::new(None)),
            runtime,
        }
    }

    /// Creates a manager bound to the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// [`TaskServiceError::Runtime`] when called outside a tokio runtime.
    pub fn for_current_runtime(service: Arc<dyn TaskService>) -> Result<Self, TaskServiceError> {
        let runtime =
            Handle::try_current().map_err(|e| TaskServiceError::Runtime(e.to_string()))?;
        Ok(Self::new(service, runtime))
    }

    /// Sets the listener. Only a weak reference is kept.
    pub fn set_listener<L: TaskListListener + 'static>(&self, listener: &Arc<L>) {
        let weak = Arc::downgrade(listener) as Weak<dyn TaskListListener>;
        *self.listener.write() = Some(weak);
    }

    /// Builder form of [`set_listener`](Self::set_listener).
    pub fn with_listener<L: TaskListListener + 'static>(self, listener: &Arc<L>) -> Self {
        self.set_listener(listener);
        self
    }

    /// Removes the listener; in-flight requests will report to nobody.
    pub fn clear_listener(&self) {
        *self.listener.write() = None;
    }

    /// Returns the listener if one is set and still alive.
    pub fn listener(&self) -> Option<Arc<dyn TaskListListener>> {
        self.listener.read().as_ref().and_then(Weak::upgrade)
    }

    /// Loads all items, sorts them by creation date and reports them via
    /// [`did_fetch_tasks`](TaskListListener::did_fetch_tasks), or reports the
    /// error via [`did_fail_to_fetch_tasks`](TaskListListener::did_fail_to_fetch_tasks).
    pub fn fetch_tasks(&self) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let slot = Arc::downgrade(&self.listener);
        tracing::debug!("fetching task items");
        self.spawn(async move {
            match service.load_task_items().await {
                Ok(mut tasks) => {
                    sort_by_created_at(&mut tasks);
                    tracing::debug!(count = tasks.len(), "task items fetched");
                    notify(&slot, |listener| listener.did_fetch_tasks(tasks));
                },
                Err(error) => {
                    tracing::warn!(%error, "failed to fetch task items");
                    notify(&slot, |listener| listener.did_fail_to_fetch_tasks(error));
                },
            }
        })
    }

    /// Submits `item` for update and reports the service's returned copy via
    /// [`did_fetch_task`](TaskListListener::did_fetch_task).
    pub fn update_task_item(&self, item: TaskItem) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let slot = Arc::downgrade(&self.listener);
        tracing::debug!(task_id = %item.id, "updating task item");
        self.spawn(async move {
            match service.update_task_item(item).await {
                Ok(task) => notify(&slot, |listener| listener.did_fetch_task(task)),
                Err(error) => {
                    tracing::warn!(%error, "failed to update task item");
                    notify(&slot, |listener| listener.did_fail_to_fetch_tasks(error));
                },
            }
        })
    }

    /// Submits `item` for deletion and reports the returned identifier via
    /// [`did_fetch_id`](TaskListListener::did_fetch_id).
    pub fn delete_task_item(&self, item: TaskItem) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let slot = Arc::downgrade(&self.listener);
        tracing::debug!(task_id = %item.id, "deleting task item");
        self.spawn(async move {
            match service.delete_task_item(item).await {
                Ok(task_id) => notify(&slot, |listener| listener.did_fetch_id(task_id)),
                Err(error) => {
                    tracing::warn!(%error, "failed to delete task item");
                    notify(&slot, |listener| listener.did_fail_to_fetch_tasks(error));
                },
            }
        })
    }

    fn spawn<F>(&self, future: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(future)
    }
}

/// Delivers one notification if both the manager and its listener still exist.
fn notify(slot: &Weak<ListenerSlot>, deliver: impl FnOnce(Arc<dyn TaskListListener>)) {
    let listener = slot.upgrade().and_then(|slot| {
        let guard = slot.read();
        guard.as_ref().and_then(Weak::upgrade)
    });
    match listener {
        Some(listener) => deliver(listener),
        None => tracing::debug!("no live listener; dropping task list notification"),
    }
}
