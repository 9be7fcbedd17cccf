//! Task service trait and implementations.
//!
//! [`TaskService`] is the seam between the
//! [`TaskListManager`](crate::manager::TaskListManager) and whatever performs
//! persistence or network work. The manager receives it as an
//! `Arc<dyn TaskService>` at construction, so tests can pass their own doubles.
//!
//! # Implementations
//!
//! - [`InMemoryTaskService`](memory::InMemoryTaskService) -- insertion-ordered
//!   in-process store.
//! - [`RemoteTaskService`](remote::RemoteTaskService) -- imports the remote
//!   todo feed once and serves edits from the imported copy. Available behind
//!   the `http-client` feature.

pub mod memory;
#[cfg(feature = "http-client")]
pub mod remote;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::TaskItem;
use crate::error::TaskServiceError;

pub use memory::InMemoryTaskService;
#[cfg(feature = "http-client")]
pub use remote::RemoteTaskService;

/// Asynchronous load/update/delete operations on task items.
///
/// Every call resolves exactly once, to either a value or an error.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the manager issues calls from
/// spawned tasks and does not serialize them, so concurrent calls must be
/// safe.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Loads all task items. Order is implementation defined.
    ///
    /// # Errors
    ///
    /// Any [`TaskServiceError`] the backend produces.
    async fn load_task_items(&self) -> Result<Vec<TaskItem>, TaskServiceError>;

    /// Submits `item` for update and returns the authoritative stored copy,
    /// which may differ from what was submitted.
    ///
    /// # Errors
    ///
    /// - [`TaskServiceError::NotFound`] if no item with `item.id` exists.
    /// - Any backend failure.
    async fn update_task_item(&self, item: TaskItem) -> Result<TaskItem, TaskServiceError>;

    /// Deletes `item` and returns the identifier of the deleted item.
    ///
    /// # Errors
    ///
    /// - [`TaskServiceError::NotFound`] if no item with `item.id` exists.
    /// - Any backend failure.
    async fn delete_task_item(&self, item: TaskItem) -> Result<Uuid, TaskServiceError>;
}
