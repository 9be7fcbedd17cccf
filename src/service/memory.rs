//! In-memory task service.
//!
//! [`InMemoryTaskService`] keeps items in an [`IndexMap`] behind a
//! [`parking_lot::RwLock`], so loads return items in insertion order and
//! deletes keep the remaining order intact.

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::TaskItem;
use crate::error::TaskServiceError;

use super::TaskService;

/// Thread-safe in-memory [`TaskService`].
///
/// The store owns creation timestamps: an update that arrives without a
/// `created_at` keeps the stored one.
///
/// # Examples
///
/// ```
/// use tasklist::service::InMemoryTaskService;
/// use tasklist::TaskItem;
///
/// let service = InMemoryTaskService::new();
/// service.insert(TaskItem::new("Buy milk"));
/// assert_eq!(service.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryTaskService {
    items: RwLock<IndexMap<Uuid, TaskItem>>,
}

impl InMemoryTaskService {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `items`, in order.
    pub fn with_items(items: impl IntoIterator<Item = TaskItem>) -> Self {
        let service = Self::new();
        service.extend(items);
        service
    }

    /// Inserts or replaces an item, keeping its original position on replace.
    pub fn insert(&self, item: TaskItem) {
        self.items.write().insert(item.id, item);
    }

    /// Inserts several items in order.
    pub fn extend(&self, items: impl IntoIterator<Item = TaskItem>) {
        let mut guard = self.items.write();
        for item in items {
            guard.insert(item.id, item);
        }
    }

    /// Returns a copy of the item with `id`, if any.
    pub fn get(&self, id: &Uuid) -> Option<TaskItem> {
        self.items.read().get(id).cloned()
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl TaskService for InMemoryTaskService {
    async fn load_task_items(&self) -> Result<Vec<TaskItem>, TaskServiceError> {
        Ok(self.items.read().values().cloned().collect())
    }

    async fn update_task_item(&self, mut item: TaskItem) -> Result<TaskItem, TaskServiceError> {
        let mut guard = self.items.write();
        let stored = guard
            .get_mut(&item.id)
            .ok_or(TaskServiceError::NotFound { id: item.id })?;
        if item.created_at.is_none() {
            item.created_at = stored.created_at;
        }
        *stored = item.clone();
        Ok(item)
    }

    async fn delete_task_item(&self, item: TaskItem) -> Result<Uuid, TaskServiceError> {
        self.items
            .write()
            .shift_remove(&item.id)
            .map(|removed| removed.id)
            .ok_or(TaskServiceError::NotFound { id: item.id })
    }
}
