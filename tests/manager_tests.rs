//! Integration tests for TaskListManager.
//!
//! Tests cover the fetch ordering, pass-through of update and delete results,
//! error forwarding, listener lifetime, and independence of concurrent calls.
//! Organized into module blocks per concern.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use uuid::Uuid;

use tasklist::listener::{ChannelListener, TaskListEvent, TaskListListener};
use tasklist::manager::TaskListManager;
use tasklist::service::{InMemoryTaskService, TaskService};
use tasklist::{TaskItem, TaskServiceError};

type Scripted<T> = Mutex<VecDeque<Result<T, TaskServiceError>>>;

/// Service double that replays scripted results, optionally holding each call
/// until a permit is released.
#[derive(Default)]
struct ScriptedService {
    loads: Scripted<Vec<TaskItem>>,
    updates: Scripted<TaskItem>,
    deletes: Scripted<Uuid>,
    gate: Option<Arc<Semaphore>>,
    calls: AtomicUsize,
}

impl ScriptedService {
    fn gated(gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn on_load(self, result: Result<Vec<TaskItem>, TaskServiceError>) -> Self {
        self.loads.lock().push_back(result);
        self
    }

    fn on_update(self, result: Result<TaskItem, TaskServiceError>) -> Self {
        self.updates.lock().push_back(result);
        self
    }

    fn on_delete(self, result: Result<Uuid, TaskServiceError>) -> Self {
        self.deletes.lock().push_back(result);
        self
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl TaskService for ScriptedService {
    async fn load_task_items(&self) -> Result<Vec<TaskItem>, TaskServiceError> {
        self.enter().await;
        self.loads.lock().pop_front().expect("unscripted load")
    }

    async fn update_task_item(&self, _item: TaskItem) -> Result<TaskItem, TaskServiceError> {
        self.enter().await;
        self.updates.lock().pop_front().expect("unscripted update")
    }

    async fn delete_task_item(&self, _item: TaskItem) -> Result<Uuid, TaskServiceError> {
        self.enter().await;
        self.deletes.lock().pop_front().expect("unscripted delete")
    }
}

/// Listener that records every callback.
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<TaskListEvent>>,
}

impl RecordingListener {
    fn take(&self) -> Vec<TaskListEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl TaskListListener for RecordingListener {
    fn did_fetch_tasks(&self, tasks: Vec<TaskItem>) {
        self.events.lock().push(TaskListEvent::TasksFetched(tasks));
    }

    fn did_fetch_task(&self, task: TaskItem) {
        self.events.lock().push(TaskListEvent::TaskUpdated(task));
    }

    fn did_fetch_id(&self, task_id: Uuid) {
        self.events.lock().push(TaskListEvent::IdReceived(task_id));
    }

    fn did_fail_to_fetch_tasks(&self, error: TaskServiceError) {
        self.events.lock().push(TaskListEvent::Failed(error));
    }
}

fn dated(text: &str, secs: i64) -> TaskItem {
    TaskItem::new(text).with_created_at(Utc.timestamp_opt(secs, 0).single().unwrap())
}

fn undated(text: &str) -> TaskItem {
    TaskItem::new(text).without_timestamp()
}

fn texts(tasks: &[TaskItem]) -> Vec<&str> {
    tasks.iter().map(|t| t.text.as_str()).collect()
}

fn manager_with(
    service: impl TaskService + 'static,
) -> (TaskListManager, Arc<RecordingListener>) {
    let listener = Arc::new(RecordingListener::default());
    let manager = TaskListManager::new(Arc::new(service), Handle::current())
        .with_listener(&listener);
    (manager, listener)
}

// ─── Fetch Tests ────────────────────────────────────────────────────────────

mod fetch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_fetch_orders_dated_then_undated() {
        let service = ScriptedService::default().on_load(Ok(vec![
            dated("A", 10),
            undated("B"),
            dated("C", 5),
        ]));
        let (manager, listener) = manager_with(service);

        manager.fetch_tasks().await.unwrap();

        let events = listener.take();
        assert_eq!(events.len(), 1);
        match &events[0] {
            TaskListEvent::TasksFetched(tasks) => assert_eq!(texts(tasks), vec!["C", "A", "B"]),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_keeps_undated_order() {
        let service =
            ScriptedService::default().on_load(Ok(vec![undated("A"), undated("B")]));
        let (manager, listener) = manager_with(service);

        manager.fetch_tasks().await.unwrap();

        match listener.take().as_slice() {
            [TaskListEvent::TasksFetched(tasks)] => assert_eq!(texts(tasks), vec!["A", "B"]),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_list() {
        let service = ScriptedService::default().on_load(Ok(vec![]));
        let (manager, listener) = manager_with(service);

        manager.fetch_tasks().await.unwrap();

        assert!(matches!(
            listener.take().as_slice(),
            [TaskListEvent::TasksFetched(tasks)] if tasks.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_fetch_failure_reports_exactly_one_error() {
        let service = ScriptedService::default()
            .on_load(Err(TaskServiceError::Transport("offline".to_string())));
        let (manager, listener) = manager_with(service);

        manager.fetch_tasks().await.unwrap();

        let events = listener.take();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TaskListEvent::Failed(TaskServiceError::Transport(msg)) if msg == "offline"
        ));
    }

    #[tokio::test]
    async fn test_each_fetch_is_a_single_attempt() {
        let service = Arc::new(
            ScriptedService::default()
                .on_load(Err(TaskServiceError::Status { status: 503 }))
                .on_load(Ok(vec![dated("A", 1)])),
        );
        let listener = Arc::new(RecordingListener::default());
        let manager = TaskListManager::new(service.clone(), Handle::current())
            .with_listener(&listener);

        manager.fetch_tasks().await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(listener.take().as_slice(), [TaskListEvent::Failed(_)]));

        manager.fetch_tasks().await.unwrap();
        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            listener.take().as_slice(),
            [TaskListEvent::TasksFetched(tasks)] if tasks.len() == 1
        ));
    }
}

// ─── Update and Delete Tests ────────────────────────────────────────────────

mod update_delete_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_update_relays_service_copy_unchanged() {
        let submitted = dated("draft", 10);
        let authoritative = TaskItem {
            text: "server text".to_string(),
            completed: true,
            created_at: None,
            ..submitted.clone()
        };
        let service = ScriptedService::default().on_update(Ok(authoritative.clone()));
        let (manager, listener) = manager_with(service);

        manager.update_task_item(submitted).await.unwrap();

        match listener.take().as_slice() {
            [TaskListEvent::TaskUpdated(task)] => assert_eq!(task, &authoritative),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_relays_service_id() {
        let returned = Uuid::new_v4();
        let service = ScriptedService::default().on_delete(Ok(returned));
        let (manager, listener) = manager_with(service);

        manager.delete_task_item(dated("gone", 1)).await.unwrap();

        match listener.take().as_slice() {
            [TaskListEvent::IdReceived(id)] => assert_eq!(*id, returned),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_failure_uses_shared_failure_callback() {
        let id = Uuid::new_v4();
        let service =
            ScriptedService::default().on_update(Err(TaskServiceError::NotFound { id }));
        let (manager, listener) = manager_with(service);

        manager.update_task_item(dated("x", 1)).await.unwrap();

        assert!(matches!(
            listener.take().as_slice(),
            [TaskListEvent::Failed(TaskServiceError::NotFound { id: got })] if *got == id
        ));
    }

    #[tokio::test]
    async fn test_delete_failure_uses_shared_failure_callback() {
        let service = ScriptedService::default()
            .on_delete(Err(TaskServiceError::Decode("bad body".to_string())));
        let (manager, listener) = manager_with(service);

        manager.delete_task_item(dated("x", 1)).await.unwrap();

        assert!(matches!(
            listener.take().as_slice(),
            [TaskListEvent::Failed(TaskServiceError::Decode(_))]
        ));
    }
}

// ─── Listener Lifetime Tests ────────────────────────────────────────────────

mod listener_lifetime_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_listener_drops_notification() {
        let service = ScriptedService::default().on_load(Ok(vec![dated("A", 1)]));
        let manager = TaskListManager::new(Arc::new(service), Handle::current());

        manager.fetch_tasks().await.unwrap();
    }

    #[tokio::test]
    async fn test_listener_dropped_before_completion() {
        let gate = Arc::new(Semaphore::new(0));
        let service = ScriptedService::gated(gate.clone()).on_load(Ok(vec![dated("A", 1)]));
        let (listener, mut events) = ChannelListener::new();
        let manager = TaskListManager::new(Arc::new(service), Handle::current())
            .with_listener(&listener);

        let handle = manager.fetch_tasks();
        drop(listener);
        gate.add_permits(1);
        handle.await.unwrap();

        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_manager_dropped_before_completion() {
        let gate = Arc::new(Semaphore::new(0));
        let service = ScriptedService::gated(gate.clone()).on_load(Ok(vec![dated("A", 1)]));
        let listener = Arc::new(RecordingListener::default());
        let manager = TaskListManager::new(Arc::new(service), Handle::current())
            .with_listener(&listener);

        let handle = manager.fetch_tasks();
        drop(manager);
        gate.add_permits(1);
        handle.await.unwrap();

        assert!(listener.take().is_empty());
    }

    #[tokio::test]
    async fn test_listener_looked_up_at_completion() {
        let gate = Arc::new(Semaphore::new(0));
        let service = ScriptedService::gated(gate.clone()).on_delete(Ok(Uuid::nil()));
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let manager = TaskListManager::new(Arc::new(service), Handle::current())
            .with_listener(&first);

        let handle = manager.delete_task_item(dated("x", 1));
        manager.set_listener(&second);
        gate.add_permits(1);
        handle.await.unwrap();

        assert!(first.take().is_empty());
        assert!(matches!(
            second.take().as_slice(),
            [TaskListEvent::IdReceived(id)] if id.is_nil()
        ));
    }
}

// ─── Concurrency Tests ──────────────────────────────────────────────────────

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_are_not_serialized() {
        let load_gate = Arc::new(Semaphore::new(0));
        let slow = Arc::new(
            ScriptedService::gated(load_gate.clone()).on_load(Ok(vec![dated("A", 1)])),
        );
        let fast = Arc::new(ScriptedService::default().on_delete(Ok(Uuid::nil())));
        let (listener, mut events) = ChannelListener::new();
        let slow_manager = TaskListManager::new(slow, Handle::current()).with_listener(&listener);
        let fast_manager = TaskListManager::new(fast, Handle::current()).with_listener(&listener);

        let fetch = slow_manager.fetch_tasks();
        fast_manager.delete_task_item(dated("x", 1)).await.unwrap();
        assert!(matches!(events.recv().await, Some(TaskListEvent::IdReceived(_))));

        load_gate.add_permits(1);
        fetch.await.unwrap();
        assert!(matches!(events.recv().await, Some(TaskListEvent::TasksFetched(_))));
    }

    #[tokio::test]
    async fn test_independent_calls_each_complete_once() {
        let gate = Arc::new(Semaphore::new(0));
        let service = Arc::new(
            ScriptedService::gated(gate.clone())
                .on_update(Ok(dated("updated", 2)))
                .on_delete(Ok(Uuid::nil())),
        );
        let listener = Arc::new(RecordingListener::default());
        let manager = TaskListManager::new(service.clone(), Handle::current())
            .with_listener(&listener);

        let update = manager.update_task_item(dated("x", 1));
        let delete = manager.delete_task_item(dated("y", 1));
        while service.calls.load(Ordering::SeqCst) < 2 {
            tokio::task::yield_now().await;
        }
        gate.add_permits(2);
        update.await.unwrap();
        delete.await.unwrap();

        let events = listener.take();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| matches!(e, TaskListEvent::TaskUpdated(_))));
        assert!(events.iter().any(|e| matches!(e, TaskListEvent::IdReceived(_))));
    }
}

// ─── In-Memory Service End-to-End ───────────────────────────────────────────

mod end_to_end_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_fetch_toggle_delete_round() {
        let a = dated("A", 20);
        let b = undated("B");
        let c = dated("C", 10);
        let service = Arc::new(InMemoryTaskService::with_items([
            a.clone(),
            b.clone(),
            c.clone(),
        ]));
        let (listener, mut events) = ChannelListener::new();
        let manager = TaskListManager::new(service.clone(), Handle::current())
            .with_listener(&listener);

        manager.fetch_tasks();
        match events.recv().await {
            Some(TaskListEvent::TasksFetched(tasks)) => {
                assert_eq!(texts(&tasks), vec!["C", "A", "B"]);
            },
            other => panic!("unexpected event: {other:?}"),
        }

        manager.update_task_item(a.toggled());
        match events.recv().await {
            Some(TaskListEvent::TaskUpdated(task)) => {
                assert_eq!(task.id, a.id);
                assert!(task.completed);
            },
            other => panic!("unexpected event: {other:?}"),
        }

        manager.delete_task_item(c.clone());
        match events.recv().await {
            Some(TaskListEvent::IdReceived(id)) => assert_eq!(id, c.id),
            other => panic!("unexpected event: {other:?}"),
        }

        manager.fetch_tasks();
        match events.recv().await {
            Some(TaskListEvent::TasksFetched(tasks)) => {
                assert_eq!(texts(&tasks), vec!["A", "B"]);
                assert!(tasks[0].completed);
            },
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(service.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_item_reports_not_found() {
        let service = Arc::new(InMemoryTaskService::new());
        let (listener, mut events) = ChannelListener::new();
        let manager = TaskListManager::new(service, Handle::current()).with_listener(&listener);

        let ghost = TaskItem::new("ghost");
        manager.delete_task_item(ghost.clone());
        assert!(matches!(
            events.recv().await,
            Some(TaskListEvent::Failed(TaskServiceError::NotFound { id })) if id == ghost.id
        ));
    }
}
