//! Service-backed to-do list core.
//!
//! This crate fetches task items from a [`TaskService`](service::TaskService),
//! orders them by creation date, relays updates and deletes, and reports every
//! outcome to a [`TaskListListener`](listener::TaskListListener).
//!
//! # Overview
//!
//! The [`TaskListManager`](manager::TaskListManager) is a stateless relay: each
//! call issues one request, spawns it onto the tokio runtime, and returns. The
//! result arrives later through the listener, which the manager holds weakly so
//! a dropped listener simply stops receiving notifications.
//!
//! # Module Organization
//!
//! - [`domain`] - [`Task`] record and [`TaskItem`]
//! - [`ordering`] - Creation-date comparator and stable sort
//! - [`service`] - The service trait, in-memory and remote implementations
//! - [`manager`] - The task list manager
//! - [`listener`] - Listener trait and channel adapter
//! - [`config`] - Remote service configuration
//! - [`error`] - Error type
//!
//! # Feature Flags
//!
//! - `logging` (default) - [`logging::init_logging`] via `tracing-subscriber`
//! - `http-client` - [`RemoteTaskService`](service::RemoteTaskService) via `reqwest`
//! - `cli` - the `tasklist` binary

pub mod config;
pub mod domain;
pub mod error;
pub mod listener;
#[cfg(feature = "logging")]
pub mod logging;
pub mod manager;
pub mod ordering;
pub mod service;

// Re-exports for ergonomic access
pub use domain::{Task, TaskFeed, TaskItem};
pub use error::{Result, TaskServiceError};
pub use listener::{ChannelListener, TaskListEvent, TaskListListener};
pub use manager::TaskListManager;
pub use service::{InMemoryTaskService, TaskService};
