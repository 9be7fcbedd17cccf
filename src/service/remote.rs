//! Remote-feed task service.
//!
//! [`RemoteTaskService`] fetches `GET {base_url}/todos?limit=0` the first time
//! items are loaded, converts every [`Task`](crate::Task) to a [`TaskItem`], and
//! keeps the result in an [`InMemoryTaskService`]. Later loads, updates and
//! deletes are served from that copy; the feed itself is read-only.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tasklist::config::ServiceConfig;
//! use tasklist::service::{RemoteTaskService, TaskService};
//!
//! # async fn example() -> Result<(), tasklist::TaskServiceError> {
//! let service = RemoteTaskService::new(ServiceConfig::from_env())?;
//! let items = service.load_task_items().await?;
//! println!("{} tasks", items.len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::domain::{TaskFeed, TaskItem};
use crate::error::TaskServiceError;

use super::{InMemoryTaskService, TaskService};

/// [`TaskService`] backed by the remote todo feed.
#[derive(Debug)]
pub struct RemoteTaskService {
    config: ServiceConfig,
    http_client: reqwest::Client,
    store: InMemoryTaskService,
    imported: OnceCell<()>,
}

impl RemoteTaskService {
    /// Creates a service for `config`. No request is made until the first load.
    ///
    /// # Errors
    ///
    /// [`TaskServiceError::Config`] if the HTTP client cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self, TaskServiceError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TaskServiceError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http_client))
    }

    /// Creates a service from an existing reqwest client.
    pub fn with_http_client(config: ServiceConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            store: InMemoryTaskService::new(),
            imported: OnceCell::new(),
        }
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns `true` once the feed has been imported.
    pub fn is_imported(&self) -> bool {
        self.imported.initialized()
    }

    /// Imports the feed if that has not happened yet. Concurrent callers share
    /// one request; a failed import is retried by the next caller.
    async fn ensure_imported(&self) -> Result<(), TaskServiceError> {
        self.imported
            .get_or_try_init(|| async {
                let feed = fetch_feed(&self.http_client, &self.config.todos_url()).await?;
                let imported_at = Utc::now();
                let count = feed.todos.len();
                self.store.extend(
                    feed.todos
                        .iter()
                        .map(|task| TaskItem::from_record(task, Some(imported_at))),
                );
                tracing::info!(count, total = feed.total, "imported remote todo feed");
                Ok::<_, TaskServiceError>(())
            })
            .await?;
        Ok(())
    }
}

async fn fetch_feed(
    http_client: &reqwest::Client,
    url: &str,
) -> Result<TaskFeed, TaskServiceError> {
    tracing::debug!("Fetching todo feed from {}", url);

    let response = http_client.get(url).send().await?;

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), "todo feed returned an error status");
        return Err(TaskServiceError::Status {
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(Into::into)
}

#[async_trait]
impl TaskService for RemoteTaskService {
    async fn load_task_items(&self) -> Result<Vec<TaskItem>, TaskServiceError> {
        self.ensure_imported().await?;
        self.store.load_task_items().await
    }

    async fn update_task_item(&self, item: TaskItem) -> Result<TaskItem, TaskServiceError> {
        self.ensure_imported().await?;
        self.store.update_task_item(item).await
    }

    async fn delete_task_item(&self, item: TaskItem) -> Result<Uuid, TaskServiceError> {
        self.ensure_imported().await?;
        self.store.delete_task_item(item).await
    }
}
