//! `tasklist` - list, toggle and delete tasks from the remote todo feed.
//!
//! Edits apply to the copy imported by this process; the listing printed
//! afterwards reflects them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::UnboundedReceiver;

use tasklist::config::ServiceConfig;
use tasklist::service::RemoteTaskService;
use tasklist::{ChannelListener, TaskItem, TaskListEvent, TaskListManager};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(version)]
#[command(about = "Fetch and edit a remote to-do list")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Feed root URL (overrides the config file)
    #[arg(long, env = "TASKLIST_BASE_URL", global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all tasks, oldest first
    List,
    /// Flip the completion flag of the task at INDEX (as printed by `list`)
    Toggle {
        /// 1-based position in the listing
        index: usize,
    },
    /// Delete the task at INDEX (as printed by `list`)
    Delete {
        /// 1-based position in the listing
        index: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tasklist::logging::init_logging_with_default("warn");
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => ServiceConfig::from_env(),
    };
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    let service = Arc::new(RemoteTaskService::new(config)?);
    let (listener, mut events) = ChannelListener::new();
    let manager = TaskListManager::for_current_runtime(service)?.with_listener(&listener);

    manager.fetch_tasks();
    let tasks = expect_tasks(&mut events).await?;

    match cli.command {
        Commands::List => print_tasks(&tasks),
        Commands::Toggle { index } => {
            let item = select(&tasks, index)?;
            manager.update_task_item(item.toggled());
            match next_event(&mut events).await? {
                TaskListEvent::TaskUpdated(task) => {
                    println!("updated: {}", describe(&task));
                },
                other => bail!("unexpected event: {other:?}"),
            }
            manager.fetch_tasks();
            print_tasks(&expect_tasks(&mut events).await?);
        },
        Commands::Delete { index } => {
            let item = select(&tasks, index)?;
            manager.delete_task_item(item.clone());
            match next_event(&mut events).await? {
                TaskListEvent::IdReceived(id) => println!("deleted: {id}"),
                other => bail!("unexpected event: {other:?}"),
            }
            manager.fetch_tasks();
            print_tasks(&expect_tasks(&mut events).await?);
        },
    }

    Ok(())
}

async fn next_event(events: &mut UnboundedReceiver<TaskListEvent>) -> Result<TaskListEvent> {
    match events.recv().await {
        Some(TaskListEvent::Failed(error)) => Err(error.into()),
        Some(event) => Ok(event),
        None => bail!("task list listener closed"),
    }
}

async fn expect_tasks(events: &mut UnboundedReceiver<TaskListEvent>) -> Result<Vec<TaskItem>> {
    match next_event(events).await? {
        TaskListEvent::TasksFetched(tasks) => Ok(tasks),
        other => bail!("unexpected event: {other:?}"),
    }
}

fn select(tasks: &[TaskItem], index: usize) -> Result<&TaskItem> {
    index
        .checked_sub(1)
        .and_then(|i| tasks.get(i))
        .with_context(|| format!("no task at position {index} (have {})", tasks.len()))
}

fn describe(task: &TaskItem) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {}", task.text)
}

fn print_tasks(tasks: &[TaskItem]) {
    for (i, task) in tasks.iter().enumerate() {
        println!("{:>3}. {}", i + 1, describe(task));
    }
}
