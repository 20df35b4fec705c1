//! CLI subcommands
//!
//! Argument shapes follow the storage-file override convention: every
//! mutating command accepts an optional leading file argument ending in
//! `.json` that replaces the default storage location.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use uuid::Uuid;

use tl_core::task::{FileTaskStore, Task, TaskFilter, TaskStorage};
use tl_core::Error;

/// Storage location used when no file argument is given
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

const TASKS_FILE_SUFFIX: &str = ".json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Optional storage file ending in .json, then the task content
        #[arg(value_name = "[FILE] CONTENT", num_args = 1..=2, required = true)]
        args: Vec<String>,
    },
    /// Remove a task
    Remove {
        /// Optional storage file ending in .json, then the task id
        #[arg(value_name = "[FILE] ID", num_args = 1..=2, required = true)]
        args: Vec<String>,
    },
    /// Mark a task complete
    Complete {
        /// Optional storage file ending in .json, then the task id
        #[arg(value_name = "[FILE] ID", num_args = 1..=2, required = true)]
        args: Vec<String>,
    },
    /// Replace a task's content
    Update {
        /// Optional storage file ending in .json, then the task id and new content
        #[arg(value_name = "[FILE] ID CONTENT", num_args = 2..=3, required = true)]
        args: Vec<String>,
    },
    /// List tasks, optionally filtered
    List {
        /// Storage file (defaults to tasks.json)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
        /// Show only completed tasks
        #[arg(long, conflicts_with = "pending")]
        complete: bool,
        /// Show only pending tasks
        #[arg(long)]
        pending: bool,
        /// Show only tasks whose content contains every given word
        #[arg(long, value_name = "TEXT")]
        content: Option<String>,
    },
}

/// Split the optional leading storage-file argument off a positional list
///
/// The first argument names the storage file only when more than
/// `operands` arguments are present and it is longer than the bare suffix
/// and ends with it.
fn split_storage_arg(mut args: Vec<String>, operands: usize) -> Result<(PathBuf, Vec<String>)> {
    if args.len() > operands {
        let first = &args[0];
        if first.len() > TASKS_FILE_SUFFIX.len() && first.ends_with(TASKS_FILE_SUFFIX) {
            let file = args.remove(0);
            return Ok((PathBuf::from(file), args));
        }
        bail!("expected a storage file ending in {TASKS_FILE_SUFFIX}, got {first:?}");
    }

    Ok((PathBuf::from(DEFAULT_TASKS_FILE), args))
}

fn parse_id(arg: &str) -> Result<Uuid> {
    Uuid::parse_str(arg).map_err(|_| anyhow!("invalid task id {arg:?}"))
}

pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Add { args } => {
            let (file, mut operands) = split_storage_arg(args, 1)?;
            let content = operands.remove(0);
            if content.trim().is_empty() {
                return Err(Error::InvalidInput("task content cannot be empty".into()).into());
            }

            let store = FileTaskStore::new(file);
            let mut tasks = store.load().await?;
            let task = Task::new(content);
            let id = task.id;
            tasks.push(task);
            store.save(&tasks).await?;

            println!("Added task {id}");
        }
        Command::Remove { args } => {
            let (file, operands) = split_storage_arg(args, 1)?;
            let id = parse_id(&operands[0])?;

            let store = FileTaskStore::new(file);
            let mut tasks = store.load().await?;
            tasks.remove(id)?;
            store.save(&tasks).await?;

            println!("Removed task {id}");
        }
        Command::Complete { args } => {
            let (file, operands) = split_storage_arg(args, 1)?;
            let id = parse_id(&operands[0])?;

            let store = FileTaskStore::new(file);
            let mut tasks = store.load().await?;
            tasks.complete(id)?;
            store.save(&tasks).await?;

            println!("Completed task {id}");
        }
        Command::Update { args } => {
            let (file, mut operands) = split_storage_arg(args, 2)?;
            let id = parse_id(&operands[0])?;
            let content = operands.remove(1);
            if content.trim().is_empty() {
                return Err(Error::InvalidInput("task content cannot be empty".into()).into());
            }

            let store = FileTaskStore::new(file);
            let mut tasks = store.load().await?;
            tasks.update_content(id, content)?;
            store.save(&tasks).await?;

            println!("Updated task {id}");
        }
        Command::List {
            file,
            complete,
            pending,
            content,
        } => {
            let filter = TaskFilter {
                is_complete: match (complete, pending) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                content,
            };

            let store = FileTaskStore::new(file.unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE)));
            let tasks = store.load().await?;

            for task in tasks.filter(&filter) {
                let marker = if task.is_complete { "x" } else { " " };
                println!("[{marker}] {}  {}", task.id, task.content);
            }
        }
    }

    Ok(())
}
