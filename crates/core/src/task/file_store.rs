//! File-based task storage implementation
//!
//! Stores the task collection as a JSON array in a file on disk.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::list::TaskList;
use super::storage::TaskStorage;
use crate::{Error, Result};

/// File-backed task store using JSON
///
/// Holds the storage path it was constructed with; all reads and writes
/// go against that one location.
pub struct FileTaskStore {
    path: PathBuf,
}

impl FileTaskStore {
    /// Create a store for the given path
    ///
    /// The file is not touched until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TaskStorage for FileTaskStore {
    async fn load(&self) -> Result<TaskList> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "tasks file missing, starting empty");
                return Ok(TaskList::new());
            }
            Err(e) => return Err(e.into()),
        };

        let tasks: TaskList = serde_json::from_str(&content)
            .map_err(|e| Error::CorruptStore(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    async fn save(&self, tasks: &TaskList) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write to a sibling temp file and rename so a concurrent reader
        // never observes a truncated file.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
