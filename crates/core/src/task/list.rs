//! In-memory task collection
//!
//! An owned working copy of one storage location's tasks. A caller loads
//! the list, applies a single operation, and saves it back; the list does
//! not outlive the cycle.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::{Task, TaskFilter};
use crate::{Error, Result};

/// Ordered task collection, insertion order preserved
///
/// Serializes transparently as the JSON array used on disk. Lookups are
/// linear scans in collection order; ids are unique, first match wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the end of the collection
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task by id
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the content of the task with the given id
    ///
    /// Every other field is left unchanged. The collection is not modified
    /// when no task matches.
    pub fn update_content(&mut self, id: Uuid, content: impl Into<String>) -> Result<&Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        task.content = content.into();
        Ok(&*task)
    }

    /// Mark the task with the given id complete
    ///
    /// `complete_date` is stamped with the current time on every call,
    /// overwriting any prior value; only the flag itself is idempotent.
    pub fn complete(&mut self, id: Uuid) -> Result<&Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        task.is_complete = true;
        task.complete_date = Utc::now();
        Ok(&*task)
    }

    /// Remove the task with the given id
    ///
    /// Preserves the relative order of the remaining tasks. The collection
    /// is not modified when no task matches.
    pub fn remove(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

        self.tasks.remove(index);
        Ok(())
    }

    /// Collect the tasks satisfying all of the filter's predicates
    ///
    /// Returns a new sequence in collection order; with no predicates set,
    /// that is the full collection.
    pub fn filter(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
    }
}
