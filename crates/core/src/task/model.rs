//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Unix seconds of 0001-01-01T00:00:00Z.
const ZERO_TIMESTAMP_SECS: i64 = -62_135_596_800;

/// The distinguished "not yet set" timestamp, `0001-01-01T00:00:00Z`.
///
/// `complete_date` holds this value until the task first completes. It
/// round-trips through the on-disk representation as a regular timestamp.
pub fn zero_timestamp() -> DateTime<Utc> {
    DateTime::from_timestamp(ZERO_TIMESTAMP_SECS, 0).expect("sentinel is in range")
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub content: String,
    pub create_date: DateTime<Utc>,
    pub complete_date: DateTime<Utc>,
    pub is_complete: bool,
}

impl Task {
    /// Create a new task with the given content
    ///
    /// Allocates a fresh random id and stamps the creation time. The task
    /// starts incomplete with `complete_date` at the zero sentinel.
    /// Creation never inserts into a collection; see [`TaskList::push`].
    ///
    /// [`TaskList::push`]: super::TaskList::push
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            create_date: Utc::now(),
            complete_date: zero_timestamp(),
            is_complete: false,
        }
    }
}

/// Predicates applied conjunctively by [`TaskList::filter`]
///
/// [`TaskList::filter`]: super::TaskList::filter
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Keep only tasks whose completion flag equals this value
    pub is_complete: Option<bool>,
    /// Whitespace-separated tokens; a task matches only if every token
    /// appears case-insensitively somewhere in its content
    pub content: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(want) = self.is_complete {
            if task.is_complete != want {
                return false;
            }
        }

        if let Some(ref text) = self.content {
            let content = task.content.to_lowercase();
            for token in text.split_whitespace() {
                if !content.contains(&token.to_lowercase()) {
                    return false;
                }
            }
        }

        true
    }
}
