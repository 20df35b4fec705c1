//! Task storage trait
//!
//! Defines the interface between one storage location and the task
//! collection it backs. Every mutation is a full load-operate-save cycle
//! over the entire collection; there is no partial persistence.

use async_trait::async_trait;

use super::list::TaskList;
use crate::Result;

/// Durable storage for one task collection
#[async_trait]
pub trait TaskStorage: Send + Sync {
    /// Read the full collection
    ///
    /// A storage location that does not exist yet yields an empty
    /// collection, not an error.
    async fn load(&self) -> Result<TaskList>;

    /// Write the full collection back
    async fn save(&self, tasks: &TaskList) -> Result<()>;
}
