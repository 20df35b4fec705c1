//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use tl_core::task::FileTaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_store: FileTaskStore,
    /// Serializes load-operate-save cycles against the one storage
    /// location; two concurrent requests must not interleave their
    /// full-file read-modify-write.
    cycle: Mutex<()>,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub fn new(data_dir: PathBuf) -> Self {
        let tasks_path = data_dir.join("tasks.json");

        Self {
            inner: Arc::new(AppStateInner {
                task_store: FileTaskStore::new(tasks_path),
                cycle: Mutex::new(()),
            }),
        }
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &FileTaskStore {
        &self.inner.task_store
    }

    /// Take the cycle lock for the duration of one load-operate-save cycle
    pub async fn lock_cycle(&self) -> MutexGuard<'_, ()> {
        self.inner.cycle.lock().await
    }
}
