//! Asynchronous record store interface used by the task board.

use crate::db::Database;
use crate::types::{NewTask, Task, TaskPatch};
use crate::error::TaskError;
use anyhow::Result;
use async_trait::async_trait;

/// Remote table of task rows. Every call is independently fallible and
/// nothing spans more than one call.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks owned by `owner`.
    async fn list(&self, owner: &str) -> Result<Vec<Task>>;

    /// Insert a task and return the stored record.
    async fn insert(&self, new_task: NewTask) -> Result<Task>;

    async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<()>;

    async fn delete(&self, task_id: &str) -> Result<()>;
}

impl Database {
    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || f(db))
            .await
            .map_err(|e| TaskError::internal(format!("database task failed: {}", e)))?
    }
}

#[async_trait]
impl TaskStore for Database {
    async fn list(&self, owner: &str) -> Result<Vec<Task>> {
        let owner = owner.to_string();
        self.blocking(move |db| db.list_tasks(&owner)).await
    }

    async fn insert(&self, new_task: NewTask) -> Result<Task> {
        self.blocking(move |db| db.insert_task(new_task)).await
    }

    async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<()> {
        let task_id = task_id.to_string();
        self.blocking(move |db| db.update_task(&task_id, &patch)).await
    }

    async fn delete(&self, task_id: &str) -> Result<()> {
        let task_id = task_id.to_string();
        self.blocking(move |db| db.delete_task(&task_id)).await
    }
}
