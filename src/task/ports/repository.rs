//! Repository port for task persistence and lookup.

use crate::database::DatabaseError;
use crate::task::domain::{NewTask, Task, TaskDomainError, TaskFilter, TaskId, TaskUpdate, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Listing operations return an empty vector, never an error, when nothing
/// matches.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists tasks matching `filter`, ordered by ascending identifier.
    async fn list_tasks(&self, filter: TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists every task in storage order.
    async fn list_all_tasks(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`.
    async fn get_task(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Lists tasks written by `author_id`.
    async fn list_tasks_by_author(&self, author_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Lists tasks linked to the label named `label`.
    ///
    /// An unknown label and a label without tasks both produce an empty
    /// vector.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::EmptyLabel`] for an empty `label`
    /// without touching storage.
    async fn list_tasks_by_label(&self, label: &str) -> TaskRepositoryResult<Vec<Task>>;

    /// Inserts a task and returns its generated identifier.
    async fn create_task(&self, task: &NewTask) -> TaskRepositoryResult<TaskId>;

    /// Inserts every task atomically and returns the generated identifiers
    /// in input order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NoTasks`] for an empty slice without
    /// touching storage. Any insert failure rolls the whole batch back.
    async fn create_tasks(&self, tasks: &[NewTask]) -> TaskRepositoryResult<Vec<TaskId>>;

    /// Overwrites the columns supplied by `update`.
    ///
    /// Succeeds without effect when no task has `id`.
    async fn update_task(&self, id: TaskId, update: &TaskUpdate) -> TaskRepositoryResult<()>;

    /// Deletes a task and its label links.
    ///
    /// Succeeds without effect when no task has `id`.
    async fn delete_task(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A label filter was empty.
    #[error("label cannot be empty")]
    EmptyLabel,

    /// A batch insert was requested without any tasks.
    #[error("no tasks to add")]
    NoTasks,

    /// The connection handle failed or was closed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Persistence-layer failure reported by the store.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<TaskDomainError> for TaskRepositoryError {
    fn from(err: TaskDomainError) -> Self {
        match err {
            TaskDomainError::EmptyLabel => Self::EmptyLabel,
            TaskDomainError::NoTasks => Self::NoTasks,
        }
    }
}
