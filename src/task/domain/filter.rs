//! Optional predicates for task listings.

use super::{Task, TaskId, UserId};

/// Filter for [`list_tasks`](crate::task::ports::TaskRepository::list_tasks).
///
/// Absent fields do not restrict the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to a single task.
    pub task_id: Option<TaskId>,
    /// Restrict to tasks written by this user.
    pub author_id: Option<UserId>,
}

impl TaskFilter {
    /// A filter that matches every task.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            task_id: None,
            author_id: None,
        }
    }

    /// Restricts to the task with `task_id`.
    #[must_use]
    pub const fn with_task_id(mut self, task_id: TaskId) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts to tasks authored by `author_id`.
    #[must_use]
    pub const fn with_author_id(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Evaluates the filter against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.task_id.is_none_or(|id| task.id() == id)
            && self.author_id.is_none_or(|id| task.author_id() == id)
    }
}
