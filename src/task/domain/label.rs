//! Users, labels, and the validated values used to query and insert tasks.

use super::{LabelId, NewTask, TaskDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
}

/// A row of the `labels` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label identifier.
    pub id: LabelId,
    /// Label name. Unique in practice, not enforced by the schema.
    pub name: String,
}

/// Non-empty label name used to filter tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelName(String);

impl LabelName {
    /// Validates a label filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyLabel`] for an empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let value: String = name.into();
        if value.is_empty() {
            return Err(TaskDomainError::EmptyLabel);
        }
        Ok(Self(value))
    }

    /// Returns the label name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty list of tasks inserted in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBatch(Vec<NewTask>);

impl TaskBatch {
    /// Validates a batch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoTasks`] when `tasks` is empty.
    pub fn new(tasks: Vec<NewTask>) -> Result<Self, TaskDomainError> {
        if tasks.is_empty() {
            return Err(TaskDomainError::NoTasks);
        }
        Ok(Self(tasks))
    }

    /// Returns the number of tasks in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the batch is empty. Validation rules this out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[NewTask] {
        &self.0
    }
}

impl IntoIterator for TaskBatch {
    type Item = NewTask;
    type IntoIter = std::vec::IntoIter<NewTask>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
