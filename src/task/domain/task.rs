//! Task entity and the inputs used to create and change it.

use super::{TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel stored in `closed` while a task is still open.
pub const OPEN: i64 = 0;

/// A task row.
///
/// Timestamps are epoch seconds exactly as stored; [`Task::opened_at`] and
/// [`Task::closed_at`] convert them for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    opened: i64,
    closed: i64,
    author_id: UserId,
    assigned_id: UserId,
    title: String,
    content: String,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Creation time in epoch seconds.
    pub opened: i64,
    /// Completion time in epoch seconds, or [`OPEN`].
    pub closed: i64,
    /// Author reference.
    pub author_id: UserId,
    /// Assignee reference.
    pub assigned_id: UserId,
    /// Title text.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            opened: data.opened,
            closed: data.closed,
            author_id: data.author_id,
            assigned_id: data.assigned_id,
            title: data.title,
            content: data.content,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creation time in epoch seconds.
    #[must_use]
    pub const fn opened(&self) -> i64 {
        self.opened
    }

    /// Returns the completion time in epoch seconds, or [`OPEN`].
    #[must_use]
    pub const fn closed(&self) -> i64 {
        self.closed
    }

    /// Returns the author reference.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn assigned_id(&self) -> UserId {
        self.assigned_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the body text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Reports whether the task has no completion time.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.closed == OPEN
    }

    /// Returns the creation time, or `None` if the stored value is out of
    /// range for `chrono`.
    #[must_use]
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.opened, 0)
    }

    /// Returns the completion time, or `None` while the task is open.
    #[must_use]
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        if self.is_open() {
            return None;
        }
        DateTime::from_timestamp(self.closed, 0)
    }

    /// Overwrites the columns that `update` supplies.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(assigned_id) = update.assigned_id {
            self.assigned_id = assigned_id;
        }
        if let Some(closed) = update.closed {
            self.closed = closed;
        }
        if let Some(title) = &update.title {
            title.clone_into(&mut self.title);
        }
        if let Some(content) = &update.content {
            content.clone_into(&mut self.content);
        }
    }
}

/// Input for inserting a task.
///
/// Only title and content are written; every other column takes the store
/// default (current time, open, sentinel author and assignee).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Title text.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl NewTask {
    /// Creates an insert request.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Partial update of a task.
///
/// `None` leaves a column untouched; `Some` overwrites it, including with
/// `0` or an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// New assignee.
    pub assigned_id: Option<UserId>,
    /// New completion time in epoch seconds.
    pub closed: Option<i64>,
    /// New title.
    pub title: Option<String>,
    /// New body text.
    pub content: Option<String>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn assigned_to(mut self, assigned_id: UserId) -> Self {
        self.assigned_id = Some(assigned_id);
        self
    }

    /// Sets the completion time.
    #[must_use]
    pub const fn closed_at(mut self, closed: i64) -> Self {
        self.closed = Some(closed);
        self
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Reports whether the update supplies no columns.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assigned_id.is_none()
            && self.closed.is_none()
            && self.title.is_none()
            && self.content.is_none()
    }
}
