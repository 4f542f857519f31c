//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::{NewTask, PersistedTaskData, Task, TaskId, TaskUpdate, UserId};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: i32,
    pub opened: i64,
    pub closed: i64,
    pub author_id: i32,
    pub assigned_id: i32,
    pub title: String,
    pub content: String,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::from_persisted(PersistedTaskData {
            id: TaskId::new(row.id),
            opened: row.opened,
            closed: row.closed,
            author_id: UserId::new(row.author_id),
            assigned_id: UserId::new(row.assigned_id),
            title: row.title,
            content: row.content,
        })
    }
}

/// Insert model for task records. Remaining columns use their defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub title: String,
    pub content: String,
}

impl From<NewTask> for NewTaskRow {
    fn from(task: NewTask) -> Self {
        Self {
            title: task.title,
            content: task.content,
        }
    }
}

/// Partial update of a task row; `None` fields are left out of the `SET`
/// clause.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    pub assigned_id: Option<i32>,
    pub closed: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<&TaskUpdate> for TaskChangeset {
    fn from(update: &TaskUpdate) -> Self {
        Self {
            assigned_id: update.assigned_id.map(UserId::value),
            closed: update.closed,
            title: update.title.clone(),
            content: update.content.clone(),
        }
    }
}
