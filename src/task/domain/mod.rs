//! Domain model for the task store.
//!
//! Tasks reference users as author and assignee and are linked to labels
//! through the `tasks_labels` join table. The types here carry no
//! infrastructure concerns; adapters translate them to and from rows.

mod error;
mod filter;
mod ids;
mod label;
mod task;

pub use error::TaskDomainError;
pub use filter::TaskFilter;
pub use ids::{LabelId, TaskId, UserId};
pub use label::{Label, LabelName, TaskBatch, User};
pub use task::{NewTask, OPEN, PersistedTaskData, Task, TaskUpdate};
