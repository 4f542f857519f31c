//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing validated task inputs.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A label filter was empty.
    #[error("label cannot be empty")]
    EmptyLabel,

    /// A batch insert was requested without any tasks.
    #[error("empty tasks batch")]
    NoTasks,
}
