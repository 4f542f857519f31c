//! Identifier types for the task domain.
//!
//! All identifiers are generated by the store as `INTEGER` serial columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i32);

impl TaskId {
    /// Wraps a raw task identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a user row referenced by task authorship and assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// The sentinel `default` user that unassigned tasks point at.
    pub const UNASSIGNED: Self = Self(0);

    /// Wraps a raw user identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Reports whether this is the sentinel user.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        self.0 == Self::UNASSIGNED.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a label row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(i32);

impl LabelId {
    /// Wraps a raw label identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
