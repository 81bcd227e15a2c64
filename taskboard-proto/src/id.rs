//! String-backed identifier newtypes.
//!
//! Task and comment ids are client-generated at creation time from UUID v7,
//! which is both collision-resistant under rapid successive creates and
//! roughly time-ordered. Column ids come from the fixed seeded set
//! (`todo`, `inProgress`, `done`) and are never generated.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task, e.g. `task-01890a5d-...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh time-ordered task id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("task-{}", Uuid::now_v7()))
    }

    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a column from the fixed seeded set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a comment, e.g. `comment-01890a5d-...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Generates a fresh time-ordered comment id.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("comment-{}", Uuid::now_v7()))
    }

    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
