//! Shared wire types for the taskboard REST contract.
//!
//! Everything that crosses the HTTP boundary between the board client and
//! the data service lives here: row types for the three tables (`columns`,
//! `tasks`, `comments`), the update payload for task overwrites, and the
//! string-backed id newtypes. All bodies are JSON with snake_case fields.

pub mod column;
pub mod comment;
pub mod id;
pub mod task;

pub use column::ColumnRow;
pub use comment::CommentRow;
pub use id::{ColumnId, CommentId, TaskId};
pub use task::{TaskPatch, TaskRow};
