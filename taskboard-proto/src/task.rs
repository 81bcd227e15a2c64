//! Task rows and the overwrite payload for `PUT /tasks/{id}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{ColumnId, TaskId};

/// One row of the `tasks` table.
///
/// Used both for `GET /tasks` responses and for `POST /tasks` bodies; the
/// id is always client-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Client-generated task id.
    pub id: TaskId,
    /// Task text. The client rejects empty content before it gets here.
    pub content: String,
    /// Optional assignee display name.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Column the task currently belongs to.
    pub column_id: ColumnId,
}

/// Body of `PUT /tasks/{id}`: a full overwrite of the mutable fields.
///
/// The id travels in the path, not the body. Sending `None` for an optional
/// field clears it on the server; this is an overwrite, not a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// Revised task text.
    pub content: String,
    /// Revised assignee, `None` to clear.
    pub assigned_to: Option<String>,
    /// Revised due date, `None` to clear.
    pub due_date: Option<NaiveDate>,
    /// Column the task should belong to after the update.
    pub column_id: ColumnId,
}

impl TaskRow {
    /// Builds the overwrite payload carrying this row's current fields.
    ///
    /// Drag-and-drop uses this with a rewritten `column_id`; plain edits
    /// use it as-is.
    #[must_use]
    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            content: self.content.clone(),
            assigned_to: self.assigned_to.clone(),
            due_date: self.due_date,
            column_id: self.column_id.clone(),
        }
    }
}
