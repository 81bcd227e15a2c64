//! Comment rows as served by `GET /comments` and posted to `POST /comments`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{CommentId, TaskId};

/// One row of the `comments` table.
///
/// `task_id` and non-empty `text` are required; the data service rejects
/// a create without them with a client error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    /// Client-generated comment id.
    pub id: CommentId,
    /// Task this comment is attached to.
    pub task_id: TaskId,
    /// Comment body.
    pub text: String,
    /// Creation timestamp; list order within a task is chronological.
    pub created_at: DateTime<Utc>,
}
