//! Loopback remote for testing.
//!
//! Keeps the three tables in-process behind a [`tokio::sync::Mutex`] so the
//! board store can be exercised without a running server. Individual
//! operations can be armed to fail, which is how the partial-failure
//! policies (create without comment, failed move, failed delete) get
//! tested deterministically.

use std::collections::HashSet;

use tokio::sync::Mutex;

use taskboard_proto::{ColumnId, ColumnRow, CommentRow, TaskId, TaskPatch, TaskRow};

use super::{RemoteError, RemoteService};

/// Which remote operation a failure injection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    /// `GET /columns`
    ListColumns,
    /// `GET /tasks`
    ListTasks,
    /// `GET /comments`
    ListComments,
    /// `POST /tasks`
    CreateTask,
    /// `PUT /tasks/{id}`
    UpdateTask,
    /// `DELETE /tasks/{id}`
    DeleteTask,
    /// `POST /comments`
    CreateComment,
}

#[derive(Default)]
struct Tables {
    columns: Vec<ColumnRow>,
    tasks: Vec<TaskRow>,
    comments: Vec<CommentRow>,
    failing: HashSet<RemoteOp>,
}

/// In-process [`RemoteService`] with per-operation failure injection.
pub struct LoopbackRemote {
    tables: Mutex<Tables>,
}

impl LoopbackRemote {
    /// Creates a loopback remote seeded with the standard three columns
    /// and no tasks or comments.
    #[must_use]
    pub fn new() -> Self {
        Self::with_columns(vec![
            ColumnRow {
                id: ColumnId::new("todo"),
                title: "To Do".to_string(),
                column_order: 1,
            },
            ColumnRow {
                id: ColumnId::new("inProgress"),
                title: "In Progress".to_string(),
                column_order: 2,
            },
            ColumnRow {
                id: ColumnId::new("done"),
                title: "Done".to_string(),
                column_order: 3,
            },
        ])
    }

    /// Creates a loopback remote with a custom column set.
    #[must_use]
    pub fn with_columns(columns: Vec<ColumnRow>) -> Self {
        Self {
            tables: Mutex::new(Tables {
                columns,
                ..Tables::default()
            }),
        }
    }

    /// Arms or disarms failure for one operation. While armed, every call
    /// to that operation fails with a transport error.
    pub async fn set_failing(&self, op: RemoteOp, failing: bool) {
        let mut tables = self.tables.lock().await;
        if failing {
            tables.failing.insert(op);
        } else {
            tables.failing.remove(&op);
        }
    }

    /// Snapshot of the task table, for asserting what got persisted.
    pub async fn task_rows(&self) -> Vec<TaskRow> {
        self.tables.lock().await.tasks.clone()
    }

    /// Snapshot of the comment table.
    pub async fn comment_rows(&self) -> Vec<CommentRow> {
        self.tables.lock().await.comments.clone()
    }

    /// Seeds a task row directly, bypassing the create operation.
    pub async fn seed_task(&self, row: TaskRow) {
        self.tables.lock().await.tasks.push(row);
    }

    /// Seeds a comment row directly.
    pub async fn seed_comment(&self, row: CommentRow) {
        self.tables.lock().await.comments.push(row);
    }

    fn fail(op: RemoteOp) -> RemoteError {
        RemoteError::Transport(format!("injected failure for {op:?}"))
    }
}

impl Default for LoopbackRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteService for LoopbackRemote {
    async fn list_columns(&self) -> Result<Vec<ColumnRow>, RemoteError> {
        let tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::ListColumns) {
            return Err(Self::fail(RemoteOp::ListColumns));
        }
        Ok(tables.columns.clone())
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRow>, RemoteError> {
        let tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::ListTasks) {
            return Err(Self::fail(RemoteOp::ListTasks));
        }
        Ok(tables.tasks.clone())
    }

    async fn list_comments(&self) -> Result<Vec<CommentRow>, RemoteError> {
        let tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::ListComments) {
            return Err(Self::fail(RemoteOp::ListComments));
        }
        Ok(tables.comments.clone())
    }

    async fn create_task(&self, row: &TaskRow) -> Result<(), RemoteError> {
        let mut tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::CreateTask) {
            return Err(Self::fail(RemoteOp::CreateTask));
        }
        if tables.tasks.iter().any(|t| t.id == row.id) {
            return Err(RemoteError::Rejected {
                status: 409,
                message: format!("task already exists: {}", row.id),
            });
        }
        tables.tasks.push(row.clone());
        Ok(())
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<(), RemoteError> {
        let mut tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::UpdateTask) {
            return Err(Self::fail(RemoteOp::UpdateTask));
        }
        let Some(row) = tables.tasks.iter_mut().find(|t| &t.id == id) else {
            return Err(RemoteError::Rejected {
                status: 404,
                message: format!("task not found: {id}"),
            });
        };
        row.content = patch.content.clone();
        row.assigned_to = patch.assigned_to.clone();
        row.due_date = patch.due_date;
        row.column_id = patch.column_id.clone();
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RemoteError> {
        let mut tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::DeleteTask) {
            return Err(Self::fail(RemoteOp::DeleteTask));
        }
        tables.tasks.retain(|t| &t.id != id);
        Ok(())
    }

    async fn create_comment(&self, row: &CommentRow) -> Result<(), RemoteError> {
        let mut tables = self.tables.lock().await;
        if tables.failing.contains(&RemoteOp::CreateComment) {
            return Err(Self::fail(RemoteOp::CreateComment));
        }
        if row.text.trim().is_empty() {
            return Err(RemoteError::Rejected {
                status: 400,
                message: "task id and comment text are required".to_string(),
            });
        }
        tables.comments.push(row.clone());
        Ok(())
    }
}
