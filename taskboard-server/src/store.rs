//! In-memory table store backing the REST routes.
//!
//! [`TableStore`] holds the three tables as plain row vectors behind a
//! [`RwLock`]. Rows keep insertion order, which is what `GET /tasks` and
//! `GET /comments` return; columns are kept sorted by `column_order`.
//! There are no cross-table constraints: deleting a task leaves its
//! comments in place, and a comment may reference a task id that no
//! longer exists. Consumers filter on join.

use tokio::sync::RwLock;

use taskboard_proto::{ColumnId, ColumnRow, CommentRow, TaskId, TaskPatch, TaskRow};

/// Errors surfaced by row operations, mapped to HTTP statuses in the server.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// `POST /tasks` with an id that already exists.
    #[error("task already exists: {0}")]
    DuplicateTask(TaskId),
    /// `PUT /tasks/{id}` for an unknown id.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// `POST /comments` without a task id or with empty text.
    #[error("task id and comment text are required")]
    MissingCommentFields,
}

#[derive(Default)]
struct Tables {
    columns: Vec<ColumnRow>,
    tasks: Vec<TaskRow>,
    comments: Vec<CommentRow>,
}

/// Thread-safe in-memory row store with a fixed, seeded column set.
pub struct TableStore {
    tables: RwLock<Tables>,
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore {
    /// Creates a store seeded with the standard three columns.
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

    /// Creates a store seeded with a custom column set.
    ///
    /// Columns are sorted by `column_order` on the way in so list order
    /// always matches display order.
    #[must_use]
    pub fn with_columns(mut columns: Vec<ColumnRow>) -> Self {
        columns.sort_by_key(|c| c.column_order);
        Self {
            tables: RwLock::new(Tables {
                columns,
                tasks: Vec::new(),
                comments: Vec::new(),
            }),
        }
    }

    /// Returns all columns, sorted by `column_order`.
    pub async fn list_columns(&self) -> Vec<ColumnRow> {
        self.tables.read().await.columns.clone()
    }

    /// Returns all tasks in insertion order.
    pub async fn list_tasks(&self) -> Vec<TaskRow> {
        self.tables.read().await.tasks.clone()
    }

    /// Returns all comments in insertion order.
    pub async fn list_comments(&self) -> Vec<CommentRow> {
        self.tables.read().await.comments.clone()
    }

    /// Inserts a new task row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateTask`] if a row with the same id
    /// already exists.
    pub async fn insert_task(&self, row: TaskRow) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.tasks.iter().any(|t| t.id == row.id) {
            return Err(StoreError::DuplicateTask(row.id));
        }
        tables.tasks.push(row);
        Ok(())
    }

    /// Overwrites the mutable fields of an existing task row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if no row has the given id.
    pub async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.clone()))?;
        row.content = patch.content;
        row.assigned_to = patch.assigned_to;
        row.due_date = patch.due_date;
        row.column_id = patch.column_id;
        Ok(())
    }

    /// Deletes a task row if present, returning whether a row was removed.
    ///
    /// Idempotent: deleting an absent id is not an error. Comments attached
    /// to the task are left in place, matching a storage layer with no
    /// foreign-key cascade.
    pub async fn delete_task(&self, id: &TaskId) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| &t.id != id);
        tables.tasks.len() < before
    }

    /// Inserts a new comment row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingCommentFields`] if the text is empty
    /// or solely whitespace. The referenced task is not required to exist.
    pub async fn insert_comment(&self, row: CommentRow) -> Result<(), StoreError> {
        if row.text.trim().is_empty() || row.task_id.as_str().is_empty() {
            return Err(StoreError::MissingCommentFields);
        }
        self.tables.write().await.comments.push(row);
        Ok(())
    }
}
