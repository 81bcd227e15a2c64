//! The board store: mutation operations that persist remotely, then
//! reconcile local state from the outcome.
//!
//! Every operation follows the same shape: check local preconditions,
//! issue the remote call(s), and only on success apply the pure
//! transition from [`super::state`]. Delete included — the remote row is
//! removed first and the local removal is conditional on that success,
//! so local state never runs ahead of the store on any path.
//!
//! The store takes `&mut self` per operation: mutations are serialized by
//! the borrow checker within one store, matching the single logical
//! thread of control the board assumes. Two stores pointed at the same
//! service still race at the row level; last write wins.

use chrono::Utc;

use taskboard_proto::{ColumnId, CommentId, CommentRow, TaskId, TaskRow};

use super::state::{Board, Comment, MoveApplied, Task};
use super::{BoardError, DragState};
use crate::remote::RemoteService;

/// Input for [`BoardStore::create_task`].
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    /// Task text; required, rejected if blank after trimming.
    pub content: String,
    /// Optional assignee display name.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<chrono::NaiveDate>,
    /// Optional initial comment; blank text is treated as not supplied.
    pub initial_comment: Option<String>,
}

/// Input for [`BoardStore::update_task`]: a full revision of the mutable
/// fields. The column is never changed on this path.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    /// Which task to edit.
    pub id: TaskId,
    /// Revised content.
    pub content: String,
    /// Revised assignee, `None` to clear.
    pub assigned_to: Option<String>,
    /// Revised due date, `None` to clear.
    pub due_date: Option<chrono::NaiveDate>,
}

/// What a drop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The task was persisted to and moved into the destination column.
    Moved,
    /// No task was being dragged; nothing happened.
    NoDragInProgress,
    /// The dragged task had no source column (or no record at all); the
    /// board was left unchanged as a safety check.
    Abandoned,
}

/// Owns the in-memory [`Board`] and the transient drag state, and
/// sequences every mutation against the remote data service.
pub struct BoardStore<R: RemoteService> {
    remote: R,
    board: Board,
    drag: DragState,
    default_column: ColumnId,
}

impl<R: RemoteService> BoardStore<R> {
    /// Creates an empty store. Call [`load`](Self::load) before mutating.
    ///
    /// `default_column` is where newly created tasks land (`todo` in the
    /// seeded set).
    pub fn new(remote: R, default_column: ColumnId) -> Self {
        Self {
            remote,
            board: Board::default(),
            drag: DragState::Idle,
            default_column,
        }
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current drag gesture state.
    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Rebuilds the board from the remote store.
    ///
    /// The three tables are fetched concurrently and a fresh board is
    /// built from scratch — never merged into the previous one. On any
    /// fetch failing the previous board is discarded too and the store is
    /// left empty (fail-clean), with the error returned for the caller to
    /// surface alongside a retry.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] if any of the three fetches fails.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        self.board = Board::default();
        self.drag = DragState::Idle;

        let (columns, tasks, comments) = tokio::try_join!(
            self.remote.list_columns(),
            self.remote.list_tasks(),
            self.remote.list_comments(),
        )?;

        self.board = Board::from_remote(columns, tasks, comments);
        tracing::info!(
            tasks = self.board.tasks.len(),
            columns = self.board.columns.len(),
            "board loaded"
        );
        Ok(())
    }

    /// Creates a task in the default column, with an optional first
    /// comment, and returns the new task's id.
    ///
    /// The task row is persisted before anything touches the board. A
    /// supplied initial comment is persisted afterwards; if that second
    /// call fails the task still lands locally without the comment
    /// (accepted partial success, logged at warn).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyContent`] for blank content before any
    /// remote call, or [`BoardError::Remote`] if task persistence fails —
    /// in which case no local mutation occurs.
    pub async fn create_task(&mut self, input: NewTask) -> Result<TaskId, BoardError> {
        let content = input.content.trim();
        if content.is_empty() {
            return Err(BoardError::EmptyContent);
        }

        let row = TaskRow {
            id: TaskId::generate(),
            content: content.to_string(),
            assigned_to: input.assigned_to.filter(|a| !a.trim().is_empty()),
            due_date: input.due_date,
            column_id: self.default_column.clone(),
        };
        self.remote.create_task(&row).await?;
        tracing::info!(task_id = %row.id, column_id = %row.column_id, "task created");

        let mut comments = Vec::new();
        if let Some(text) = input
            .initial_comment
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let comment_row = CommentRow {
                id: CommentId::generate(),
                task_id: row.id.clone(),
                text: text.to_string(),
                created_at: Utc::now(),
            };
            match self.remote.create_comment(&comment_row).await {
                Ok(()) => comments.push(Comment {
                    id: comment_row.id,
                    text: comment_row.text,
                    created_at: comment_row.created_at,
                }),
                Err(e) => {
                    // Task is already persisted; keep it and drop the comment.
                    tracing::warn!(task_id = %row.id, error = %e, "initial comment not persisted");
                }
            }
        }

        let id = row.id.clone();
        self.board.insert_task(Task::from_row(row, comments));
        Ok(id)
    }

    /// Applies a full edit of a task's mutable fields.
    ///
    /// Remote-then-local: the local record is replaced only after the
    /// overwrite is persisted. The task's column and comments are carried
    /// over unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for an unknown id, or
    /// [`BoardError::Remote`] on persistence failure — local state is
    /// untouched either way.
    pub async fn update_task(&mut self, edit: TaskEdit) -> Result<(), BoardError> {
        let content = edit.content.trim();
        if content.is_empty() {
            return Err(BoardError::EmptyContent);
        }
        let current = self
            .board
            .tasks
            .get(&edit.id)
            .ok_or_else(|| BoardError::TaskNotFound(edit.id.clone()))?;

        let revised = Task {
            id: edit.id.clone(),
            content: content.to_string(),
            assigned_to: edit.assigned_to.filter(|a| !a.trim().is_empty()),
            due_date: edit.due_date,
            comments: current.comments.clone(),
            column_id: current.column_id.clone(),
        };
        self.remote.update_task(&edit.id, &revised.to_row().to_patch()).await?;
        tracing::info!(task_id = %edit.id, "task updated");

        self.board.replace_task(revised);
        Ok(())
    }

    /// Deletes a task remotely, then removes it from the board.
    ///
    /// One consistent policy with the other mutations: if the remote
    /// delete fails, the task stays on the board. Unknown ids are
    /// tolerated — the remote delete is idempotent and the local removal
    /// of an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] if the remote delete fails.
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), BoardError> {
        self.remote.delete_task(id).await?;
        tracing::info!(task_id = %id, "task deleted");
        self.board.remove_task(id);
        Ok(())
    }

    /// Appends a comment to an existing task's thread.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyComment`] for blank text or
    /// [`BoardError::TaskNotFound`] for an unknown task, both before any
    /// remote call; [`BoardError::Remote`] on persistence failure, which
    /// leaves the thread unchanged.
    pub async fn add_comment(&mut self, id: &TaskId, text: &str) -> Result<CommentId, BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyComment);
        }
        if !self.board.tasks.contains_key(id) {
            return Err(BoardError::TaskNotFound(id.clone()));
        }

        let row = CommentRow {
            id: CommentId::generate(),
            task_id: id.clone(),
            text: text.to_string(),
            created_at: Utc::now(),
        };
        self.remote.create_comment(&row).await?;
        tracing::info!(task_id = %id, comment_id = %row.id, "comment added");

        let comment_id = row.id.clone();
        self.board.append_comment(
            id,
            Comment {
                id: row.id,
                text: row.text,
                created_at: row.created_at,
            },
        );
        Ok(comment_id)
    }

    /// Begins dragging a task card.
    pub fn drag_start(&mut self, task: TaskId) {
        self.drag.start(task);
    }

    /// Records the column under the dragged card. Visual hint only;
    /// nothing is persisted.
    pub fn drag_over(&mut self, column: ColumnId) {
        self.drag.over(column);
    }

    /// Drops the dragged task onto a column.
    ///
    /// With no drag in progress this is a no-op. Otherwise the full
    /// current task record is persisted with its `column_id` rewritten to
    /// the destination; on success the board membership is updated (the
    /// source column found by scanning, never trusted from the task). The
    /// transient drag state is cleared on every path, success or failure.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] if the persistence call fails; no
    /// local membership change is made in that case.
    pub async fn drop_on(&mut self, dest: ColumnId) -> Result<DropOutcome, BoardError> {
        // Clears the drag state regardless of what follows.
        let Some(task_id) = self.drag.take() else {
            return Ok(DropOutcome::NoDragInProgress);
        };

        let Some(task) = self.board.tasks.get(&task_id) else {
            tracing::warn!(task_id = %task_id, "dragged task has no record, drop abandoned");
            return Ok(DropOutcome::Abandoned);
        };

        let mut patch = task.to_row().to_patch();
        patch.column_id = dest.clone();
        self.remote.update_task(&task_id, &patch).await?;

        match self.board.move_task(&task_id, &dest) {
            MoveApplied::Moved => {
                tracing::info!(task_id = %task_id, column_id = %dest, "task moved");
                Ok(DropOutcome::Moved)
            }
            MoveApplied::SourceNotFound => {
                tracing::warn!(task_id = %task_id, "no source column listed the task, move abandoned");
                Ok(DropOutcome::Abandoned)
            }
        }
    }
}
