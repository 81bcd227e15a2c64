//! The normalized in-memory board and its pure state transitions.
//!
//! [`Board`] is rebuilt from scratch at load time and then mutated through
//! small transition methods, one per operation. The transitions never talk
//! to the network; [`super::store::BoardStore`] sequences remote calls
//! around them.
//!
//! # Invariant
//!
//! A task id appears in `Column::task_ids` of the column named by its
//! `column_id` if and only if that column exists; a task whose `column_id`
//! names no known column is orphaned (absent from every column's
//! `task_ids`) but stays addressable in `tasks`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use taskboard_proto::{ColumnId, ColumnRow, CommentId, CommentRow, TaskId, TaskRow};

/// A timestamped text note owned by a task.
///
/// Order within [`Task::comments`] is chronological (insertion order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Client-generated comment id.
    pub id: CommentId,
    /// Comment body.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    fn from_row(row: CommentRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            created_at: row.created_at,
        }
    }
}

/// A unit of work owned by exactly one column at any committed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Client-generated task id.
    pub id: TaskId,
    /// Task text, non-empty.
    pub content: String,
    /// Optional assignee display name.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<chrono::NaiveDate>,
    /// Comment thread, chronological.
    pub comments: Vec<Comment>,
    /// Column this task belongs to.
    pub column_id: ColumnId,
}

impl Task {
    /// Builds a task from its wire row plus its already-filtered comments.
    #[must_use]
    pub fn from_row(row: TaskRow, comments: Vec<Comment>) -> Self {
        Self {
            id: row.id,
            content: row.content,
            assigned_to: row.assigned_to,
            due_date: row.due_date,
            comments,
            column_id: row.column_id,
        }
    }

    /// Rebuilds the wire row for this task's current fields.
    ///
    /// Comments are not part of the task row; they travel on their own table.
    #[must_use]
    pub fn to_row(&self) -> TaskRow {
        TaskRow {
            id: self.id.clone(),
            content: self.content.clone(),
            assigned_to: self.assigned_to.clone(),
            due_date: self.due_date,
            column_id: self.column_id.clone(),
        }
    }
}

/// A named bucket holding an ordered list of task ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Stable column id from the seeded set.
    pub id: ColumnId,
    /// Human-readable title.
    pub title: String,
    /// Member task ids in display order.
    pub task_ids: Vec<TaskId>,
    /// Left-to-right display position.
    pub order: i64,
}

/// Outcome of applying a drop to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveApplied {
    /// The task changed columns (or was re-appended to its own column).
    Moved,
    /// No column currently listed the task id; the board was left unchanged.
    SourceNotFound,
}

/// The aggregate in-memory model: tasks by id, columns by id, and the
/// column render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    /// All known tasks, including orphans.
    pub tasks: HashMap<TaskId, Task>,
    /// All known columns.
    pub columns: HashMap<ColumnId, Column>,
    /// Column ids in render order, derived from fetch order at load time.
    pub column_order: Vec<ColumnId>,
}

impl Board {
    /// Builds a fresh board from the three remote table snapshots.
    ///
    /// Columns land in response order (the service returns them sorted by
    /// `column_order`). Each task picks up the subsequence of comments whose
    /// `task_id` matches, preserving fetch order, and is appended to its
    /// column's `task_ids` if the column exists; otherwise it is orphaned.
    #[must_use]
    pub fn from_remote(
        columns: Vec<ColumnRow>,
        tasks: Vec<TaskRow>,
        comments: Vec<CommentRow>,
    ) -> Self {
        let mut board = Self::default();

        for column in columns {
            board.column_order.push(column.id.clone());
            board.columns.insert(
                column.id.clone(),
                Column {
                    id: column.id,
                    title: column.title,
                    task_ids: Vec::new(),
                    order: column.column_order,
                },
            );
        }

        for task in tasks {
            let task_comments = comments
                .iter()
                .filter(|c| c.task_id == task.id)
                .cloned()
                .map(Comment::from_row)
                .collect();
            let task = Task::from_row(task, task_comments);

            if let Some(column) = board.columns.get_mut(&task.column_id) {
                column.task_ids.push(task.id.clone());
            }
            board.tasks.insert(task.id.clone(), task);
        }

        board
    }

    /// Inserts a freshly persisted task and appends it to its column.
    ///
    /// Used by the create path, after the remote create succeeded. If the
    /// task's column is unknown the task lands orphaned, same as at load.
    pub fn insert_task(&mut self, task: Task) {
        if let Some(column) = self.columns.get_mut(&task.column_id) {
            column.task_ids.push(task.id.clone());
        }
        self.tasks.insert(task.id.clone(), task);
    }

    /// Replaces a task record in full, leaving column membership untouched.
    ///
    /// Used by the edit path; `column_id` is unchanged there.
    pub fn replace_task(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    /// Removes a task from `tasks` and from every column's `task_ids`.
    ///
    /// Removing an absent id is a no-op.
    pub fn remove_task(&mut self, id: &TaskId) {
        self.tasks.remove(id);
        for column in self.columns.values_mut() {
            column.task_ids.retain(|t| t != id);
        }
    }

    /// Appends a comment to a task's thread, preserving chronological order.
    ///
    /// Returns `false` if the task is unknown.
    pub fn append_comment(&mut self, id: &TaskId, comment: Comment) -> bool {
        match self.tasks.get_mut(id) {
            Some(task) => {
                task.comments.push(comment);
                true
            }
            None => false,
        }
    }

    /// Moves a task to `dest` after a persisted drop.
    ///
    /// The source column is found by scanning all columns for the id, never
    /// trusted from the task's own (possibly stale) `column_id`. If no
    /// column lists the id the board is left unchanged as a safety check.
    pub fn move_task(&mut self, id: &TaskId, dest: &ColumnId) -> MoveApplied {
        let source = self
            .columns
            .values()
            .find(|c| c.task_ids.contains(id))
            .map(|c| c.id.clone());
        let Some(source) = source else {
            return MoveApplied::SourceNotFound;
        };

        if let Some(column) = self.columns.get_mut(&source) {
            column.task_ids.retain(|t| t != id);
        }
        if let Some(column) = self.columns.get_mut(dest) {
            column.task_ids.push(id.clone());
        }
        if let Some(task) = self.tasks.get_mut(id) {
            task.column_id = dest.clone();
        }
        MoveApplied::Moved
    }

    /// Checks the column-membership invariant over the whole board.
    ///
    /// For every task whose `column_id` names a known column, that column's
    /// `task_ids` must contain the task id exactly once and no other column
    /// may list it; orphaned tasks must appear in no column. Every listed id
    /// must name a known task.
    #[must_use]
    pub fn membership_invariant_holds(&self) -> bool {
        for task in self.tasks.values() {
            let listing: Vec<&ColumnId> = self
                .columns
                .values()
                .filter(|c| c.task_ids.contains(&task.id))
                .map(|c| &c.id)
                .collect();
            if self.columns.contains_key(&task.column_id) {
                if listing != vec![&task.column_id] {
                    return false;
                }
                let count = self.columns[&task.column_id]
                    .task_ids
                    .iter()
                    .filter(|t| **t == task.id)
                    .count();
                if count != 1 {
                    return false;
                }
            } else if !listing.is_empty() {
                return false;
            }
        }
        self.columns
            .values()
            .flat_map(|c| &c.task_ids)
            .all(|id| self.tasks.contains_key(id))
    }
}
