//! Transient state for the drag-and-drop gesture.
//!
//! The gesture is a three-state machine:
//!
//! ```text
//! Idle -> (start on task T) -> Dragging(T)
//!      -> (over column C, repeatable) -> DragOverHint(T, C)
//!      -> (drop) -> Idle
//! ```
//!
//! The drag-over hint is purely visual; nothing is persisted until the
//! drop, which [`super::store::BoardStore::drop_on`] handles. Dropping
//! clears this state on every path, success or failure.

use taskboard_proto::{ColumnId, TaskId};

/// Current phase of the drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task card is being dragged but is not over any column.
    Dragging {
        /// The dragged task.
        task: TaskId,
    },
    /// A dragged task is hovering over a column (highlight hint only).
    DragOverHint {
        /// The dragged task.
        task: TaskId,
        /// The column currently under the cursor.
        over: ColumnId,
    },
}

impl DragState {
    /// Begins dragging a task. Replaces any drag already in progress.
    pub fn start(&mut self, task: TaskId) {
        *self = Self::Dragging { task };
    }

    /// Records the column under the cursor.
    ///
    /// Repeatable: hovering a second column replaces the first. Ignored
    /// when no task is being dragged, since a hint without a drag means
    /// nothing.
    pub fn over(&mut self, column: ColumnId) {
        match std::mem::take(self) {
            Self::Idle => {}
            Self::Dragging { task } | Self::DragOverHint { task, .. } => {
                *self = Self::DragOverHint { task, over: column };
            }
        }
    }

    /// Ends the gesture, returning the dragged task id if there was one.
    ///
    /// Always leaves the state [`DragState::Idle`].
    pub fn take(&mut self) -> Option<TaskId> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging { task } | Self::DragOverHint { task, .. } => Some(task),
        }
    }

    /// The task currently being dragged, if any.
    #[must_use]
    pub fn dragged_task(&self) -> Option<&TaskId> {
        match self {
            Self::Idle => None,
            Self::Dragging { task } | Self::DragOverHint { task, .. } => Some(task),
        }
    }

    /// The column currently hinted as the drop target, if any.
    #[must_use]
    pub fn hint_column(&self) -> Option<&ColumnId> {
        match self {
            Self::DragOverHint { over, .. } => Some(over),
            _ => None,
        }
    }
}
