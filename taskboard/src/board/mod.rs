//! Board state and its mutation/sync protocol.
//!
//! The board is a client-side cache of the remote store: tasks by id,
//! columns by id, column render order. Mutations go remote-first — each
//! operation persists its rows, then applies the matching local
//! transition, so a failed call leaves local state untouched.

pub mod drag;
pub mod state;
pub mod store;

pub use drag::DragState;
pub use state::{Board, Column, Comment, MoveApplied, Task};
pub use store::{BoardStore, DropOutcome, NewTask, TaskEdit};

use taskboard_proto::TaskId;
use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that can occur during board operations.
///
/// The first three are local precondition failures, checked before any
/// remote call is issued; `Remote` wraps failures from the data service.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task content was empty or whitespace-only.
    #[error("task content cannot be empty")]
    EmptyContent,
    /// Comment text was empty or whitespace-only.
    #[error("comment text cannot be empty")]
    EmptyComment,
    /// The operation targeted a task id the board does not know.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// A remote call failed; local state is as documented per operation.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
