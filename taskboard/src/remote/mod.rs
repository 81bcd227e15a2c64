//! Remote data service abstraction.
//!
//! Defines the [`RemoteService`] trait covering the seven REST operations
//! the board consumes. Concrete implementations:
//! - [`http::HttpRemote`] — reqwest client against a running data service
//! - [`loopback::LoopbackRemote`] — in-process tables with failure
//!   injection, for testing the store without a server

pub mod http;
pub mod loopback;

use taskboard_proto::{ColumnRow, CommentRow, TaskId, TaskPatch, TaskRow};

/// Errors from remote calls, split by failure mode: the service could
/// not be reached at all, or it answered with a rejection.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failure: connection refused, reset, malformed body.
    #[error("remote unreachable: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("remote rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, best effort.
        message: String,
    },
}

/// Async client for the data service's row operations.
///
/// Each call is an independent, non-atomic row operation; the service
/// exposes no transactions to this layer. Implementations do not retry
/// and do not impose timeouts — a hung call stalls only the operation
/// that issued it.
pub trait RemoteService: Send + Sync {
    /// Fetches all columns, sorted by display order.
    fn list_columns(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ColumnRow>, RemoteError>> + Send;

    /// Fetches all task rows.
    fn list_tasks(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<TaskRow>, RemoteError>> + Send;

    /// Fetches all comment rows.
    fn list_comments(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<CommentRow>, RemoteError>> + Send;

    /// Persists a new task row with a client-supplied id.
    fn create_task(
        &self,
        row: &TaskRow,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Overwrites the mutable fields of an existing task row.
    fn update_task(
        &self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Deletes a task row. Idempotent on the service side.
    fn delete_task(
        &self,
        id: &TaskId,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;

    /// Persists a new comment row with a client-supplied id.
    fn create_comment(
        &self,
        row: &CommentRow,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>> + Send;
}
