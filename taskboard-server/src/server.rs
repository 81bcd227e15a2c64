//! REST routes over the table store.
//!
//! Seven operations, one route each: list for the three tables, create /
//! update / delete for tasks, create for comments. Responses are JSON ack
//! messages; store errors map to client-error statuses.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, put};
use serde_json::json;

use taskboard_proto::{CommentRow, TaskId, TaskPatch, TaskRow};

use crate::store::{StoreError, TableStore};

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::DuplicateTask(_) => StatusCode::CONFLICT,
            Self::TaskNotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingCommentFields => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Builds the service router over a shared table store.
pub fn router(store: Arc<TableStore>) -> axum::Router {
    axum::Router::new()
        .route("/columns", get(list_columns))
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/comments", get(list_comments).post(create_comment))
        .with_state(store)
}

async fn list_columns(State(store): State<Arc<TableStore>>) -> impl IntoResponse {
    Json(store.list_columns().await)
}

async fn list_tasks(State(store): State<Arc<TableStore>>) -> impl IntoResponse {
    Json(store.list_tasks().await)
}

async fn list_comments(State(store): State<Arc<TableStore>>) -> impl IntoResponse {
    Json(store.list_comments().await)
}

async fn create_task(
    State(store): State<Arc<TableStore>>,
    Json(row): Json<TaskRow>,
) -> Result<impl IntoResponse, StoreError> {
    tracing::debug!(task_id = %row.id, column_id = %row.column_id, "create task");
    store.insert_task(row).await?;
    Ok(Json(json!({ "message": "task created" })))
}

async fn update_task(
    State(store): State<Arc<TableStore>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<impl IntoResponse, StoreError> {
    let id = TaskId::new(id);
    tracing::debug!(task_id = %id, column_id = %patch.column_id, "update task");
    store.update_task(&id, patch).await?;
    Ok(Json(json!({ "message": "task updated" })))
}

async fn delete_task(
    State(store): State<Arc<TableStore>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = TaskId::new(id);
    let removed = store.delete_task(&id).await;
    tracing::debug!(task_id = %id, removed, "delete task");
    Json(json!({ "message": "task deleted" }))
}

async fn create_comment(
    State(store): State<Arc<TableStore>>,
    Json(row): Json<CommentRow>,
) -> Result<impl IntoResponse, StoreError> {
    tracing::debug!(comment_id = %row.id, task_id = %row.task_id, "create comment");
    let id = row.id.clone();
    store.insert_comment(row).await?;
    Ok(Json(json!({ "message": "comment created", "comment_id": id })))
}

/// Starts the data service on the given address and returns the bound
/// address and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>), Box<dyn std::error::Error + Send + Sync>> {
    start_server_with_store(addr, Arc::new(TableStore::new())).await
}

/// Starts the data service with a pre-seeded [`TableStore`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_store(
    addr: &str,
    store: Arc<TableStore>,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "data service error");
        }
    });

    Ok((bound_addr, handle))
}
