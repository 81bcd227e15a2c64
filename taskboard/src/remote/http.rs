//! reqwest-backed implementation of [`RemoteService`].

use reqwest::Response;
use serde::de::DeserializeOwned;

use taskboard_proto::{ColumnRow, CommentRow, TaskId, TaskPatch, TaskRow};

use super::{RemoteError, RemoteService};

/// HTTP client for a running taskboard data service.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Creates a client for the service at `base_url`
    /// (e.g. `http://127.0.0.1:5000`). A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, RemoteError> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        let resp = check_status(resp).await?;
        resp.json().await.map_err(transport)
    }
}

/// Wraps a reqwest error as a transport failure.
fn transport(e: reqwest::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

/// Maps a non-success response to [`RemoteError::Rejected`], carrying the
/// body text when it can be read.
async fn check_status(resp: Response) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(RemoteError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl RemoteService for HttpRemote {
    async fn list_columns(&self) -> Result<Vec<ColumnRow>, RemoteError> {
        self.fetch_list("/columns").await
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRow>, RemoteError> {
        self.fetch_list("/tasks").await
    }

    async fn list_comments(&self) -> Result<Vec<CommentRow>, RemoteError> {
        self.fetch_list("/comments").await
    }

    async fn create_task(&self, row: &TaskRow) -> Result<(), RemoteError> {
        let resp = self
            .client
            .post(self.url("/tasks"))
            .json(row)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<(), RemoteError> {
        let resp = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RemoteError> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }

    async fn create_comment(&self, row: &CommentRow) -> Result<(), RemoteError> {
        let resp = self
            .client
            .post(self.url("/comments"))
            .json(row)
            .send()
            .await
            .map_err(transport)?;
        check_status(resp).await.map(drop)
    }
}
