//! Request/response operations: start, status poll, cancel.

use deep_core::entities::{TaskHandle, TaskInfo};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{
    ResearchClient,
    error::ClientError,
    http::{check_response, read_json},
};

#[derive(Serialize)]
struct StartRequest<'a> {
    query: &'a str,
}

impl ResearchClient {
    /// Start a research task for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the service cannot be reached,
    /// [`ClientError::Api`] on a non-success status (carrying its status
    /// text), or [`ClientError::Parse`] if the body has no `task_id`.
    pub async fn start(&self, query: &str) -> Result<TaskHandle, ClientError> {
        let url = self.task_url(None, "");
        tracing::debug!(%url, "starting research task");

        let resp = self
            .http
            .post(&url)
            .json(&StartRequest { query })
            .send()
            .await?;
        let handle: TaskHandle = read_json(check_response(resp)?).await?;

        tracing::debug!(task_id = %handle.task_id, "research task started");
        Ok(handle)
    }

    /// Fetch the current snapshot of a task.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the service returns a
    /// non-success status, or the body is not valid task JSON.
    pub async fn get_status(&self, task_id: &str) -> Result<TaskInfo, ClientError> {
        let url = self.task_url(Some(task_id), "");
        tracing::debug!(%url, "fetching task status");

        let resp = self.http.get(&url).send().await?;
        read_json(check_response(resp)?).await
    }

    /// Ask the service to stop a task. Fire-and-forget.
    ///
    /// The request runs on a background task and its outcome is only logged.
    /// Awaiting the returned handle waits for the request to be sent, never
    /// for the task to actually stop. Must be called within a Tokio runtime.
    pub fn cancel(&self, task_id: &str) -> JoinHandle<()> {
        let http = self.http.clone();
        let url = self.task_url(Some(task_id), "/cancel");
        let task_id = task_id.to_string();

        tokio::spawn(async move {
            match http.post(&url).send().await {
                Ok(resp) if resp.status().is_success() => {
                    tracing::debug!(%task_id, "cancel request accepted");
                }
                Ok(resp) => {
                    tracing::debug!(%task_id, status = %resp.status(), "cancel request rejected");
                }
                Err(error) => {
                    tracing::warn!(%task_id, %error, "cancel request failed");
                }
            }
        })
    }
}
