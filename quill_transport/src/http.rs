//! HTTP client for the annotation server's bulk endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use snafu::ResultExt;
use tracing::debug;

use quill_records::{DatasetName, TaskBulkPayload, UploadOutcome};

use crate::{
    client::BulkUploadClient,
    error::{RequestSnafu, Result, TransportError},
};

/// Header carrying the workspace records are logged to.
const WORKSPACE_HEADER: &str = "x-quill-workspace";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A client that uploads record chunks to the annotation server over HTTP.
///
/// One `POST {base_url}/api/datasets/{name}/{task}:bulk` call is made per
/// chunk; the per-call timeout bounds every upload.
#[derive(Debug, Clone)]
pub struct HttpBulkClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    workspace: Option<String>,
}

/// Error payload returned by the server.
#[derive(Debug, Clone, Deserialize)]
struct ErrorResponse {
    message: String,
}

impl HttpBulkClient {
    /// Create a new bulk upload client with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a new bulk upload client with a per-call timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context(RequestSnafu {})?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            workspace: None,
        })
    }

    /// Log records to the given workspace instead of the default one.
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl BulkUploadClient for HttpBulkClient {
    async fn bulk_upload(
        &self,
        dataset: &DatasetName,
        payload: TaskBulkPayload,
    ) -> Result<UploadOutcome> {
        let url = format!(
            "{}/api/datasets/{}/{}:bulk",
            self.base_url,
            dataset,
            payload.task()
        );

        debug!(url = %url, num_records = payload.num_records(), "uploading chunk");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload);

        if let Some(workspace) = &self.workspace {
            request = request.header(WORKSPACE_HEADER, workspace);
        }

        let response = request.send().await.context(RequestSnafu {})?;

        if response.status().is_success() {
            return response
                .json::<UploadOutcome>()
                .await
                .context(RequestSnafu {});
        }

        let status = response.status();
        let body = response
            .json::<ErrorResponse>()
            .await
            .context(RequestSnafu {})?;

        Err(TransportError::Response {
            status,
            message: body.message,
        })
    }
}
