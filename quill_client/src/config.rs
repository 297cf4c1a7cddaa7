//! Client configuration.

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:6900";
const DEFAULT_API_KEY: &str = "quill.apikey";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the annotation server.
#[derive(Debug, Clone)]
pub struct QuillConfig {
    /// Address of the REST API.
    pub api_url: String,
    /// Authentication key for the REST API.
    pub api_key: String,
    /// The workspace records are logged to. `None` uses the user's private
    /// workspace.
    pub workspace: Option<String>,
    /// Per network call timeout.
    pub timeout: Duration,
}

impl QuillConfig {
    /// Build a configuration from the environment.
    ///
    /// `QUILL_API_URL`, `QUILL_API_KEY` and `QUILL_WORKSPACE` are
    /// consulted, falling back to the local defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("QUILL_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var("QUILL_API_KEY")
                .unwrap_or_else(|_| DEFAULT_API_KEY.to_string()),
            workspace: std::env::var("QUILL_WORKSPACE").ok(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
