use std::{collections::HashMap, sync::Arc};

use snafu::ResultExt;
use tracing::info;

use quill_ingestor::{
    BackgroundIngestor, BulkUploader, DEFAULT_CHUNK_SIZE, LogHandle, LogRequest, ProgressObserver,
};
use quill_records::{BulkResponse, DatasetName, Record};
use quill_transport::{BulkUploadClient, HttpBulkClient};

use crate::{
    config::QuillConfig,
    error::{NameSnafu, Result, TransportSnafu},
};

/// Per-call options for logging records.
#[derive(Clone)]
pub struct LogOptions {
    /// Tags attached to the dataset.
    pub tags: HashMap<String, String>,
    /// Extra dataset metadata.
    pub metadata: HashMap<String, serde_json::Value>,
    /// Best-effort number of records per bulk call. Zero means the
    /// default.
    pub chunk_size: usize,
    /// Emit a summary line once the upload completes. Callers using the
    /// background mode are expected to turn this off.
    pub verbose: bool,
    /// Optional per-chunk progress observer.
    pub progress: Option<Arc<dyn ProgressObserver>>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            tags: HashMap::new(),
            metadata: HashMap::new(),
            chunk_size: 0,
            verbose: true,
            progress: None,
        }
    }
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self {
            verbose: false,
            ..Default::default()
        }
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Client for the annotation server.
///
/// The client owns one background execution context shared by all `log`
/// calls; it is created once with the client and torn down when the client
/// is dropped.
pub struct QuillClient {
    uploader: BulkUploader,
    agent: BackgroundIngestor,
}

impl QuillClient {
    /// Create a client connected to the configured server.
    pub fn new(config: QuillConfig) -> Result<Self> {
        let mut transport =
            HttpBulkClient::with_timeout(&config.api_url, &config.api_key, config.timeout)
                .context(TransportSnafu {})?;

        if let Some(workspace) = &config.workspace {
            transport = transport.with_workspace(workspace);
        }

        Self::with_transport(Arc::new(transport))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn BulkUploadClient>) -> Result<Self> {
        let agent = BackgroundIngestor::spawn(transport.clone())?;

        Ok(Self {
            uploader: BulkUploader::new(transport),
            agent,
        })
    }

    /// Log records to a dataset, blocking until the upload completes.
    ///
    /// The upload runs on the background worker; the calling thread waits
    /// for the aggregated response and the pending upload is released on
    /// every exit path.
    pub fn log(
        &self,
        records: Vec<Record>,
        dataset: &str,
        options: LogOptions,
    ) -> Result<BulkResponse> {
        let verbose = options.verbose;
        let request = self.make_request(records, dataset, options)?;

        let handle = self.agent.submit(request)?;
        let response = handle.wait()?;

        if verbose {
            summary(&response);
        }

        Ok(response)
    }

    /// Log records without waiting for the upload to finish.
    ///
    /// Returns the handle immediately; the caller may wait on it, cancel
    /// it, or ignore it. Upload failures are still recorded in the log
    /// even when the handle is never consumed.
    pub fn log_background(
        &self,
        records: Vec<Record>,
        dataset: &str,
        options: LogOptions,
    ) -> Result<LogHandle> {
        let request = self.make_request(records, dataset, options)?;

        Ok(self.agent.submit(request)?)
    }

    /// Log records from within an async context.
    ///
    /// The chunked upload runs directly on the caller's own runtime; the
    /// background worker is not involved.
    pub async fn log_async(
        &self,
        records: Vec<Record>,
        dataset: &str,
        options: LogOptions,
    ) -> Result<BulkResponse> {
        let verbose = options.verbose;
        let request = self.make_request(records, dataset, options)?;

        let response = self.uploader.upload(&request).await?;

        if verbose {
            summary(&response);
        }

        Ok(response)
    }

    /// Stop the background worker, cancelling pending uploads.
    pub fn shutdown(&mut self) {
        self.agent.shutdown();
    }

    fn make_request(
        &self,
        records: Vec<Record>,
        dataset: &str,
        options: LogOptions,
    ) -> Result<LogRequest> {
        let dataset = DatasetName::new(dataset).context(NameSnafu {})?;

        let chunk_size = if options.chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            options.chunk_size
        };

        let mut request = LogRequest::new(dataset, records)
            .with_tags(options.tags)
            .with_metadata(options.metadata)
            .with_chunk_size(chunk_size);

        if let Some(progress) = options.progress {
            request = request.with_progress(progress);
        }

        Ok(request)
    }
}

fn summary(response: &BulkResponse) {
    info!(
        dataset = %response.dataset,
        processed = response.processed,
        failed = response.failed,
        "records logged"
    );
}
