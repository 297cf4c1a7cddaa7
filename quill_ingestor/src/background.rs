//! A process-wide execution context hosting the ingestor loop on a
//! dedicated worker thread.

use std::{sync::Arc, thread};

use snafu::ResultExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use quill_transport::BulkUploadClient;

use crate::{
    error::{Result, WorkerSpawnSnafu},
    handle::LogHandle,
    ingestor::{LogIngestor, LogIngestorClient},
    request::LogRequest,
};

const WORKER_THREAD_NAME: &str = "quill-ingestor";

/// Runs the [`LogIngestor`] loop on a dedicated worker thread.
///
/// The context decouples synchronous callers from the asynchronous upload
/// path: submissions are queued to the worker's scheduling loop and
/// observed through a [`LogHandle`]. One context is created per client and
/// reused by all submissions; it outlives any individual call and is torn
/// down only on [`BackgroundIngestor::shutdown`] or drop.
pub struct BackgroundIngestor {
    client: LogIngestorClient,
    ct: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl BackgroundIngestor {
    /// Start the worker thread and its scheduling loop.
    pub fn spawn(transport: Arc<dyn BulkUploadClient>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context(WorkerSpawnSnafu {})?;

        let ingestor = LogIngestor::new(transport);
        let client = ingestor.client();
        let ct = CancellationToken::new();

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn({
                let ct = ct.clone();
                move || {
                    debug!("ingestor worker started");
                    if let Err(err) = runtime.block_on(ingestor.run(ct)) {
                        error!(error = %err, "ingestor loop terminated with error");
                    }
                    debug!("ingestor worker stopped");
                }
            })
            .context(WorkerSpawnSnafu {})?;

        Ok(Self {
            client,
            ct,
            worker: Some(worker),
        })
    }

    /// Submit an upload, returning a handle to its eventual result.
    ///
    /// Fails with `WorkerUnavailable` if the worker thread has died; the
    /// submission is not retried.
    pub fn submit(&self, request: LogRequest) -> Result<LogHandle> {
        self.client.submit(request)
    }

    /// Stop the scheduling loop and wait for the worker thread to exit.
    ///
    /// Pending uploads are cancelled; chunks already sent to the server are
    /// not rolled back.
    pub fn shutdown(&mut self) {
        self.ct.cancel();

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for BackgroundIngestor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
