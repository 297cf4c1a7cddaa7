use std::sync::Arc;

use futures_util::{StreamExt, stream::FuturesUnordered};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::error;

use quill_transport::BulkUploadClient;

use crate::{
    error::{CancelledSnafu, Result, WorkerUnavailableSnafu},
    handle::{LogHandle, LogReplySender},
    request::LogRequest,
    uploader::BulkUploader,
};

/// The scheduling loop all asynchronous uploads are submitted to.
///
/// Uploads from different submissions interleave cooperatively inside the
/// loop; the chunks of any single batch stay strictly sequential inside
/// [`BulkUploader::upload`].
pub struct LogIngestor {
    tx: mpsc::UnboundedSender<LogRequestWithReply>,
    rx: mpsc::UnboundedReceiver<LogRequestWithReply>,
    uploader: BulkUploader,
}

/// Cheap cloneable handle used to submit uploads to the ingestor loop.
#[derive(Clone)]
pub struct LogIngestorClient {
    tx: mpsc::UnboundedSender<LogRequestWithReply>,
}

/// A submitted request together with its reply channel and cancellation
/// token.
pub struct LogRequestWithReply {
    pub request: LogRequest,
    pub reply: LogReplySender,
    pub ct: CancellationToken,
}

pub async fn run_background_ingestor(ingestor: LogIngestor, ct: CancellationToken) -> Result<()> {
    ingestor.run(ct).await
}

impl LogIngestor {
    pub fn new(transport: Arc<dyn BulkUploadClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx,
            uploader: BulkUploader::new(transport),
        }
    }

    pub fn client(&self) -> LogIngestorClient {
        LogIngestorClient {
            tx: self.tx.clone(),
        }
    }

    /// Run the scheduling loop until cancelled or all clients are gone.
    pub async fn run(self, ct: CancellationToken) -> Result<()> {
        let LogIngestor { tx, mut rx, uploader } = self;
        // The loop keeps no sender of its own, so it stops once every
        // client has been dropped.
        drop(tx);

        let mut upload_tasks = FuturesUnordered::new();

        loop {
            tokio::select! {
                _ = ct.cancelled() => {
                    break;
                }
                submitted = rx.recv() => {
                    let Some(LogRequestWithReply { request, reply, ct: request_ct }) = submitted else {
                        break;
                    };

                    upload_tasks.push(run_upload(uploader.clone(), request, reply, request_ct));
                }
                _ = upload_tasks.next(), if !upload_tasks.is_empty() => {}
            }
        }

        Ok(())
    }
}

impl LogIngestorClient {
    /// Submit an upload to the background loop, returning a handle to its
    /// eventual result.
    ///
    /// Callable from any thread, synchronous or asynchronous; submission
    /// never blocks. Fails with `WorkerUnavailable` if the loop has
    /// stopped.
    pub fn submit(&self, request: LogRequest) -> Result<LogHandle> {
        let (tx, rx) = oneshot::channel();
        let ct = CancellationToken::new();

        self.tx
            .send(LogRequestWithReply {
                request,
                reply: tx,
                ct: ct.clone(),
            })
            .or_else(|_| WorkerUnavailableSnafu {}.fail())?;

        Ok(LogHandle::new(rx, ct))
    }
}

async fn run_upload(
    uploader: BulkUploader,
    request: LogRequest,
    reply: LogReplySender,
    ct: CancellationToken,
) {
    let result = tokio::select! {
        _ = ct.cancelled() => CancelledSnafu {}.fail(),
        result = uploader.upload(&request) => result,
    };

    if let Err(err) = &result {
        // Recorded here so detached callers that never consume their
        // handle still get a diagnostic.
        error!(
            dataset = %request.dataset,
            num_records = request.records.len(),
            chunk_size = request.chunk_size,
            error = %err,
            "failed to log records"
        );
    }

    let _ = reply.send(result);
}
