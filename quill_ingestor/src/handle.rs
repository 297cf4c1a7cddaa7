use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use quill_records::BulkResponse;

use crate::error::{ReplyChannelClosedSnafu, Result};

pub type LogReplySender = oneshot::Sender<Result<BulkResponse>>;

/// Handle to an upload running on the background worker.
///
/// The handle is resolved exactly once by the worker with either the
/// aggregated response or the upload error. It may be waited on from a
/// synchronous thread, awaited from an async context, cancelled, or
/// ignored entirely.
#[derive(Debug)]
pub struct LogHandle {
    rx: oneshot::Receiver<Result<BulkResponse>>,
    ct: CancellationToken,
}

impl LogHandle {
    pub(crate) fn new(rx: oneshot::Receiver<Result<BulkResponse>>, ct: CancellationToken) -> Self {
        Self { rx, ct }
    }

    /// Block the calling thread until the upload completes.
    ///
    /// The pending upload is cancelled if the wait exits early on any path;
    /// cancelling an already completed upload is a no-op, and chunks
    /// already sent to the server are never rolled back.
    ///
    /// Must not be called from within an async runtime.
    pub fn wait(self) -> Result<BulkResponse> {
        let _guard = self.ct.drop_guard();

        match self.rx.blocking_recv() {
            Ok(result) => result,
            Err(_) => ReplyChannelClosedSnafu {}.fail(),
        }
    }

    /// Wait for the upload to complete without blocking the thread.
    ///
    /// Unlike [`LogHandle::wait`] this does not cancel the upload when the
    /// future is dropped.
    pub async fn resolve(self) -> Result<BulkResponse> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => ReplyChannelClosedSnafu {}.fail(),
        }
    }

    /// Request cancellation of the pending upload.
    ///
    /// Cancellation is advisory: an in-flight chunk call is not aborted and
    /// chunks already applied by the server are not rolled back. Cancelling
    /// a completed upload has no effect.
    pub fn cancel(&self) {
        self.ct.cancel();
    }
}
