use std::sync::Arc;

use snafu::Snafu;

use quill_transport::TransportError;

/// Log error types.
///
/// The message associated with an error is surfaced to the caller through
/// the log handle, for this reason it should contain information that is
/// useful to the user.
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum LogError {
    /// Validation error.
    ///
    /// Raised before any network call when a precondition on the input is
    /// not met.
    #[snafu(display("validation error: {message}"))]
    Validation { message: String },
    /// Transport error.
    ///
    /// A chunk upload failed; the remaining chunks of the batch were
    /// aborted and the accumulated counts discarded.
    #[snafu(display("transport error: {message}"))]
    Transport {
        message: &'static str,
        source: TransportError,
    },
    /// The background worker is not running.
    #[snafu(display("background worker unavailable"))]
    WorkerUnavailable,
    /// The background worker thread could not be started.
    #[snafu(display("failed to start background worker"))]
    WorkerSpawn {
        #[snafu(source(from(std::io::Error, Arc::new)))]
        source: Arc<std::io::Error>,
    },
    /// The upload was cancelled before it completed.
    ///
    /// Chunks already sent to the server are not rolled back.
    #[snafu(display("upload cancelled"))]
    Cancelled,
    /// Reply channel closed.
    #[snafu(display("reply channel closed"))]
    ReplyChannelClosed,
}

pub type Result<T, E = LogError> = std::result::Result<T, E>;
