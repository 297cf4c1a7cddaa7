use snafu::Snafu;

use quill_ingestor::LogError;
use quill_records::DatasetNameError;
use quill_transport::TransportError;

/// Client error types.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ClientError {
    /// The dataset name failed validation; no submission was made.
    #[snafu(display("invalid dataset name"))]
    Name { source: DatasetNameError },
    /// Building the HTTP transport failed.
    #[snafu(display("failed to build transport"))]
    Transport { source: TransportError },
    /// The upload failed.
    #[snafu(context(false), display("failed to log records"))]
    Log { source: LogError },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
