use std::sync::Arc;

use reqwest::StatusCode;
use snafu::Snafu;

/// Transport error types.
///
/// Transport failures always originate from a network call, which keeps
/// them distinguishable from the client's own validation errors.
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum TransportError {
    /// The request could not be sent or the response body not read.
    #[snafu(display("request error"))]
    Request {
        #[snafu(source(from(reqwest::Error, Arc::new)))]
        source: Arc<reqwest::Error>,
    },
    /// The server answered with a non-success status.
    #[snafu(display("response error: status={status}, message={message}"))]
    Response { status: StatusCode, message: String },
}

pub type Result<T, E = TransportError> = std::result::Result<T, E>;
