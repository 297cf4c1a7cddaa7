use std::sync::Arc;

use snafu::ResultExt;
use tracing::warn;

use quill_records::{BulkResponse, TaskBulkPayload, bulk};
use quill_transport::BulkUploadClient;

use crate::{
    error::{LogError, Result, TransportSnafu},
    request::LogRequest,
};

/// Default number of records per bulk upload call.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Chunk sizes above this threshold risk transport timeouts and trigger a
/// warning.
pub const MAX_CHUNK_SIZE: usize = 5000;

/// Uploads a record batch to a dataset in bounded-size chunks.
#[derive(Clone)]
pub struct BulkUploader {
    transport: Arc<dyn BulkUploadClient>,
}

impl BulkUploader {
    pub fn new(transport: Arc<dyn BulkUploadClient>) -> Self {
        Self { transport }
    }

    /// Upload all records of the request, one chunk at a time.
    ///
    /// Chunks are uploaded sequentially and in positional order. A
    /// transport failure aborts the remaining chunks and discards the
    /// counts accumulated so far: the caller observes the error, never a
    /// partial response.
    pub async fn upload(&self, request: &LogRequest) -> Result<BulkResponse> {
        if request.records.is_empty() {
            return Err(LogError::Validation {
                message: "empty record batch".to_string(),
            });
        }

        if request.chunk_size == 0 {
            return Err(LogError::Validation {
                message: "chunk size must be greater than zero".to_string(),
            });
        }

        let task = bulk::batch_task(&request.records).map_err(validation)?;
        bulk::check_homogeneous(task, &request.records).map_err(validation)?;

        if request.chunk_size > MAX_CHUNK_SIZE {
            warn!(
                chunk_size = request.chunk_size,
                max_chunk_size = MAX_CHUNK_SIZE,
                "chunk size is noticeably large, transport timeouts may occur"
            );
        }

        let total = request.records.len();
        let mut processed = 0;
        let mut failed = 0;
        let mut records_done = 0;

        for chunk in request.records.chunks(request.chunk_size) {
            let payload =
                TaskBulkPayload::from_records(task, chunk, &request.tags, &request.metadata)
                    .map_err(validation)?;

            let outcome = self
                .transport
                .bulk_upload(&request.dataset, payload)
                .await
                .context(TransportSnafu {
                    message: "chunk upload failed",
                })?;

            processed += outcome.processed;
            failed += outcome.failed;
            records_done += chunk.len();

            if let Some(progress) = &request.progress {
                progress.chunk_completed(records_done, total);
            }
        }

        Ok(BulkResponse {
            dataset: request.dataset.clone(),
            processed,
            failed,
        })
    }
}

fn validation(error: bulk::DispatchError) -> LogError {
    LogError::Validation {
        message: error.to_string(),
    }
}
