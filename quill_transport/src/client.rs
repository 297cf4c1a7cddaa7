use async_trait::async_trait;
use quill_records::{DatasetName, TaskBulkPayload, UploadOutcome};

use crate::error::Result;

/// A client able to perform one bulk-upload call per chunk.
///
/// Implementations perform a single network round trip and report how many
/// records the server processed and how many it failed. Retries, if any,
/// happen behind this boundary; callers never retry a chunk themselves.
#[async_trait]
pub trait BulkUploadClient: Send + Sync + 'static {
    async fn bulk_upload(
        &self,
        dataset: &DatasetName,
        payload: TaskBulkPayload,
    ) -> Result<UploadOutcome>;
}
