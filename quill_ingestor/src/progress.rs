/// Observer notified as the chunks of a batch complete.
///
/// Progress is best-effort feedback for presentation layers: when an upload
/// fails midway the observer simply stops receiving updates.
pub trait ProgressObserver: Send + Sync {
    /// Called after each chunk completes with the number of records
    /// uploaded so far and the total number of records in the batch.
    fn chunk_completed(&self, records_done: usize, records_total: usize);
}
