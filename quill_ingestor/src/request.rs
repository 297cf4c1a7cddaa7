use std::{collections::HashMap, fmt::Debug, sync::Arc};

use serde_json::Value;

use quill_records::{DatasetName, Record};

use crate::{progress::ProgressObserver, uploader::DEFAULT_CHUNK_SIZE};

/// A request to upload one batch of records to a dataset.
#[derive(Clone)]
pub struct LogRequest {
    /// The dataset the records are logged to.
    pub dataset: DatasetName,
    /// The full record batch. All records must share one task.
    pub records: Vec<Record>,
    /// Tags attached to the dataset.
    pub tags: HashMap<String, String>,
    /// Extra dataset metadata.
    pub metadata: HashMap<String, Value>,
    /// Best-effort number of records per bulk call.
    pub chunk_size: usize,
    /// Optional per-chunk progress observer.
    pub progress: Option<Arc<dyn ProgressObserver>>,
}

impl LogRequest {
    pub fn new(dataset: DatasetName, records: Vec<Record>) -> Self {
        Self {
            dataset,
            records,
            tags: HashMap::new(),
            metadata: HashMap::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: None,
        }
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
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

impl Debug for LogRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogRequest")
            .field("dataset", &self.dataset)
            .field("num_records", &self.records.len())
            .field("tags", &self.tags)
            .field("metadata", &self.metadata)
            .field("chunk_size", &self.chunk_size)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
