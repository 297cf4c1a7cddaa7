#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use quill_ingestor::BackgroundIngestor;
use quill_records::{
    DatasetName, Record, RecordId, TaskBulkPayload, TextClassificationRecord,
    TokenClassificationRecord, UploadOutcome,
};
use quill_transport::{BulkUploadClient, TransportError};
use reqwest::StatusCode;

/// One recorded bulk call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub dataset: String,
    pub task: String,
    pub num_records: usize,
    /// Id of the first record in the chunk, when records carry integer ids.
    pub first_id: Option<i64>,
    pub tags: serde_json::Value,
    pub metadata: serde_json::Value,
}

/// Transport double that records every bulk call.
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_on_call: Option<usize>,
    failed_per_call: usize,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            fail_on_call: None,
            failed_per_call: 0,
            delay: None,
        }
    }

    /// Fail the call with the given zero-based index with a transport error.
    pub fn fail_on_call(mut self, index: usize) -> Self {
        self.fail_on_call = Some(index);
        self
    }

    /// Report this many records as failed in every outcome.
    pub fn failed_per_call(mut self, failed: usize) -> Self {
        self.failed_per_call = failed;
        self
    }

    /// Sleep this long inside every call before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn num_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").len()
    }

    /// The highest number of calls ever observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BulkUploadClient for MockTransport {
    async fn bulk_upload(
        &self,
        dataset: &DatasetName,
        payload: TaskBulkPayload,
    ) -> Result<UploadOutcome, TransportError> {
        let concurrent = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(concurrent, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let num_records = payload.num_records();
        let value = serde_json::to_value(&payload).expect("serialize payload");
        let first_id = value["records"][0]["id"].as_i64();

        let call_index = {
            let mut calls = self.calls.lock().expect("calls lock");
            calls.push(RecordedCall {
                dataset: dataset.to_string(),
                task: payload.task().to_string(),
                num_records,
                first_id,
                tags: value["tags"].clone(),
                metadata: value["metadata"].clone(),
            });
            calls.len() - 1
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on_call == Some(call_index) {
            return Err(TransportError::Response {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "bulk upload failed".to_string(),
            });
        }

        let failed = self.failed_per_call.min(num_records);
        Ok(UploadOutcome {
            processed: num_records - failed,
            failed,
        })
    }
}

pub fn dataset(name: &str) -> DatasetName {
    DatasetName::new_unchecked(name)
}

/// Text classification records with ids 0..n.
pub fn text_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let mut record = TextClassificationRecord::from_text(format!("example {i}"));
            record.id = Some(RecordId::Int(i as i64));
            record.into()
        })
        .collect()
}

pub fn token_record() -> Record {
    TokenClassificationRecord::default().into()
}

pub fn start_ingestor(transport: Arc<MockTransport>) -> BackgroundIngestor {
    BackgroundIngestor::spawn(transport).expect("spawn background ingestor")
}
