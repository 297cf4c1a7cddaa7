#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use quill_client::QuillClient;
use quill_records::{DatasetName, Record, TaskBulkPayload, TextClassificationRecord, UploadOutcome};
use quill_transport::{BulkUploadClient, TransportError};
use reqwest::StatusCode;

/// Transport double counting bulk calls.
pub struct CountingTransport {
    num_calls: AtomicUsize,
    datasets: Mutex<Vec<String>>,
    fail_on_call: Option<usize>,
}

impl CountingTransport {
    pub fn new() -> Self {
        Self {
            num_calls: AtomicUsize::new(0),
            datasets: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    pub fn fail_on_call(mut self, index: usize) -> Self {
        self.fail_on_call = Some(index);
        self
    }

    pub fn num_calls(&self) -> usize {
        self.num_calls.load(Ordering::SeqCst)
    }

    pub fn datasets(&self) -> Vec<String> {
        self.datasets.lock().expect("datasets lock").clone()
    }
}

#[async_trait]
impl BulkUploadClient for CountingTransport {
    async fn bulk_upload(
        &self,
        dataset: &DatasetName,
        payload: TaskBulkPayload,
    ) -> Result<UploadOutcome, TransportError> {
        let call_index = self.num_calls.fetch_add(1, Ordering::SeqCst);
        self.datasets
            .lock()
            .expect("datasets lock")
            .push(dataset.to_string());

        if self.fail_on_call == Some(call_index) {
            return Err(TransportError::Response {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "bulk upload failed".to_string(),
            });
        }

        Ok(UploadOutcome {
            processed: payload.num_records(),
            failed: 0,
        })
    }
}

pub fn text_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| TextClassificationRecord::from_text(format!("example {i}")).into())
        .collect()
}

pub fn test_client(transport: Arc<CountingTransport>) -> QuillClient {
    quill_observability::init_logging();
    QuillClient::with_transport(transport).expect("create client")
}
