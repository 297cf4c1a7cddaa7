use std::{sync::Arc, thread, time::Duration};

use common::{MockTransport, dataset, start_ingestor, text_records};
use quill_ingestor::{LogError, LogRequest};

mod common;

#[test]
fn test_blocking_submit_and_wait() {
    let transport = Arc::new(MockTransport::new());
    let ingestor = start_ingestor(transport.clone());

    let handle = ingestor
        .submit(LogRequest::new(dataset("example-dataset"), text_records(42)))
        .expect("submit");
    let response = handle.wait().expect("wait failed");

    assert_eq!(response.processed, 42);
    assert_eq!(response.failed, 0);
    assert_eq!(transport.num_calls(), 1);
    assert_eq!(transport.calls()[0].dataset, "example-dataset");
}

#[test]
fn test_concurrent_submissions_resolve_independently() {
    let transport = Arc::new(MockTransport::new());
    let ingestor = start_ingestor(transport.clone());

    let first = ingestor
        .submit(LogRequest::new(dataset("first-dataset"), text_records(10)))
        .expect("submit first");
    let second = ingestor
        .submit(LogRequest::new(dataset("second-dataset"), text_records(20)))
        .expect("submit second");

    let second_response = second.wait().expect("second wait failed");
    let first_response = first.wait().expect("first wait failed");

    assert_eq!(first_response.processed, 10);
    assert_eq!(second_response.processed, 20);
    assert_eq!(transport.num_calls(), 2);
}

#[test]
fn test_upload_error_is_delivered_through_handle() {
    let transport = Arc::new(MockTransport::new().fail_on_call(0));
    let ingestor = start_ingestor(transport.clone());

    let handle = ingestor
        .submit(LogRequest::new(dataset("example-dataset"), text_records(5)))
        .expect("submit");

    let result = handle.wait();
    assert!(matches!(result, Err(LogError::Transport { .. })));
}

#[test]
fn test_cancel_before_completion() {
    let transport = Arc::new(MockTransport::new().with_delay(Duration::from_millis(200)));
    let ingestor = start_ingestor(transport.clone());

    let request =
        LogRequest::new(dataset("example-dataset"), text_records(10)).with_chunk_size(2);
    let handle = ingestor.submit(request).expect("submit");

    handle.cancel();
    let result = handle.wait();

    // Cancellation surfaces as an error, it does not panic the caller, and
    // chunks already sent are not rolled back.
    assert!(matches!(result, Err(LogError::Cancelled)));
}

#[test]
fn test_cancel_after_completion_is_a_noop() {
    let transport = Arc::new(MockTransport::new());
    let ingestor = start_ingestor(transport.clone());

    let handle = ingestor
        .submit(LogRequest::new(dataset("example-dataset"), text_records(3)))
        .expect("submit");

    thread::sleep(Duration::from_millis(100));
    handle.cancel();

    let response = handle.wait().expect("wait failed");
    assert_eq!(response.processed, 3);
}

#[test]
fn test_submit_after_shutdown_fails() {
    let transport = Arc::new(MockTransport::new());
    let mut ingestor = start_ingestor(transport.clone());

    ingestor.shutdown();

    let result = ingestor.submit(LogRequest::new(dataset("example-dataset"), text_records(1)));
    assert!(matches!(result, Err(LogError::WorkerUnavailable)));
    assert_eq!(transport.num_calls(), 0);
}

#[tokio::test]
async fn test_handle_resolved_from_async_context() {
    let transport = Arc::new(MockTransport::new());
    let ingestor = start_ingestor(transport.clone());

    let handle = ingestor
        .submit(LogRequest::new(dataset("example-dataset"), text_records(7)))
        .expect("submit");

    let response = handle.resolve().await.expect("resolve failed");
    assert_eq!(response.processed, 7);
}
