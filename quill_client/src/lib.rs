//! Top-level client for logging annotation records.
//!
//! The usual entry point is [`QuillClient`], which exposes the same upload
//! through three shapes: a blocking [`QuillClient::log`], a fire-and-forget
//! [`QuillClient::log_background`], and an awaitable
//! [`QuillClient::log_async`] for callers already inside an async context.

pub mod client;
pub mod config;
pub mod default;
pub mod error;

pub use client::{LogOptions, QuillClient};
pub use config::QuillConfig;
pub use default::{active_client, init};
pub use error::{ClientError, Result};

pub use quill_ingestor::{LogHandle, ProgressObserver};
pub use quill_records::{
    BulkResponse, DatasetName, Record, Text2TextRecord, TextClassificationRecord,
    TokenClassificationRecord,
};
