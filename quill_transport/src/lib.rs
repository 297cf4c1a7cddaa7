pub mod client;
pub mod error;
pub mod http;

pub use client::BulkUploadClient;
pub use error::{Result, TransportError};
pub use http::HttpBulkClient;
