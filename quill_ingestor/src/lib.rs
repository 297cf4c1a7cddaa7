pub mod background;
pub mod error;
pub mod handle;
pub mod ingestor;
pub mod progress;
pub mod request;
pub mod uploader;

pub use background::BackgroundIngestor;
pub use error::{LogError, Result};
pub use handle::LogHandle;
pub use ingestor::{LogIngestor, LogIngestorClient, run_background_ingestor};
pub use progress::ProgressObserver;
pub use request::LogRequest;
pub use uploader::{BulkUploader, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
