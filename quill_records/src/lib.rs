pub mod bulk;
pub mod name;
pub mod record;

pub use bulk::{BulkResponse, DispatchError, TaskBulkPayload, UploadOutcome};
pub use name::{DatasetName, DatasetNameError};
pub use record::{
    EntitySpan, LabelScore, Record, RecordId, TaskType, Text2TextRecord, TextClassificationRecord,
    TokenClassificationRecord,
};
