//! Wire payloads for the bulk endpoint and the aggregated response.
//!
//! ## Data flow
//!
//! **Dispatch**: [`Record`] slice -> [`TaskBulkPayload`].
//!
//! **Transport**: [`TaskBulkPayload`] -> [`UploadOutcome`] (one per chunk).
//!
//! **Aggregation**: [`UploadOutcome`] sequence -> [`BulkResponse`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::Snafu;

use crate::{
    name::DatasetName,
    record::{
        EntitySpan, LabelScore, Record, RecordId, TaskType, Text2TextRecord,
        TextClassificationRecord, TokenClassificationRecord,
    },
};

/// Errors raised while dispatching records to a wire payload.
///
/// Dispatch is by exact record variant: these errors are raised before any
/// network activity takes place.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum DispatchError {
    #[snafu(display("empty record batch"))]
    EmptyBatch,
    #[snafu(display(
        "record {index} is a {found} record but the batch started with {expected}: \
         a batch must contain records of a single task"
    ))]
    TaskMismatch {
        index: usize,
        expected: TaskType,
        found: TaskType,
    },
}

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;

/// Resolve the single task of a batch from its first record.
pub fn batch_task(records: &[Record]) -> Result<TaskType> {
    let first = records.first().ok_or(DispatchError::EmptyBatch)?;
    Ok(first.task())
}

/// Check that every record in the batch matches the given task.
pub fn check_homogeneous(task: TaskType, records: &[Record]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if record.task() != task {
            return Err(DispatchError::TaskMismatch {
                index,
                expected: task,
                found: record.task(),
            });
        }
    }

    Ok(())
}

/// Wire shape for creating a text classification record.
#[derive(Debug, Clone, Serialize)]
pub struct CreationTextClassificationRecord {
    pub inputs: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Vec<LabelScore>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Vec<String>>,
    pub multi_label: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl From<&TextClassificationRecord> for CreationTextClassificationRecord {
    fn from(record: &TextClassificationRecord) -> Self {
        Self {
            inputs: record.inputs.clone(),
            prediction: non_empty(&record.prediction),
            annotation: non_empty(&record.annotation),
            multi_label: record.multi_label,
            id: record.id.clone(),
            metadata: record.metadata.clone(),
        }
    }
}

/// Wire shape for creating a token classification record.
#[derive(Debug, Clone, Serialize)]
pub struct CreationTokenClassificationRecord {
    pub text: String,
    pub tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Vec<EntitySpan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Vec<EntitySpan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl From<&TokenClassificationRecord> for CreationTokenClassificationRecord {
    fn from(record: &TokenClassificationRecord) -> Self {
        Self {
            text: record.text.clone(),
            tokens: record.tokens.clone(),
            prediction: non_empty(&record.prediction),
            annotation: non_empty(&record.annotation),
            id: record.id.clone(),
            metadata: record.metadata.clone(),
        }
    }
}

/// Wire shape for creating a text-to-text record.
#[derive(Debug, Clone, Serialize)]
pub struct CreationText2TextRecord {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl From<&Text2TextRecord> for CreationText2TextRecord {
    fn from(record: &Text2TextRecord) -> Self {
        Self {
            text: record.text.clone(),
            prediction: non_empty(&record.prediction),
            annotation: record.annotation.clone(),
            id: record.id.clone(),
            metadata: record.metadata.clone(),
        }
    }
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items.to_vec())
    }
}

/// Bulk data for one chunk of records of a single task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskBulkData<R> {
    pub tags: HashMap<String, String>,
    pub metadata: HashMap<String, Value>,
    pub records: Vec<R>,
}

/// The task-specific payload for one bulk upload call.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TaskBulkPayload {
    TextClassification(TaskBulkData<CreationTextClassificationRecord>),
    TokenClassification(TaskBulkData<CreationTokenClassificationRecord>),
    Text2Text(TaskBulkData<CreationText2TextRecord>),
}

impl TaskBulkPayload {
    /// Build the wire payload for a chunk of records.
    ///
    /// Every record must match `task`: a mismatching record fails with
    /// [`DispatchError::TaskMismatch`] before any network activity.
    pub fn from_records(
        task: TaskType,
        records: &[Record],
        tags: &HashMap<String, String>,
        metadata: &HashMap<String, Value>,
    ) -> Result<Self> {
        let payload = match task {
            TaskType::TextClassification => TaskBulkPayload::TextClassification(TaskBulkData {
                tags: tags.clone(),
                metadata: metadata.clone(),
                records: collect_records(task, records, |record| match record {
                    Record::TextClassification(inner) => Some(inner.into()),
                    _ => None,
                })?,
            }),
            TaskType::TokenClassification => TaskBulkPayload::TokenClassification(TaskBulkData {
                tags: tags.clone(),
                metadata: metadata.clone(),
                records: collect_records(task, records, |record| match record {
                    Record::TokenClassification(inner) => Some(inner.into()),
                    _ => None,
                })?,
            }),
            TaskType::Text2Text => TaskBulkPayload::Text2Text(TaskBulkData {
                tags: tags.clone(),
                metadata: metadata.clone(),
                records: collect_records(task, records, |record| match record {
                    Record::Text2Text(inner) => Some(inner.into()),
                    _ => None,
                })?,
            }),
        };

        Ok(payload)
    }

    /// The task this payload was built for.
    pub fn task(&self) -> TaskType {
        match self {
            TaskBulkPayload::TextClassification(_) => TaskType::TextClassification,
            TaskBulkPayload::TokenClassification(_) => TaskType::TokenClassification,
            TaskBulkPayload::Text2Text(_) => TaskType::Text2Text,
        }
    }

    /// The number of records carried by this payload.
    pub fn num_records(&self) -> usize {
        match self {
            TaskBulkPayload::TextClassification(data) => data.records.len(),
            TaskBulkPayload::TokenClassification(data) => data.records.len(),
            TaskBulkPayload::Text2Text(data) => data.records.len(),
        }
    }
}

fn collect_records<'a, T>(
    task: TaskType,
    records: &'a [Record],
    mut convert: impl FnMut(&'a Record) -> Option<T>,
) -> Result<Vec<T>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            convert(record).ok_or(DispatchError::TaskMismatch {
                index,
                expected: task,
                found: record.task(),
            })
        })
        .collect()
}

/// Outcome of one bulk upload call, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Number of records the server processed.
    pub processed: usize,
    /// Number of records the server failed to process.
    pub failed: usize,
}

/// Aggregated result of logging one batch of records.
///
/// Created fresh once all chunks of a batch have been uploaded; the
/// processed and failed counts are the sums over the per-chunk outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResponse {
    pub dataset: DatasetName,
    pub processed: usize,
    pub failed: usize,
}
