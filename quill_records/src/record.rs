//! The user-facing record model.
//!
//! A [`Record`] is one annotatable unit of data, tagged by the task it
//! belongs to. The task tag determines the wire payload shape used when
//! uploading to the server; everything else a variant carries is opaque to
//! the upload path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The annotation task a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    TextClassification,
    TokenClassification,
    Text2Text,
}

impl TaskType {
    /// The path segment used by the bulk endpoint for this task.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::TextClassification => "TextClassification",
            TaskType::TokenClassification => "TokenClassification",
            TaskType::Text2Text => "Text2Text",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier assigned to a record by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Str(id.to_string())
    }
}

/// A label together with its prediction score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A labeled span over the record text, in character offsets.
///
/// The end offset is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl EntitySpan {
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// A record for a text classification task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextClassificationRecord {
    /// The input fields shown to the annotator.
    pub inputs: HashMap<String, String>,
    /// Model predictions as labels with scores.
    pub prediction: Vec<LabelScore>,
    /// Gold labels.
    pub annotation: Vec<String>,
    /// Whether more than one label can apply at once.
    pub multi_label: bool,
    pub id: Option<RecordId>,
    pub metadata: HashMap<String, Value>,
}

impl TextClassificationRecord {
    /// Create a record with a single `text` input field.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut inputs = HashMap::new();
        inputs.insert("text".to_string(), text.into());
        Self {
            inputs,
            ..Default::default()
        }
    }
}

/// A record for a token classification task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClassificationRecord {
    pub text: String,
    pub tokens: Vec<String>,
    /// Predicted entity spans.
    pub prediction: Vec<EntitySpan>,
    /// Annotated entity spans.
    pub annotation: Vec<EntitySpan>,
    pub id: Option<RecordId>,
    pub metadata: HashMap<String, Value>,
}

/// A record for a text-to-text task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text2TextRecord {
    pub text: String,
    /// Predicted output texts, most confident first.
    pub prediction: Vec<String>,
    /// The annotated output text.
    pub annotation: Option<String>,
    pub id: Option<RecordId>,
    pub metadata: HashMap<String, Value>,
}

/// One annotatable unit of data, tagged by task.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    TextClassification(TextClassificationRecord),
    TokenClassification(TokenClassificationRecord),
    Text2Text(Text2TextRecord),
}

impl Record {
    /// The task this record belongs to.
    pub fn task(&self) -> TaskType {
        match self {
            Record::TextClassification(_) => TaskType::TextClassification,
            Record::TokenClassification(_) => TaskType::TokenClassification,
            Record::Text2Text(_) => TaskType::Text2Text,
        }
    }
}

impl From<TextClassificationRecord> for Record {
    fn from(record: TextClassificationRecord) -> Self {
        Record::TextClassification(record)
    }
}

impl From<TokenClassificationRecord> for Record {
    fn from(record: TokenClassificationRecord) -> Self {
        Record::TokenClassification(record)
    }
}

impl From<Text2TextRecord> for Record {
    fn from(record: Text2TextRecord) -> Self {
        Record::Text2Text(record)
    }
}
