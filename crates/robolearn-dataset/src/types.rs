use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier as written by the exporter (either a string or an integer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Int(i64),
    Text(String),
}

/// Message identifier, unique within its session.
pub type MessageId = Identifier;
/// Reference to an associated media frame.
pub type FrameId = Identifier;

impl Identifier {
    pub fn to_value(&self) -> Value {
        match self {
            Identifier::Int(n) => Value::from(*n),
            Identifier::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Int(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Int(n)
    }
}

/// Typed annotation attached to a message. `label_data` is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub label_type: String,
    pub label_data: Value,
}

/// One interaction event within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub command: String,
    pub sender: String,
    /// ISO-8601 text, kept as written on disk.
    pub timestamp: String,
    #[serde(default)]
    pub video_frame_id: Option<FrameId>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Message {
    pub fn has_label_type(&self, label_type: &str) -> bool {
        self.labels.iter().any(|l| l.label_type == label_type)
    }
}

/// A loaded session: its messages in on-disk order plus opaque metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub data: Vec<Message>,
    pub info: Map<String, Value>,
}

/// On-disk shape of `<session_id>_huggingface.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionExport {
    pub data: Vec<Message>,
    pub info: Map<String, Value>,
}

/// On-disk shape of `dataset_manifest.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub sessions: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub session_id: String,
    /// Remaining exporter fields, not interpreted.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_sessions: usize,
    pub total_messages: usize,
    pub total_labels: usize,
    pub messages_by_sender: BTreeMap<String, usize>,
    pub avg_messages_per_session: f64,
    pub avg_labels_per_message: f64,
}
