//! Per-message records for ML training pipelines.
//!
//! Two shapes are offered: a lazy, single-pass stream of compact records
//! (`stream` feature) and a materialised list keeping the raw labels
//! (`records` feature). Calling either with its feature disabled returns
//! [`DatasetError::MissingDependency`].

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use crate::types::{FrameId, Label, Message, MessageId, Session};

/// Compact record yielded by [`Dataset::stream_records`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamRecord {
    pub command: String,
    pub sender: String,
    pub timestamp: String,
    /// Empty when the message has no frame.
    pub video_frame_id: String,
    pub label_count: usize,
}

impl From<&Message> for StreamRecord {
    fn from(message: &Message) -> Self {
        Self {
            command: message.command.clone(),
            sender: message.sender.clone(),
            timestamp: message.timestamp.clone(),
            video_frame_id: message
                .video_frame_id
                .as_ref()
                .map(FrameId::to_string)
                .unwrap_or_default(),
            label_count: message.labels.len(),
        }
    }
}

/// Full record returned by [`Dataset::to_records`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub session_id: String,
    pub id: MessageId,
    pub command: String,
    pub sender: String,
    pub timestamp: String,
    pub video_frame_id: Option<FrameId>,
    pub labels: Vec<Label>,
}

impl MessageRecord {
    fn new(session_id: &str, message: &Message) -> Self {
        Self {
            session_id: session_id.to_string(),
            id: message.id.clone(),
            command: message.command.clone(),
            sender: message.sender.clone(),
            timestamp: message.timestamp.clone(),
            video_frame_id: message.video_frame_id.clone(),
            labels: message.labels.clone(),
        }
    }
}

/// Lazy iterator over every message of a dataset.
#[derive(Debug, Clone)]
pub struct StreamRecords<'a> {
    sessions: &'a [Session],
    session: usize,
    message: usize,
}

impl<'a> Iterator for StreamRecords<'a> {
    type Item = StreamRecord;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(session) = self.sessions.get(self.session) {
            if let Some(message) = session.data.get(self.message) {
                self.message += 1;
                return Some(StreamRecord::from(message));
            }
            self.session += 1;
            self.message = 0;
        }
        None
    }
}

impl Dataset {
    /// Stream one [`StreamRecord`] per message. Each call starts a fresh pass.
    pub fn stream_records(&self) -> Result<StreamRecords<'_>> {
        if !cfg!(feature = "stream") {
            return Err(DatasetError::MissingDependency {
                feature: "stream",
                operation: "stream_records",
            });
        }

        Ok(StreamRecords {
            sessions: self.sessions(),
            session: 0,
            message: 0,
        })
    }

    /// Materialise one [`MessageRecord`] per message.
    pub fn to_records(&self) -> Result<Vec<MessageRecord>> {
        if !cfg!(feature = "records") {
            return Err(DatasetError::MissingDependency {
                feature: "records",
                operation: "to_records",
            });
        }

        Ok(self
            .session_messages()
            .map(|(session_id, message)| MessageRecord::new(session_id, message))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn message(id: &str, frame: Option<&str>, labels: usize) -> Message {
        Message {
            id: MessageId::from(id),
            command: format!("cmd {}", id),
            sender: "robot".to_string(),
            timestamp: "2026-01-20T10:00:00Z".to_string(),
            video_frame_id: frame.map(FrameId::from),
            labels: (0..labels)
                .map(|i| Label {
                    label_type: format!("t{}", i),
                    label_data: json!(i),
                })
                .collect(),
        }
    }

    #[test]
    fn test_stream_record_from_message() {
        let record = StreamRecord::from(&message("a", None, 2));
        assert_eq!(record.video_frame_id, "");
        assert_eq!(record.label_count, 2);

        let record = StreamRecord::from(&message("b", Some("f1"), 0));
        assert_eq!(record.video_frame_id, "f1");

        let mut numeric = message("c", None, 0);
        numeric.video_frame_id = Some(FrameId::Int(17));
        assert_eq!(StreamRecord::from(&numeric).video_frame_id, "17");
    }

    #[test]
    fn test_stream_records_skips_empty_sessions() {
        let sessions = vec![
            Session {
                session_id: "empty".to_string(),
                data: Vec::new(),
                info: Map::new(),
            },
            Session {
                session_id: "one".to_string(),
                data: vec![message("a", None, 0)],
                info: Map::new(),
            },
        ];
        let stream = StreamRecords {
            sessions: &sessions,
            session: 0,
            message: 0,
        };
        assert_eq!(stream.count(), 1);
    }

    #[cfg(not(feature = "stream"))]
    #[test]
    fn test_stream_without_feature_is_missing_dependency() {
        let err = Dataset::new("unused").stream_records().unwrap_err();
        assert!(matches!(err, DatasetError::MissingDependency { feature: "stream", .. }));
    }

    #[cfg(not(feature = "records"))]
    #[test]
    fn test_records_without_feature_is_missing_dependency() {
        let err = Dataset::new("unused").to_records().unwrap_err();
        assert!(matches!(err, DatasetError::MissingDependency { feature: "records", .. }));
    }
}
