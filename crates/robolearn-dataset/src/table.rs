use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::dataset::Dataset;
use crate::error::{DatasetError, Result};
use crate::parser::parse_timestamp;
use crate::types::{FrameId, MessageId};

/// Columns present on every row, in output order.
pub const FIXED_COLUMNS: [&str; 7] = [
    "session_id",
    "message_id",
    "command",
    "sender",
    "timestamp",
    "video_frame_id",
    "label_count",
];

/// Prefix of the data-driven label columns.
pub const LABEL_COLUMN_PREFIX: &str = "label_";

/// One flattened message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub session_id: String,
    pub message_id: MessageId,
    pub command: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
    pub video_frame_id: Option<FrameId>,
    pub label_count: usize,
    /// `label_<type>` -> `label_data`, only for types this message carries.
    #[serde(flatten)]
    pub labels: BTreeMap<String, Value>,
}

impl Row {
    /// Value of `column` for this row; `Null` when the row has no such cell.
    pub fn cell(&self, column: &str) -> Value {
        match column {
            "session_id" => Value::from(self.session_id.as_str()),
            "message_id" => self.message_id.to_value(),
            "command" => Value::from(self.command.as_str()),
            "sender" => Value::from(self.sender.as_str()),
            "timestamp" => Value::from(self.timestamp.to_rfc3339()),
            "video_frame_id" => self
                .video_frame_id
                .as_ref()
                .map(FrameId::to_value)
                .unwrap_or(Value::Null),
            "label_count" => Value::from(self.label_count),
            other => self.labels.get(other).cloned().unwrap_or(Value::Null),
        }
    }

    /// `label_data` for `label_type`, if this row carries it.
    pub fn label(&self, label_type: &str) -> Option<&Value> {
        self.labels
            .get(&format!("{}{}", LABEL_COLUMN_PREFIX, label_type))
    }
}

/// Tabular projection: one row per message, with a column set that grows
/// with every label type observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table that keeps `columns` as its schema, e.g. a partition of a larger table.
    pub(crate) fn with_columns(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Label columns only, in first-seen order.
    pub fn label_columns(&self) -> &[String] {
        &self.columns[FIXED_COLUMNS.len()..]
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows, same schema.
    pub fn head(&self, n: usize) -> Table {
        Table::with_columns(
            self.columns.clone(),
            self.rows.iter().take(n).cloned().collect(),
        )
    }

    /// All values of `column`, one per row.
    pub fn column(&self, column: &str) -> Option<Vec<Value>> {
        if !self.columns.iter().any(|c| c == column) {
            return None;
        }
        Some(self.rows.iter().map(|r| r.cell(column)).collect())
    }
}

impl Dataset {
    /// Flatten every message into a [`Row`].
    pub fn to_table(&self) -> Result<Table> {
        let mut rows = Vec::with_capacity(self.message_count());
        let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();

        for (session_id, message) in self.session_messages() {
            let timestamp = parse_timestamp(&message.timestamp).ok_or_else(|| {
                DatasetError::InvalidTimestamp {
                    session_id: session_id.to_string(),
                    message_id: message.id.to_string(),
                    value: message.timestamp.clone(),
                }
            })?;

            let mut labels = BTreeMap::new();
            for label in &message.labels {
                let column = format!("{}{}", LABEL_COLUMN_PREFIX, label.label_type);
                if FIXED_COLUMNS.contains(&column.as_str()) {
                    tracing::warn!(
                        session_id,
                        %column,
                        "Label type collides with a fixed column, not projected"
                    );
                    continue;
                }
                if !columns.contains(&column) {
                    columns.push(column.clone());
                }
                labels.insert(column, label.label_data.clone());
            }

            rows.push(Row {
                session_id: session_id.to_string(),
                message_id: message.id.clone(),
                command: message.command.clone(),
                sender: message.sender.clone(),
                timestamp,
                video_frame_id: message.video_frame_id.clone(),
                label_count: message.labels.len(),
                labels,
            });
        }

        Ok(Table::with_columns(columns, rows))
    }
}
