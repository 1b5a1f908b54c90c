use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp {value:?} on message {message_id} of session {session_id}")]
    InvalidTimestamp {
        session_id: String,
        message_id: String,
        value: String,
    },

    #[error("{operation} requires the `{feature}` feature of robolearn-dataset")]
    MissingDependency {
        feature: &'static str,
        operation: &'static str,
    },

    #[error("Invalid split: {0}")]
    InvalidSplit(String),
}

impl DatasetError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatasetError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
