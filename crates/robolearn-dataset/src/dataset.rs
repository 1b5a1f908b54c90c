use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::{parse_manifest, parse_session_export};
use crate::types::{DatasetStats, Message, Session};

/// Data directory used when none is given.
pub const DEFAULT_DATA_DIR: &str = "../data";
/// Subdirectory of the data directory holding the exporter's output.
pub const EXPORTS_DIR_NAME: &str = "exports";
/// Manifest file name inside the exports directory.
pub const MANIFEST_FILE_NAME: &str = "dataset_manifest.json";

/// In-memory collection of exported sessions.
///
/// Sessions are only added through [`Dataset::load_session`] and
/// [`Dataset::load_from_manifest`]. Filters return new, independently owned
/// datasets and never touch `self`.
#[derive(Debug, Clone)]
pub struct Dataset {
    data_dir: PathBuf,
    exports_dir: PathBuf,
    sessions: Vec<Session>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl Dataset {
    /// Create an empty dataset rooted at `data_dir`. No I/O is performed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let exports_dir = data_dir.join(EXPORTS_DIR_NAME);
        Self {
            data_dir,
            exports_dir,
            sessions: Vec::new(),
        }
    }

    /// Create a dataset holding a single session.
    pub fn from_session(session_id: &str, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut dataset = Self::new(data_dir);
        dataset.load_session(session_id)?;
        Ok(dataset)
    }

    /// Create a dataset holding every session the manifest lists and the exports contain.
    pub fn from_manifest(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut dataset = Self::new(data_dir);
        dataset.load_from_manifest()?;
        Ok(dataset)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn exports_dir(&self) -> &Path {
        &self.exports_dir
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Total number of messages across all sessions.
    pub fn message_count(&self) -> usize {
        self.sessions.iter().map(|s| s.data.len()).sum()
    }

    /// Path of the export file for `session_id`.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        self.exports_dir
            .join(format!("{}_huggingface.json", session_id))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.exports_dir.join(MANIFEST_FILE_NAME)
    }

    /// Load one session export and append it.
    ///
    /// Loading the same ID twice appends a second entry.
    pub fn load_session(&mut self, session_id: &str) -> Result<()> {
        let path = self.session_path(session_id);
        let export = parse_session_export(&path)?;

        tracing::debug!(
            session_id,
            messages = export.data.len(),
            "Loaded session export"
        );

        self.sessions.push(Session {
            session_id: session_id.to_string(),
            data: export.data,
            info: export.info,
        });
        Ok(())
    }

    /// Load every session listed in the manifest, in manifest order.
    ///
    /// Entries whose export file is missing are skipped with a warning and
    /// returned. A missing manifest or a malformed export is an error.
    pub fn load_from_manifest(&mut self) -> Result<Vec<String>> {
        let manifest = parse_manifest(&self.manifest_path())?;
        let mut skipped = Vec::new();

        for entry in &manifest.sessions {
            match self.load_session(&entry.session_id) {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {
                    tracing::warn!("Could not load session {}: {}", entry.session_id, e);
                    skipped.push(entry.session_id.clone());
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            listed = manifest.sessions.len(),
            loaded = manifest.sessions.len() - skipped.len(),
            skipped = skipped.len(),
            "Loaded dataset manifest"
        );

        Ok(skipped)
    }

    /// Compute aggregate statistics over the loaded sessions.
    pub fn statistics(&self) -> DatasetStats {
        let total_sessions = self.sessions.len();
        let total_messages = self.message_count();

        let mut messages_by_sender: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_labels = 0;
        for message in self.messages() {
            *messages_by_sender.entry(message.sender.clone()).or_insert(0) += 1;
            total_labels += message.labels.len();
        }

        let avg_messages_per_session = if total_sessions == 0 {
            0.0
        } else {
            total_messages as f64 / total_sessions as f64
        };
        let avg_labels_per_message = if total_messages == 0 {
            0.0
        } else {
            total_labels as f64 / total_messages as f64
        };

        DatasetStats {
            total_sessions,
            total_messages,
            total_labels,
            messages_by_sender,
            avg_messages_per_session,
            avg_labels_per_message,
        }
    }

    /// Keep only messages sent by `sender`.
    pub fn filter_by_sender(&self, sender: &str) -> Dataset {
        self.filter_messages(|m| m.sender == sender)
    }

    /// Keep only labelled messages, optionally only those carrying `label_type`.
    pub fn filter_by_labels(&self, label_type: Option<&str>) -> Dataset {
        match label_type {
            Some(t) => self.filter_messages(|m| m.has_label_type(t)),
            None => self.filter_messages(|m| !m.labels.is_empty()),
        }
    }

    /// Iterate `(session_id, message)` pairs in session order, then message order.
    pub(crate) fn session_messages(&self) -> impl Iterator<Item = (&str, &Message)> + '_ {
        self.sessions
            .iter()
            .flat_map(|s| s.data.iter().map(move |m| (s.session_id.as_str(), m)))
    }

    fn messages(&self) -> impl Iterator<Item = &Message> + '_ {
        self.sessions.iter().flat_map(|s| s.data.iter())
    }

    fn filter_messages<F>(&self, keep: F) -> Dataset
    where
        F: Fn(&Message) -> bool,
    {
        let sessions = self
            .sessions
            .iter()
            .filter_map(|session| {
                let data: Vec<Message> =
                    session.data.iter().filter(|m| keep(m)).cloned().collect();
                if data.is_empty() {
                    return None;
                }
                Some(Session {
                    session_id: session.session_id.clone(),
                    data,
                    info: session.info.clone(),
                })
            })
            .collect();

        Dataset {
            data_dir: self.data_dir.clone(),
            exports_dir: self.exports_dir.clone(),
            sessions,
        }
    }
}
