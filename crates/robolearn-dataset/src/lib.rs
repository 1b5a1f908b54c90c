//! # robolearn-dataset
//!
//! Loads robot learning sessions exported by the data collection system and
//! converts them for analysis and training.
//!
//! ## Layout on disk
//!
//! ```text
//! <data_dir>/exports/<session_id>_huggingface.json
//! <data_dir>/exports/dataset_manifest.json
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use robolearn_dataset::{Dataset, DEFAULT_TEST_SIZE};
//!
//! let dataset = Dataset::from_manifest("../data")?;
//! println!("{:?}", dataset.statistics());
//!
//! let table = dataset.filter_by_sender("robot").to_table()?;
//! let split = dataset.split_train_test(DEFAULT_TEST_SIZE, Some(42))?;
//! ```

pub mod dataset;
pub mod error;
pub mod parser;
pub mod records;
pub mod split;
pub mod table;
pub mod types;

pub use dataset::{Dataset, DEFAULT_DATA_DIR, EXPORTS_DIR_NAME, MANIFEST_FILE_NAME};
pub use error::{DatasetError, Result};
pub use parser::{parse_manifest, parse_session_export, parse_timestamp};
pub use records::{MessageRecord, StreamRecord, StreamRecords};
pub use split::{partition_sizes, TrainTestSplit, DEFAULT_TEST_SIZE};
pub use table::{Row, Table, FIXED_COLUMNS, LABEL_COLUMN_PREFIX};
pub use types::{
    DatasetStats, FrameId, Identifier, Label, Manifest, ManifestEntry, Message, MessageId, Session,
    SessionExport,
};
