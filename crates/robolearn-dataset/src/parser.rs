use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{DatasetError, Result};
use crate::types::{Manifest, SessionExport};

/// Parse a `<session_id>_huggingface.json` export.
pub fn parse_session_export(path: &Path) -> Result<SessionExport> {
    read_json(path)
}

/// Parse a `dataset_manifest.json` file.
pub fn parse_manifest(path: &Path) -> Result<Manifest> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Offset-carrying ISO-8601 forms beyond RFC 3339 (compact `+hhmm`, basic format).
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%.f%z",
];

/// Naive ISO-8601 forms, taken as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y%m%dT%H%M%S%.f",
];

/// Parse an ISO-8601 timestamp into UTC.
///
/// Offsets are honoured; naive values (no offset) are taken as UTC, and a bare
/// date is taken as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    // Basic format with a `Z` designator, e.g. `20260120T100000Z`.
    let naive_value = value.strip_suffix('Z').unwrap_or(value);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_value, fmt) {
            return Some(naive.and_utc());
        }
    }

    // Hour precision, e.g. `2026-01-20T10`.
    if naive_value.len() == 13 {
        let padded = format!("{}:00", naive_value);
        if let Ok(naive) = NaiveDateTime::parse_from_str(&padded, "%Y-%m-%dT%H:%M") {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive_value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(naive_value, "%Y%m%d"))
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
