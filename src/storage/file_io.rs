//! JSON file helpers
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so a crash leaves either the old file or the new one.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TallyError;

/// Read JSON from `path`, or `T::default()` when the file does not exist
pub fn read_json<T, P>(path: P) -> Result<T, TallyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no data file yet, starting empty");
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_error("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

/// Write `data` as pretty JSON, replacing `path` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", path, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let result = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| storage_error("replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_synced<T: Serialize>(temp_path: &Path, data: &T) -> Result<(), TallyError> {
    let file = File::create(temp_path).map_err(|e| storage_error("create", temp_path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("serialize", temp_path, e))?;
    writer.flush().map_err(|e| storage_error("flush", temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("sync", temp_path, e))
}

fn storage_error(action: &str, path: &Path, e: impl Display) -> TallyError {
    TallyError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Error for a poisoned repository lock
pub(crate) fn lock_error(e: impl Display) -> TallyError {
    TallyError::Storage(format!("Failed to acquire lock: {}", e))
}
