//! File-backed load/save for the encoded collection.
//!
//! # Responsibility
//! - Read the collection document from the configured path.
//! - Replace the document atomically on every save.
//!
//! # Invariants
//! - A missing file is reported as `Ok(None)`, not as an error.
//! - Saves write a sibling temp file and rename it over the target.

use super::codec::{decode, encode};
use super::{StorageError, StorageResult};
use crate::model::todo::TodoItem;
use log::{error, info};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Loads the collection stored at `path`.
///
/// Returns `Ok(None)` when no file exists yet.
///
/// # Side effects
/// - Emits `storage_load` logging events with duration and status.
pub fn load_items(path: impl AsRef<Path>) -> StorageResult<Option<Vec<TodoItem>>> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=storage_load module=storage status=start");

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=storage_load module=storage status=missing duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(None);
        }
        Err(err) => {
            let err = StorageError::io(path, err);
            log_failure("storage_load", started_at, &err);
            return Err(err);
        }
    };

    match decode(&bytes) {
        Ok(items) => {
            info!(
                "event=storage_load module=storage status=ok duration_ms={} count={}",
                started_at.elapsed().as_millis(),
                items.len()
            );
            Ok(Some(items))
        }
        Err(err) => {
            log_failure("storage_load", started_at, &err);
            Err(err)
        }
    }
}

/// Encodes `items` and atomically replaces the file at `path`.
///
/// Creates the parent directory when missing.
///
/// # Side effects
/// - Emits `storage_save` logging events with duration and status.
pub fn save_items(path: impl AsRef<Path>, items: &[TodoItem]) -> StorageResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=storage_save module=storage status=start count={}",
        items.len()
    );

    match write_atomically(path, items) {
        Ok(()) => {
            info!(
                "event=storage_save module=storage status=ok duration_ms={} count={}",
                started_at.elapsed().as_millis(),
                items.len()
            );
            Ok(())
        }
        Err(err) => {
            log_failure("storage_save", started_at, &err);
            Err(err)
        }
    }
}

fn write_atomically(path: &Path, items: &[TodoItem]) -> StorageResult<()> {
    let bytes = encode(items)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, &bytes).map_err(|err| StorageError::io(&temp_path, err))?;
    if let Err(err) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::io(path, err));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("todos"));
    file_name.push(".tmp");
    path.with_file_name(file_name)
}

fn log_failure(event: &str, started_at: Instant, err: &StorageError) {
    error!(
        "event={} module=storage status=error duration_ms={} error_code={} error={}",
        event,
        started_at.elapsed().as_millis(),
        err.code(),
        err
    );
}

#[cfg(test)]
mod tests {
    use super::temp_path_for;
    use std::path::Path;

    #[test]
    fn temp_path_is_a_sibling_of_the_target() {
        let temp = temp_path_for(Path::new("/data/app/todos.json"));
        assert_eq!(temp, Path::new("/data/app/todos.json.tmp"));
    }
}
