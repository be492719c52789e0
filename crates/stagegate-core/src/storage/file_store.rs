//! # File-backed Store
//!
//! Each key is a file `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so a crash mid-write leaves either the
//! old snapshot or the new one, never half of each.

use super::{SnapshotStore, is_valid_storage_key};
use crate::GateError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of JSON files, one per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, GateError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            GateError::IoError(format!("Cannot create store '{}': {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, GateError> {
        // Keys become file names; refuse anything that could escape the directory.
        if !is_valid_storage_key(key) {
            return Err(GateError::IoError(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, GateError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GateError::IoError(format!(
                "Cannot read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GateError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| {
            GateError::IoError(format!("Cannot write '{}': {}", tmp.display(), e))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            GateError::IoError(format!("Cannot replace '{}': {}", path.display(), e))
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), GateError> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GateError::IoError(format!(
                "Cannot remove '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
