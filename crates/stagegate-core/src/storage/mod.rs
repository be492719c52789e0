//! # Storage Module
//!
//! Durable key-value slots for progress snapshots.
//!
//! The CORE only needs one operation pair: read a string under a key, write a
//! string under a key. [`SnapshotStore`] is that seam. Backends:
//! - [`MemoryStore`]: in-process map (tests, throwaway sessions)
//! - [`FileStore`]: one JSON file per key in a directory
//! - [`RedbStore`]: a redb database with a single key-value table (ACID)

mod file_store;
mod redb_store;

pub use file_store::FileStore;
pub use redb_store::RedbStore;

use crate::GateError;
use std::collections::BTreeMap;

/// Whether `key` can name a slot in every backend.
///
/// Keys become file names in [`FileStore`], so they are limited to ASCII
/// letters, digits, `-`, `_` and `.`, and may not start with a dot.
#[must_use]
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// A durable key-value slot.
///
/// Implementations report failures as `GateError::IoError`; callers decide
/// whether a failure is fatal. The progress adapter never treats it so.
pub trait SnapshotStore {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, GateError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), GateError>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), GateError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, GateError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GateError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), GateError> {
        (**self).remove(key)
    }
}

/// In-memory key-value store.
///
/// Volatile: contents die with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one pre-populated slot.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = BTreeMap::new();
        slots.insert(key.into(), value.into());
        Self { slots }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, GateError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GateError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), GateError> {
        self.slots.remove(key);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
