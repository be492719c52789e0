//! # redb-backed Store
//!
//! A disk-backed key-value store using the redb embedded database.
//!
//! Provides:
//! - ACID transactions (one per write)
//! - Crash safety (copy-on-write B-trees)
//! - Zero configuration

use super::SnapshotStore;
use crate::GateError;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;

/// Table for slots: key string -> value string
const SLOTS: TableDefinition<&str, &str> = TableDefinition::new("slots");

/// A disk-backed key-value store using redb.
pub struct RedbStore {
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let db = Database::create(path.as_ref()).map_err(|e| GateError::IoError(e.to_string()))?;

        // Create the table up front so reads never see a missing table.
        {
            let write_txn = db
                .begin_write()
                .map_err(|e| GateError::IoError(e.to_string()))?;
            let _ = write_txn
                .open_table(SLOTS)
                .map_err(|e| GateError::IoError(e.to_string()))?;
            write_txn
                .commit()
                .map_err(|e| GateError::IoError(e.to_string()))?;
        }

        Ok(Self { db })
    }
}

impl SnapshotStore for RedbStore {
    fn read(&self, key: &str) -> Result<Option<String>, GateError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| GateError::IoError(e.to_string()))?;
        let table = read_txn
            .open_table(SLOTS)
            .map_err(|e| GateError::IoError(e.to_string()))?;

        let value = table
            .get(key)
            .map_err(|e| GateError::IoError(e.to_string()))?
            .map(|v| v.value().to_string());
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), GateError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| GateError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(SLOTS)
                .map_err(|e| GateError::IoError(e.to_string()))?;
            table
                .insert(key, value)
                .map_err(|e| GateError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| GateError::IoError(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), GateError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| GateError::IoError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(SLOTS)
                .map_err(|e| GateError::IoError(e.to_string()))?;
            table
                .remove(key)
                .map_err(|e| GateError::IoError(e.to_string()))?;
        }
        write_txn
            .commit()
            .map_err(|e| GateError::IoError(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
