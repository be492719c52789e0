//! # Persistence Adapter
//!
//! Binds a [`SnapshotStore`] to the fixed progress key and translates between
//! stored text and [`ProgressState`].
//!
//! Availability wins over integrity here:
//! - `load` never fails. Absent, unreadable, oversize or malformed data all
//!   mean "no prior state".
//! - `save` reports failure as `PersistenceWriteFailure`; the controller logs
//!   it and keeps the in-memory state authoritative.

use crate::formats::{Snapshot, snapshot_from_json, snapshot_to_json};
use crate::primitives::STORAGE_KEY;
use crate::storage::SnapshotStore;
use crate::{GateError, ProgressState};

/// A store plus the key the snapshot lives under.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    key: String,
}

impl<S: SnapshotStore> Persistence<S> {
    /// Use `store` with the default key.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Use `store` with a custom key.
    #[must_use]
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the snapshot is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the full snapshot of `state`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::PersistenceWriteFailure` if encoding or the store
    /// write fails. The state itself is untouched either way.
    pub fn save(&mut self, state: &ProgressState) -> Result<(), GateError> {
        let json = snapshot_to_json(&state.snapshot())
            .map_err(|e| GateError::PersistenceWriteFailure(e.to_string()))?;
        self.store
            .write(&self.key, &json)
            .map_err(|e| GateError::PersistenceWriteFailure(e.to_string()))
    }

    /// Read the stored snapshot, if there is a usable one.
    ///
    /// Every failure is logged and collapsed into `None`.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored progress, starting fresh");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read stored progress");
                return None;
            }
        };

        match snapshot_from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring stored progress");
                None
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::{CodeRegistry, Step};

    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, GateError> {
            Err(GateError::IoError("storage disabled".to_string()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), GateError> {
            Err(GateError::IoError("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), GateError> {
            Err(GateError::IoError("storage disabled".to_string()))
        }
    }

    #[test]
    fn save_writes_under_fixed_key() {
        let registry = CodeRegistry::builtin();
        let mut persistence = Persistence::new(MemoryStore::new());

        persistence
            .save(&ProgressState::new(&registry))
            .expect("save");

        let raw = persistence
            .store()
            .read(STORAGE_KEY)
            .expect("read")
            .expect("present");
        assert!(raw.starts_with("{\"unlocked\":{\"1\":false"));
    }

    #[test]
    fn load_absent_is_none() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn load_corrupt_is_none() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "not json at all");
        let persistence = Persistence::new(store);
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn load_ignores_other_keys() {
        let store = MemoryStore::with_entry("someone-else", r#"{"unlocked":{"1":true}}"#);
        let persistence = Persistence::new(store);
        assert_eq!(persistence.load(), None);
    }

    #[test]
    fn custom_key_round_trip() {
        let registry = CodeRegistry::builtin();
        let mut persistence = Persistence::with_key(MemoryStore::new(), "custom");
        let state = ProgressState::from_persisted(
            &registry,
            Some(Snapshot {
                unlocked: [("1".to_string(), true)].into_iter().collect(),
                attempts: [("1".to_string(), 2)].into_iter().collect(),
            }),
        );

        persistence.save(&state).expect("save");
        let restored = ProgressState::from_persisted(&registry, persistence.load());

        assert_eq!(persistence.key(), "custom");
        assert_eq!(restored, state);
        assert!(restored.is_step_unlocked(Step(1)));
    }

    #[test]
    fn broken_store_fails_soft() {
        let registry = CodeRegistry::builtin();
        let mut persistence = Persistence::new(BrokenStore);

        assert_eq!(persistence.load(), None);
        let result = persistence.save(&ProgressState::new(&registry));
        assert!(matches!(result, Err(GateError::PersistenceWriteFailure(_))));
    }
}
