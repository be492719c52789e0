//! # Snapshot Format
//!
//! JSON encoding of the `{unlocked, attempts}` pair.
//!
//! ```text
//! {
//!   "unlocked": { "1": true, "2": false, ... },
//!   "attempts": { "1": 3, "2": 0, ... }
//! }
//! ```
//!
//! Decoding is shape-strict and content-lenient:
//! - a missing `unlocked` or `attempts` section decodes as empty
//! - extra top-level keys are ignored
//! - step keys are kept as strings here; unknown ones are dropped at merge
//! - a wrong value type (a string flag, a negative counter) makes the whole
//!   snapshot corrupt
//!
//! Size is validated BEFORE parsing, see `MAX_SNAPSHOT_SIZE`.

use crate::GateError;
use crate::primitives::MAX_SNAPSHOT_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serialized progress: unlock flags and attempt counters keyed by step number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub unlocked: BTreeMap<String, bool>,
    #[serde(default)]
    pub attempts: BTreeMap<String, u64>,
}

/// Encode a snapshot as compact JSON.
///
/// This is a pure transformation - no storage I/O.
pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String, GateError> {
    serde_json::to_string(snapshot).map_err(|e| GateError::SerializationError(e.to_string()))
}

/// Decode a snapshot from JSON.
///
/// This is a pure transformation - no storage I/O.
///
/// # Errors
///
/// Returns `GateError::PersistenceReadCorrupt` if the payload is too large,
/// is not JSON, or does not have the snapshot shape.
pub fn snapshot_from_json(raw: &str) -> Result<Snapshot, GateError> {
    if raw.len() > MAX_SNAPSHOT_SIZE {
        return Err(GateError::PersistenceReadCorrupt(format!(
            "snapshot size {} bytes exceeds maximum allowed {} bytes",
            raw.len(),
            MAX_SNAPSHOT_SIZE
        )));
    }

    serde_json::from_str(raw).map_err(|e| GateError::PersistenceReadCorrupt(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
