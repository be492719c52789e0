//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the stagegate CORE:
//! - Step identifiers (`Step`)
//! - Secret phrases (`Secret`)
//! - Error types (`GateError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` where they key a `BTreeMap`
//! - Use saturating arithmetic for step navigation

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitives::FIRST_STEP;

// =============================================================================
// STEP
// =============================================================================

/// Identifier of one stage in the ordered sequence of gated content.
///
/// Steps are totally ordered; the order defines the gating chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Step(pub u32);

impl Step {
    /// The step that is always reachable.
    pub const FIRST: Step = Step(FIRST_STEP);

    /// Create a step from its number.
    #[must_use]
    pub const fn new(n: u32) -> Self {
        Self(n)
    }

    /// Get the raw step number.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this is the first step of the chain.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.0 == FIRST_STEP
    }

    /// The immediate predecessor, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Step> {
        if self.0 <= FIRST_STEP {
            None
        } else {
            Some(Step(self.0 - 1))
        }
    }

    /// The immediate successor (saturating).
    #[must_use]
    pub const fn next(self) -> Step {
        Step(self.0.saturating_add(1))
    }

    /// Key used for this step in persisted snapshots.
    #[must_use]
    pub fn storage_key(self) -> String {
        self.0.to_string()
    }

    /// Parse a snapshot key back into a step.
    ///
    /// Only the canonical form written by [`Step::storage_key`] is accepted:
    /// `"+1"`, `"01"` or `" 1"` are not aliases for step 1.
    #[must_use]
    pub fn from_storage_key(key: &str) -> Option<Step> {
        let step = Step(key.parse::<u32>().ok()?);
        (step.storage_key() == key).then_some(step)
    }
}

impl From<u32> for Step {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "step {}", self.0)
    }
}

// =============================================================================
// SECRET
// =============================================================================

/// The expected phrase unlocking a given step.
///
/// Secrets are fixed at configuration time and never mutated at runtime.
/// `Debug` is redacted so secrets do not end up in log lines.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Create a new secret from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the secret as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the stagegate system.
///
/// - A wrong secret is NOT an error; `validate` returns `Ok(false)`
/// - Persistence errors are logged by the controller and never end the session
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum GateError {
    /// The step has no registry entry. This is a configuration defect.
    #[error("No secret configured for {0}")]
    UnconfiguredStep(Step),

    /// The registry configuration is unusable.
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// Writing the snapshot to durable storage failed.
    #[error("Failed to persist progress: {0}")]
    PersistenceWriteFailure(String),

    /// The stored snapshot could not be understood.
    #[error("Stored progress is corrupt: {0}")]
    PersistenceReadCorrupt(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
