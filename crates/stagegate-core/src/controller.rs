//! # Progress Controller
//!
//! The single owner and writer of [`ProgressState`].
//!
//! Orchestrates Normalizer + CodeRegistry + ProgressState + Persistence:
//! - `validate` and `reset` are the only mutations
//! - every mutation is followed by a snapshot write
//! - write failures are logged and swallowed; the in-memory state stays
//!   authoritative for the rest of the session
//!
//! Everything runs synchronously to completion. Mutations take `&mut self`,
//! so there is no way to interleave two of them.

use crate::normalize::matches;
use crate::persistence::Persistence;
use crate::storage::SnapshotStore;
use crate::{AccessGuard, CodeRegistry, GateError, GuardDecision, ProgressState, Step};

/// Validate/reset/query entry point over a storage backend.
#[derive(Debug)]
pub struct ProgressController<S> {
    registry: CodeRegistry,
    state: ProgressState,
    persistence: Persistence<S>,
}

impl<S: SnapshotStore> ProgressController<S> {
    /// Start a session: hydrate from storage, or start fresh.
    ///
    /// Never fails. An absent or unusable snapshot yields the default state.
    pub fn open(registry: CodeRegistry, persistence: Persistence<S>) -> Self {
        let state = ProgressState::from_persisted(&registry, persistence.load());
        tracing::debug!(
            unlocked = state.unlocked_count(),
            total = state.total_steps(),
            "Progress loaded"
        );
        Self {
            registry,
            state,
            persistence,
        }
    }

    /// Check an answer for `step`.
    ///
    /// The attempt counter is bumped exactly once per call, the step is
    /// unlocked on a match, and the snapshot is persisted whatever the
    /// outcome. A wrong answer is `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `GateError::UnconfiguredStep` if `step` has no secret. In that
    /// case nothing is counted and nothing is written.
    pub fn validate(&mut self, step: Step, input: &str) -> Result<bool, GateError> {
        let secret = self.registry.secret_for(step)?;
        let matched = matches(input, secret.as_str());

        let attempts = self.state.record_attempt(step);
        if matched && self.state.is_step_unlocked(step) {
            tracing::debug!(%step, attempts, "Step was already unlocked");
        } else if matched {
            self.state.mark_unlocked(step);
        }
        tracing::info!(%step, matched, attempts, "Answer checked");

        self.persist();
        Ok(matched)
    }

    /// Lock every step and zero every counter, then persist.
    pub fn reset(&mut self) {
        self.state.clear();
        tracing::info!("Progress reset");
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.state) {
            tracing::warn!(error = %e, "Progress kept in memory only");
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether `step` is unlocked.
    #[must_use]
    pub fn is_step_unlocked(&self, step: Step) -> bool {
        self.state.is_step_unlocked(step)
    }

    /// Whether navigation to `step` would show its content.
    #[must_use]
    pub fn can_access_step(&self, step: Step) -> bool {
        self.state.can_access_step(step)
    }

    /// Completion percentage, `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.state.progress()
    }

    /// Answers tried for `step` so far.
    #[must_use]
    pub fn attempts(&self, step: Step) -> u64 {
        self.state.attempts(step)
    }

    /// Run the navigation guard for `step` against the current state.
    #[must_use]
    pub fn guard(&self, step: Step) -> GuardDecision {
        AccessGuard::check(&self.state, step)
    }

    /// Read-only handle on the current state.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The registry this controller validates against.
    #[must_use]
    pub fn registry(&self) -> &CodeRegistry {
        &self.registry
    }

    /// The persistence adapter (for inspection).
    #[must_use]
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}

// =============================================================================
// TESTS
// =============================================================================
