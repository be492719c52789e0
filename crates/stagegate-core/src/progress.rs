//! # Progress State
//!
//! In-memory record of which steps are unlocked and how many answers were
//! tried per step, plus the pure queries derived from it.
//!
//! ## Invariants
//!
//! - `unlocked` and `attempts` have an entry for every configured step
//! - an unlock flag only goes `false → true`; only [`ProgressState::clear`]
//!   takes it back, for all steps at once
//! - attempt counters never decrease except on clear
//!
//! Mutators are crate-private: the [`ProgressController`](crate::ProgressController)
//! is the only writer. Everything public here is a read.

use crate::formats::Snapshot;
use crate::primitives::PROGRESS_SCALE;
use crate::{CodeRegistry, Step};
use serde::Serialize;
use std::collections::BTreeMap;

/// Unlock flags and attempt counters for every configured step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressState {
    unlocked: BTreeMap<Step, bool>,
    attempts: BTreeMap<Step, u64>,
}

impl ProgressState {
    /// Fresh state: every step locked, every counter at zero.
    #[must_use]
    pub fn new(registry: &CodeRegistry) -> Self {
        Self {
            unlocked: registry.steps().map(|step| (step, false)).collect(),
            attempts: registry.steps().map(|step| (step, 0)).collect(),
        }
    }

    /// Hydrate from a persisted snapshot, or start fresh if there is none.
    ///
    /// Snapshot entries are merged key-by-key onto the defaults. Keys that
    /// are not step numbers, or name steps the registry does not know, are
    /// ignored; steps the snapshot does not mention keep their defaults.
    #[must_use]
    pub fn from_persisted(registry: &CodeRegistry, snapshot: Option<Snapshot>) -> Self {
        let mut state = Self::new(registry);
        let Some(snapshot) = snapshot else {
            return state;
        };

        for (key, flag) in snapshot.unlocked {
            let step = Step::from_storage_key(&key);
            if let Some(slot) = step.and_then(|s| state.unlocked.get_mut(&s)) {
                *slot = flag;
            }
        }
        for (key, count) in snapshot.attempts {
            let step = Step::from_storage_key(&key);
            if let Some(slot) = step.and_then(|s| state.attempts.get_mut(&s)) {
                *slot = count;
            }
        }
        state
    }

    /// Serializable `{unlocked, attempts}` pair for durable storage.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            unlocked: self
                .unlocked
                .iter()
                .map(|(step, flag)| (step.storage_key(), *flag))
                .collect(),
            attempts: self
                .attempts
                .iter()
                .map(|(step, count)| (step.storage_key(), *count))
                .collect(),
        }
    }

    // =========================================================================
    // MUTATIONS (controller only)
    // =========================================================================

    /// Count one more answer for `step`. Returns the new count.
    pub(crate) fn record_attempt(&mut self, step: Step) -> u64 {
        let count = self.attempts.entry(step).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Flip `step` to unlocked. Never locks.
    pub(crate) fn mark_unlocked(&mut self, step: Step) {
        self.unlocked.insert(step, true);
    }

    /// Lock every step and zero every counter.
    pub(crate) fn clear(&mut self) {
        self.unlocked.values_mut().for_each(|flag| *flag = false);
        self.attempts.values_mut().for_each(|count| *count = 0);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether `step` is unlocked. `false` for unknown steps.
    #[must_use]
    pub fn is_step_unlocked(&self, step: Step) -> bool {
        self.unlocked.get(&step).copied().unwrap_or(false)
    }

    /// The gating rule.
    ///
    /// The first step is always reachable. Any other step is reachable iff
    /// its immediate predecessor is unlocked; neither the step's own flag nor
    /// earlier steps are consulted.
    #[must_use]
    pub fn can_access_step(&self, step: Step) -> bool {
        if step.is_first() {
            return true;
        }
        step.previous()
            .map(|prev| self.is_step_unlocked(prev))
            .unwrap_or(false)
    }

    /// Number of answers tried for `step`. Zero for unknown steps.
    #[must_use]
    pub fn attempts(&self, step: Step) -> u64 {
        self.attempts.get(&step).copied().unwrap_or(0)
    }

    /// Number of configured steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.unlocked.len()
    }

    /// Number of unlocked steps.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.values().filter(|flag| **flag).count()
    }

    /// Completion percentage, `0..=100`, rounded half up.
    ///
    /// Integer form of `round(unlocked / total * 100)`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        let total = self.total_steps() as u64;
        if total == 0 {
            return 0;
        }
        let unlocked = self.unlocked_count() as u64;
        let percent = (2 * PROGRESS_SCALE * unlocked + total) / (2 * total);
        percent.min(PROGRESS_SCALE) as u8
    }

    /// The first step that is still locked, if any.
    #[must_use]
    pub fn next_locked_step(&self) -> Option<Step> {
        self.unlocked
            .iter()
            .find(|(_, flag)| !**flag)
            .map(|(step, _)| *step)
    }

    /// Whether every step is unlocked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unlocked.values().all(|flag| *flag)
    }

    /// Iterate `(step, unlocked, attempts)` in step order.
    pub fn entries(&self) -> impl Iterator<Item = (Step, bool, u64)> + '_ {
        self.unlocked
            .iter()
            .map(|(step, flag)| (*step, *flag, self.attempts(*step)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
