//! # Code Registry
//!
//! Static mapping from step number to the secret that unlocks it.
//!
//! The registry is built once at startup and is read-only afterwards. It is
//! also the source of truth for which steps exist: progress maps, snapshots
//! and the access guard are all sized from it.

use crate::normalize::normalize;
use crate::primitives::{BUILTIN_STEP_COUNT, FIRST_STEP, MAX_STEPS};
use crate::{GateError, Secret, Step};
use std::collections::BTreeMap;

/// Secrets shipped with the default experience.
const BUILTIN_CODES: [(u32, &str); BUILTIN_STEP_COUNT as usize] = [
    (1, "yuka"),
    (2, "sagittaire"),
    (3, "albâtre"),
    (4, "olaf"),
    (5, "andré"),
];

/// Immutable step → secret mapping.
///
/// Construction guarantees:
/// - at least one step
/// - steps are exactly `1..=N`, without gaps
/// - no secret normalizes to the empty string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegistry {
    codes: BTreeMap<Step, Secret>,
}

impl CodeRegistry {
    /// The registry of the default five-step experience.
    #[must_use]
    pub fn builtin() -> Self {
        let codes = BUILTIN_CODES
            .iter()
            .map(|&(step, secret)| (Step(step), Secret::new(secret)))
            .collect();
        Self { codes }
    }

    /// Build a registry from `(step, secret)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `GateError::InvalidRegistry` if the entries are empty, exceed
    /// `MAX_STEPS`, repeat a step, leave a gap in `1..=N`, or contain a
    /// secret that is blank once normalized.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, GateError>
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        let mut codes = BTreeMap::new();
        for (step, secret) in entries {
            let secret = Secret::new(secret);
            if normalize(secret.as_str()).is_empty() {
                return Err(GateError::InvalidRegistry(format!(
                    "secret for step {} is empty",
                    step
                )));
            }
            if codes.insert(Step(step), secret).is_some() {
                return Err(GateError::InvalidRegistry(format!(
                    "step {} is configured twice",
                    step
                )));
            }
        }

        if codes.is_empty() {
            return Err(GateError::InvalidRegistry(
                "at least one step is required".to_string(),
            ));
        }
        if codes.len() > MAX_STEPS as usize {
            return Err(GateError::InvalidRegistry(format!(
                "{} steps exceed the maximum of {}",
                codes.len(),
                MAX_STEPS
            )));
        }

        // Keys are sorted, so contiguity is a position check.
        for (expected, step) in (FIRST_STEP..).zip(codes.keys()) {
            if step.value() != expected {
                return Err(GateError::InvalidRegistry(format!(
                    "steps must be contiguous from {}: expected step {}, found step {}",
                    FIRST_STEP,
                    expected,
                    step.value()
                )));
            }
        }

        Ok(Self { codes })
    }

    /// Look up the secret for `step`.
    ///
    /// # Errors
    ///
    /// Returns `GateError::UnconfiguredStep` if the step has no entry.
    pub fn secret_for(&self, step: Step) -> Result<&Secret, GateError> {
        self.codes
            .get(&step)
            .ok_or(GateError::UnconfiguredStep(step))
    }

    /// Whether `step` has an entry.
    #[must_use]
    pub fn contains(&self, step: Step) -> bool {
        self.codes.contains_key(&step)
    }

    /// All configured steps, in order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.codes.keys().copied()
    }

    /// Number of configured steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.codes.len()
    }

    /// The last step of the chain.
    #[must_use]
    pub fn last_step(&self) -> Step {
        self.codes.keys().next_back().copied().unwrap_or(Step::FIRST)
    }
}

impl Default for CodeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// TESTS
// =============================================================================
