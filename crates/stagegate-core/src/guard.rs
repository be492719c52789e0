//! # Access Guard
//!
//! Navigation-time check for gated steps.
//!
//! This is a SOFT gate. The guard evaluates the gating rule and reports it,
//! but it never blocks, redirects or rejects a navigation: the destination
//! view receives the decision and renders its own locked state.

use crate::{ProgressState, Step};
use serde::Serialize;

/// How the destination of a navigation should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepView {
    /// Content is shown.
    Open,
    /// The step's locked placeholder is shown.
    Locked,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuardDecision {
    /// The step being navigated to.
    pub step: Step,
    /// Result of the gating rule.
    pub accessible: bool,
    /// Whether the step itself has been unlocked already.
    pub unlocked: bool,
}

impl GuardDecision {
    /// Navigation always proceeds.
    #[must_use]
    pub const fn allow_navigation(&self) -> bool {
        true
    }

    /// The view the destination should render.
    #[must_use]
    pub const fn view(&self) -> StepView {
        if self.accessible {
            StepView::Open
        } else {
            StepView::Locked
        }
    }
}

/// Stateless evaluator consulted on every navigation to a gated step.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Evaluate navigation to `step`.
    ///
    /// Pure function of `state`; a denied check is logged but still lets
    /// navigation through.
    #[must_use]
    pub fn check(state: &ProgressState, step: Step) -> GuardDecision {
        let accessible = state.can_access_step(step);
        if !accessible {
            tracing::warn!(%step, "Access denied: previous step must be unlocked first");
        }
        GuardDecision {
            step,
            accessible,
            unlocked: state.is_step_unlocked(step),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
