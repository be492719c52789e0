//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{Backend, Cli};
use crate::config::GateConfig;
use stagegate_core::{
    FileStore, GateError, MemoryStore, Persistence, ProgressController, RedbStore, SnapshotStore,
    Step,
};

/// Controller over whichever backend the user picked.
pub type CliController = ProgressController<Box<dyn SnapshotStore>>;

// =============================================================================
// SETUP
// =============================================================================

/// Build a controller from CLI flags: config, backend, stored progress.
pub fn open_controller(cli: &Cli) -> Result<CliController, GateError> {
    let config = GateConfig::load(cli.config.as_deref())?;

    let store: Box<dyn SnapshotStore> = match cli.backend {
        Backend::Redb => Box::new(RedbStore::open(&cli.database)?),
        Backend::File => Box::new(FileStore::open(&cli.database)?),
        Backend::Memory => Box::new(MemoryStore::new()),
    };
    tracing::debug!(backend = %cli.backend, database = ?cli.database, "Opened progress store");

    let persistence = Persistence::with_key(store, config.storage_key);
    Ok(ProgressController::open(config.registry, persistence))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show unlock flags, attempts and progress.
pub fn cmd_status(controller: &CliController, json_mode: bool) -> Result<(), GateError> {
    let state = controller.state();

    if json_mode {
        let steps: Vec<_> = state
            .entries()
            .map(|(step, unlocked, attempts)| {
                serde_json::json!({
                    "step": step.value(),
                    "unlocked": unlocked,
                    "attempts": attempts,
                    "accessible": state.can_access_step(step)
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "progress_percent": state.progress(),
            "unlocked_count": state.unlocked_count(),
            "total_steps": state.total_steps(),
            "next_locked_step": state.next_locked_step().map(Step::value),
            "complete": state.is_complete(),
            "steps": steps
        }));
        return Ok(());
    }

    println!("stagegate Progress");
    println!("==================");
    println!(
        "Unlocked: {} / {} ({}%)",
        state.unlocked_count(),
        state.total_steps(),
        state.progress()
    );
    match state.next_locked_step() {
        Some(step) => println!("Next:     {}", step),
        None => println!("Next:     all steps unlocked"),
    }
    println!();
    for (step, unlocked, attempts) in state.entries() {
        let label = if unlocked {
            "unlocked"
        } else if state.can_access_step(step) {
            "open"
        } else {
            "locked"
        };
        println!("  {:<8} {:<9} attempts: {}", step.to_string(), label, attempts);
    }

    Ok(())
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Check an answer for a step.
pub fn cmd_validate(
    controller: &mut CliController,
    step: u32,
    input: &str,
    json_mode: bool,
) -> Result<(), GateError> {
    let step = Step(step);
    let matched = controller.validate(step, input)?;

    if json_mode {
        print_json(&serde_json::json!({
            "step": step.value(),
            "valid": matched,
            "attempts": controller.attempts(step),
            "progress_percent": controller.progress()
        }));
        return Ok(());
    }

    if matched {
        println!("Correct! {} is unlocked.", step);
        if controller.state().is_complete() {
            println!("Every step is unlocked.");
        } else if controller.registry().contains(step.next()) {
            println!("{} is now reachable.", step.next());
        }
    } else {
        println!("Not quite. Try again.");
    }
    println!("Attempts for {}: {}", step, controller.attempts(step));

    Ok(())
}

// =============================================================================
// GUARD COMMAND
// =============================================================================

/// Evaluate navigation to a step.
pub fn cmd_guard(controller: &CliController, step: u32, json_mode: bool) -> Result<(), GateError> {
    let decision = controller.guard(Step(step));

    if json_mode {
        print_json(&serde_json::json!({
            "decision": decision,
            "view": decision.view(),
            "navigate": decision.allow_navigation()
        }));
        return Ok(());
    }

    if decision.accessible {
        println!("{}: accessible", decision.step);
    } else {
        println!(
            "{}: locked (unlock {} first)",
            decision.step,
            decision
                .step
                .previous()
                .map(|prev| prev.to_string())
                .unwrap_or_else(|| "nothing".to_string())
        );
    }

    Ok(())
}

// =============================================================================
// RESET COMMAND
// =============================================================================

/// Lock every step and zero every counter.
pub fn cmd_reset(controller: &mut CliController, json_mode: bool) -> Result<(), GateError> {
    controller.reset();

    if json_mode {
        print_json(&serde_json::json!({
            "reset": true,
            "total_steps": controller.state().total_steps()
        }));
    } else {
        println!("Progress reset: {} steps locked.", controller.state().total_steps());
    }

    Ok(())
}

// =============================================================================
// STEPS COMMAND
// =============================================================================

/// List configured steps. Secrets are never printed.
pub fn cmd_steps(controller: &CliController, json_mode: bool) -> Result<(), GateError> {
    let steps: Vec<u32> = controller.registry().steps().map(Step::value).collect();

    if json_mode {
        print_json(&serde_json::json!({
            "steps": steps,
            "storage_key": controller.persistence().key()
        }));
        return Ok(());
    }

    println!("Configured steps: {}", controller.registry().total_steps());
    for step in controller.registry().steps() {
        println!("  {}", step);
    }
    println!("Storage key: {}", controller.persistence().key());

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
