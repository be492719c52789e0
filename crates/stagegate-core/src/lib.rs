//! # stagegate-core
//!
//! The progress/access-control engine for stagegate - THE LOGIC.
//!
//! A fixed, ordered chain of steps; each step unlocks when the user types
//! its secret phrase, and step N+1 is reachable once step N is unlocked.
//!
//! ## Components
//!
//! - `normalize`: case/accent/whitespace-insensitive canonical form
//! - `registry`: immutable step → secret mapping
//! - `progress`: unlock flags, attempt counters, derived queries
//! - `formats` + `storage` + `persistence`: tolerant durable snapshots
//! - `controller`: validate/reset orchestration, sole writer of progress
//! - `guard`: soft navigation gate
//!
//! ## Architectural Constraints
//!
//! - Validation is local: no network, no server authority
//! - Synchronous: every operation runs to completion, no async
//! - Available: persistence failures degrade to in-memory state
//! - This is a trust-based gate, not a security boundary
//!
//! ## Example
//!
//! ```
//! use stagegate_core::{CodeRegistry, MemoryStore, Persistence, ProgressController, Step};
//!
//! let registry = CodeRegistry::from_entries([(1, "yuka"), (2, "sagittaire")]).unwrap();
//! let mut controller = ProgressController::open(registry, Persistence::new(MemoryStore::new()));
//!
//! assert!(controller.validate(Step(1), " Yuká").unwrap());
//! assert!(controller.can_access_step(Step(2)));
//! assert_eq!(controller.progress(), 50);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod controller;
pub mod formats;
pub mod guard;
pub mod normalize;
pub mod persistence;
pub mod primitives;
pub mod progress;
pub mod registry;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{GateError, Secret, Step};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use controller::ProgressController;
pub use guard::{AccessGuard, GuardDecision, StepView};
pub use normalize::normalize;
pub use persistence::Persistence;
pub use progress::ProgressState;
pub use registry::CodeRegistry;
pub use storage::{FileStore, MemoryStore, RedbStore, SnapshotStore, is_valid_storage_key};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{Snapshot, snapshot_from_json, snapshot_to_json};
