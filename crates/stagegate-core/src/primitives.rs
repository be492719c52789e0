//! # Innate Primitives
//!
//! Hardcoded runtime constants for the stagegate CORE.
//!
//! These primitives are compiled into the binary and are immutable at runtime.

/// The first step of every registry.
///
/// - Step numbering is contiguous and starts here.
/// - This step is always accessible, whatever the progress state says.
pub const FIRST_STEP: u32 = 1;

/// Number of steps in the built-in registry.
pub const BUILTIN_STEP_COUNT: u32 = 5;

/// Default key of the durable slot holding the progress snapshot.
///
/// One key, one snapshot: the whole `{unlocked, attempts}` pair is
/// rewritten on every mutation.
pub const STORAGE_KEY: &str = "stagegate-progress";

/// Scale used by the progress percentage.
pub const PROGRESS_SCALE: u64 = 100;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum size of a stored snapshot, in bytes.
///
/// A legitimate snapshot for a handful of steps is a few hundred bytes.
/// Anything larger is treated as corrupt and never parsed.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024;

/// Maximum number of steps a registry may declare.
pub const MAX_STEPS: u32 = 1024;
