//! # Formats Module
//!
//! Wire format of the persisted progress snapshot.
//!
//! Storage I/O lives in the `storage` module; this module only turns
//! snapshots into text and back.

mod snapshot;

pub use snapshot::*;
