//! telemetry/mod.rs
//! Unified telemetry module: counters, the in-flight gauge, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters are owned by the dispatcher thread, so they need no locking.
//! - The in-flight gauge uses atomics so it can be read through a shared borrow.
//! - Snapshots are immutable and serde-serializable for `--stats` output.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
