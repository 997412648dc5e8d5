//! Flock domain model.
//!
//! # Responsibility
//! - Define chicken and egg record entities plus derived statistics rows.
//! - Define boundary input contracts validated before storage access.
//!
//! # Invariants
//! - Entity ids are store-assigned, monotonic, and never reused.
//! - Entities are append-only; nothing here models update or delete.

pub mod chicken;
pub mod egg_record;
pub mod input;
pub mod stats;

/// Unix epoch milliseconds, the timestamp unit used by every entity.
pub type EpochMs = i64;

/// Returns the current wall clock time in epoch milliseconds.
pub fn now_epoch_ms() -> EpochMs {
    chrono::Utc::now().timestamp_millis()
}
