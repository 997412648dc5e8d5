//! Egg record entity.
//!
//! # Invariants
//! - `chicken_id` referenced an existing chicken when the record was written.
//! - Several records may share `(chicken_id, laid_date)`; each is one egg.

use super::chicken::ChickenId;
use super::EpochMs;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned egg record identifier.
pub type EggRecordId = i64;

/// Wire format for calendar dates (`YYYY-MM-DD`).
pub const LAID_DATE_FORMAT: &str = "%Y-%m-%d";

/// One egg laid by one chicken on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggRecord {
    pub id: EggRecordId,
    pub chicken_id: ChickenId,
    /// Calendar day without time-of-day. Future dates are accepted.
    pub laid_date: NaiveDate,
    pub created_at: EpochMs,
}

/// Validated write request for one egg record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEggRecord {
    pub chicken_id: ChickenId,
    pub laid_date: NaiveDate,
}
