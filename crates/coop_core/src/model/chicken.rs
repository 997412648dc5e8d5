//! Chicken entity.

use super::EpochMs;
use serde::{Deserialize, Serialize};

/// Store-assigned chicken identifier.
pub type ChickenId = i64;

/// A tracked flock member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chicken {
    pub id: ChickenId,
    /// Display name, stored exactly as supplied. Not unique.
    pub name: String,
    pub created_at: EpochMs,
}
