//! Boundary input contracts.
//!
//! # Responsibility
//! - Turn raw caller input into validated write requests.
//! - Reject malformed input before any storage access happens.
//!
//! # Invariants
//! - A chicken name is valid when it contains at least one non-whitespace
//!   character. The accepted name is kept verbatim.
//! - A laid date is valid only in strict `YYYY-MM-DD` form.

use super::chicken::ChickenId;
use super::egg_record::{NewEggRecord, LAID_DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Chicken name is empty or whitespace-only.
    EmptyChickenName,
    /// Laid date is not a `YYYY-MM-DD` calendar date.
    InvalidLaidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyChickenName => write!(f, "chicken name is required"),
            Self::InvalidLaidDate(value) => {
                write!(f, "invalid laid date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for ValidationError {}

/// Raw input for creating a chicken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChickenInput {
    pub name: String,
}

impl CreateChickenInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the accepted name or a validation error.
    pub fn validate(&self) -> Result<&str, ValidationError> {
        validate_chicken_name(&self.name)?;
        Ok(self.name.as_str())
    }
}

/// Raw input for recording one egg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEggInput {
    pub chicken_id: ChickenId,
    /// Calendar date as `YYYY-MM-DD` text.
    pub laid_date: String,
}

impl RecordEggInput {
    pub fn new(chicken_id: ChickenId, laid_date: impl Into<String>) -> Self {
        Self {
            chicken_id,
            laid_date: laid_date.into(),
        }
    }

    /// Parses the raw input into a write request.
    ///
    /// Only the input shape is checked here; chicken existence is checked by
    /// the store inside the write.
    pub fn parse(&self) -> Result<NewEggRecord, ValidationError> {
        Ok(NewEggRecord {
            chicken_id: self.chicken_id,
            laid_date: parse_laid_date(&self.laid_date)?,
        })
    }
}

/// Checks a chicken name against the non-blank rule.
pub fn validate_chicken_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyChickenName);
    }
    Ok(())
}

/// Parses strict `YYYY-MM-DD` text into a calendar date.
pub fn parse_laid_date(value: &str) -> Result<NaiveDate, ValidationError> {
    // chrono skips padding spaces and accepts signed years; the wire form does not.
    if !has_iso_date_shape(value) {
        return Err(ValidationError::InvalidLaidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, LAID_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidLaidDate(value.to_string()))
}

fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}
