//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the flock.
//! - Isolate SQLite query details from service orchestration.
//! - Provide an in-memory backend honoring the same contracts.
//!
//! # Invariants
//! - Write paths validate input before any mutation.
//! - Egg writes check chicken existence and insert in one atomic step.
//! - Repository APIs return semantic errors (`ChickenNotFound`) in addition
//!   to storage transport errors.

use crate::db::DbError;
use crate::model::chicken::ChickenId;
use crate::model::input::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod flock_repo;
pub mod memory_repo;
mod schema;
pub mod stats_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by flock and stats persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Input rejected before touching storage.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Referenced chicken does not exist.
    ChickenNotFound(ChickenId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::ChickenNotFound(id) => write!(f, "chicken with id {id} not found"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "coop repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "coop repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "coop repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted flock data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
