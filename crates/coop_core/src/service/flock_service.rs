//! Flock use-case service (entity store).
//!
//! # Responsibility
//! - Validate boundary input before any repository call.
//! - Create and list chickens; record and list egg records.
//!
//! # Invariants
//! - Validation and not-found failures are surfaced verbatim, never retried.
//! - A failed call leaves storage unchanged.

use crate::model::chicken::{Chicken, ChickenId};
use crate::model::egg_record::EggRecord;
use crate::model::input::{CreateChickenInput, RecordEggInput, ValidationError};
use crate::repo::flock_repo::FlockRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from flock service operations.
#[derive(Debug)]
pub enum FlockServiceError {
    /// Caller input is malformed.
    Validation(ValidationError),
    /// Referenced chicken does not exist.
    ChickenNotFound(ChickenId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for FlockServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ChickenNotFound(id) => write!(f, "chicken with id {id} not found"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent flock state: {details}"),
        }
    }
}

impl Error for FlockServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for FlockServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for FlockServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::ChickenNotFound(id) => Self::ChickenNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Entity store facade over a flock repository.
pub struct FlockService<R: FlockRepository> {
    repo: R,
}

impl<R: FlockRepository> FlockService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one chicken.
    ///
    /// # Contract
    /// - Rejects empty or whitespace-only names with `Validation`.
    /// - Returns the stored record, read back by id.
    pub fn create_chicken(&self, input: &CreateChickenInput) -> Result<Chicken, FlockServiceError> {
        let name = match input.validate() {
            Ok(name) => name,
            Err(err) => {
                warn!("event=chicken_create module=service status=rejected reason=empty_name");
                return Err(err.into());
            }
        };

        let created = self.repo.create_chicken(name)?;
        let chicken = self
            .repo
            .get_chicken(created.id)?
            .ok_or(FlockServiceError::InconsistentState(
                "created chicken not found in read-back",
            ))?;

        info!(
            "event=chicken_create module=service status=ok chicken_id={}",
            chicken.id
        );
        Ok(chicken)
    }

    /// Gets one chicken by id.
    pub fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>> {
        self.repo.get_chicken(id)
    }

    /// Lists all chickens in creation order.
    pub fn list_chickens(&self) -> RepoResult<Vec<Chicken>> {
        self.repo.list_chickens()
    }

    /// Records one egg for an existing chicken.
    ///
    /// # Contract
    /// - Rejects malformed dates with `Validation` before touching storage.
    /// - Fails with `ChickenNotFound` when the chicken does not exist.
    /// - Duplicate `(chicken_id, laid_date)` pairs are accepted.
    pub fn record_egg(&self, input: &RecordEggInput) -> Result<EggRecord, FlockServiceError> {
        let egg = input.parse()?;
        match self.repo.record_egg(&egg) {
            Ok(record) => {
                info!(
                    "event=egg_record module=service status=ok egg_record_id={} chicken_id={}",
                    record.id, record.chicken_id
                );
                Ok(record)
            }
            Err(err) => {
                warn!(
                    "event=egg_record module=service status=error chicken_id={} error={}",
                    egg.chicken_id, err
                );
                Err(err.into())
            }
        }
    }

    /// Lists all egg records in creation order.
    pub fn list_egg_records(&self) -> RepoResult<Vec<EggRecord>> {
        self.repo.list_egg_records()
    }
}
