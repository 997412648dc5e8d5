//! In-memory flock store.
//!
//! # Responsibility
//! - Implement `FlockRepository` and `EggStatsRepository` without SQLite.
//! - Serve tests and ephemeral sessions with the same observable contracts.
//!
//! # Invariants
//! - Id counters only move forward, starting at 1.
//! - Every operation runs under one lock acquisition.

use super::flock_repo::FlockRepository;
use super::stats_repo::EggStatsRepository;
use super::{RepoError, RepoResult};
use crate::model::chicken::{Chicken, ChickenId};
use crate::model::egg_record::{EggRecord, EggRecordId, NewEggRecord};
use crate::model::input::validate_chicken_name;
use crate::model::now_epoch_ms;
use crate::model::stats::{
    aggregate_chicken_egg_stats, aggregate_daily_egg_stats, ChickenEggStats, DailyEggStats,
};
use parking_lot::Mutex;

#[derive(Debug)]
struct MemoryState {
    chickens: Vec<Chicken>,
    egg_records: Vec<EggRecord>,
    next_chicken_id: ChickenId,
    next_egg_record_id: EggRecordId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            chickens: Vec::new(),
            egg_records: Vec::new(),
            next_chicken_id: 1,
            next_egg_record_id: 1,
        }
    }
}

/// Mutex-guarded in-memory repository.
#[derive(Debug, Default)]
pub struct InMemoryCoopRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryCoopRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlockRepository for InMemoryCoopRepository {
    fn create_chicken(&self, name: &str) -> RepoResult<Chicken> {
        validate_chicken_name(name)?;

        let mut state = self.state.lock();
        let chicken = Chicken {
            id: state.next_chicken_id,
            name: name.to_string(),
            created_at: now_epoch_ms(),
        };
        state.next_chicken_id += 1;
        state.chickens.push(chicken.clone());
        Ok(chicken)
    }

    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>> {
        let state = self.state.lock();
        Ok(state
            .chickens
            .iter()
            .find(|chicken| chicken.id == id)
            .cloned())
    }

    fn list_chickens(&self) -> RepoResult<Vec<Chicken>> {
        Ok(self.state.lock().chickens.clone())
    }

    fn record_egg(&self, egg: &NewEggRecord) -> RepoResult<EggRecord> {
        let mut state = self.state.lock();
        if !state
            .chickens
            .iter()
            .any(|chicken| chicken.id == egg.chicken_id)
        {
            return Err(RepoError::ChickenNotFound(egg.chicken_id));
        }

        let record = EggRecord {
            id: state.next_egg_record_id,
            chicken_id: egg.chicken_id,
            laid_date: egg.laid_date,
            created_at: now_epoch_ms(),
        };
        state.next_egg_record_id += 1;
        state.egg_records.push(record.clone());
        Ok(record)
    }

    fn list_egg_records(&self) -> RepoResult<Vec<EggRecord>> {
        Ok(self.state.lock().egg_records.clone())
    }
}

impl EggStatsRepository for InMemoryCoopRepository {
    fn chicken_egg_stats(&self) -> RepoResult<Vec<ChickenEggStats>> {
        let state = self.state.lock();
        Ok(aggregate_chicken_egg_stats(
            &state.chickens,
            &state.egg_records,
        ))
    }

    fn daily_egg_stats(&self) -> RepoResult<Vec<DailyEggStats>> {
        let state = self.state.lock();
        Ok(aggregate_daily_egg_stats(&state.egg_records))
    }
}
