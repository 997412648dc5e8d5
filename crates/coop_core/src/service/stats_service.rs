//! Egg statistics use-case service (aggregation engine).
//!
//! # Invariants
//! - Every call recomputes from current storage state.
//! - No method mutates storage.

use crate::model::stats::{ChickenEggStats, DailyEggStats};
use crate::repo::stats_repo::EggStatsRepository;
use crate::repo::RepoResult;
use log::debug;
use std::time::Instant;

/// Aggregation facade over a statistics repository.
pub struct StatsService<R: EggStatsRepository> {
    repo: R,
}

impl<R: EggStatsRepository> StatsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Egg totals per chicken, ordered by name then creation order.
    pub fn chicken_egg_stats(&self) -> RepoResult<Vec<ChickenEggStats>> {
        let started_at = Instant::now();
        let stats = self.repo.chicken_egg_stats()?;
        debug!(
            "event=stats_query module=service status=ok view=chicken rows={} duration_ms={}",
            stats.len(),
            started_at.elapsed().as_millis()
        );
        Ok(stats)
    }

    /// Egg totals per laid date, ascending.
    pub fn daily_egg_stats(&self) -> RepoResult<Vec<DailyEggStats>> {
        let started_at = Instant::now();
        let stats = self.repo.daily_egg_stats()?;
        debug!(
            "event=stats_query module=service status=ok view=daily rows={} duration_ms={}",
            stats.len(),
            started_at.elapsed().as_millis()
        );
        Ok(stats)
    }
}
