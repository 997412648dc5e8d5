//! Egg statistics repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Derive per-chicken and per-day egg totals from current storage state.
//!
//! # Invariants
//! - Read-only; never mutates storage and never caches results.
//! - Result ordering matches `model::stats` aggregations exactly.

use super::schema::ensure_connection_ready;
use super::{RepoError, RepoResult};
use crate::model::stats::{ChickenEggStats, DailyEggStats};
use rusqlite::Connection;

/// Repository interface for the aggregation engine.
pub trait EggStatsRepository {
    /// Egg totals per chicken, zero-egg chickens included.
    fn chicken_egg_stats(&self) -> RepoResult<Vec<ChickenEggStats>>;
    /// Egg totals per laid date, only for dates with eggs.
    fn daily_egg_stats(&self) -> RepoResult<Vec<DailyEggStats>>;
}

impl<T: EggStatsRepository + ?Sized> EggStatsRepository for &T {
    fn chicken_egg_stats(&self) -> RepoResult<Vec<ChickenEggStats>> {
        (**self).chicken_egg_stats()
    }

    fn daily_egg_stats(&self) -> RepoResult<Vec<DailyEggStats>> {
        (**self).daily_egg_stats()
    }
}

/// SQLite-backed statistics repository.
pub struct SqliteEggStatsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEggStatsRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EggStatsRepository for SqliteEggStatsRepository<'_> {
    fn chicken_egg_stats(&self) -> RepoResult<Vec<ChickenEggStats>> {
        // LEFT JOIN keeps chickens without eggs; COUNT(e.id) yields 0 for them.
        let mut stmt = self.conn.prepare(
            "SELECT
                c.id AS chicken_id,
                c.name AS chicken_name,
                COUNT(e.id) AS total_eggs
             FROM chickens c
             LEFT JOIN egg_records e ON e.chicken_id = c.id
             GROUP BY c.id, c.name
             ORDER BY c.name ASC, c.id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut stats = Vec::new();

        while let Some(row) = rows.next()? {
            stats.push(ChickenEggStats {
                chicken_id: row.get("chicken_id")?,
                chicken_name: row.get("chicken_name")?,
                total_eggs: parse_count(row.get("total_eggs")?)?,
            });
        }

        Ok(stats)
    }

    fn daily_egg_stats(&self) -> RepoResult<Vec<DailyEggStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT laid_date, COUNT(*) AS total_eggs
             FROM egg_records
             GROUP BY laid_date
             ORDER BY laid_date ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut stats = Vec::new();

        while let Some(row) = rows.next()? {
            stats.push(DailyEggStats {
                date: row.get("laid_date")?,
                total_eggs: parse_count(row.get("total_eggs")?)?,
            });
        }

        Ok(stats)
    }
}

fn parse_count(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative egg count `{value}`")))
}
