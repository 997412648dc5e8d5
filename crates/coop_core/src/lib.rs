//! Core domain logic for the coop flock tracker.
//! This crate is the single source of truth for flock invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

use serde::{Deserialize, Serialize};

pub use config::CoopConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::chicken::{Chicken, ChickenId};
pub use model::egg_record::{EggRecord, EggRecordId, NewEggRecord};
pub use model::input::{CreateChickenInput, RecordEggInput, ValidationError};
pub use model::stats::{ChickenEggStats, DailyEggStats};
pub use model::EpochMs;
pub use repo::flock_repo::{FlockRepository, SqliteFlockRepository};
pub use repo::memory_repo::InMemoryCoopRepository;
pub use repo::stats_repo::{EggStatsRepository, SqliteEggStatsRepository};
pub use repo::{RepoError, RepoResult};
pub use service::flock_service::{FlockService, FlockServiceError};
pub use service::stats_service::StatsService;

/// Liveness probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp_ms: EpochMs,
}

/// Reports core liveness with the current time.
pub fn healthcheck() -> HealthStatus {
    HealthStatus {
        status: "ok".to_string(),
        timestamp_ms: model::now_epoch_ms(),
    }
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
