//! Command-line client for the coop flock store.
//!
//! # Responsibility
//! - Map subcommands onto flock and stats service calls.
//! - Print results as JSON on stdout and failures on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coop_core::db::open_db;
use coop_core::{
    healthcheck, init_logging, logging_status, CoopConfig, CreateChickenInput, FlockService,
    RecordEggInput, SqliteEggStatsRepository, SqliteFlockRepository, StatsService,
};
use log::info;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "coop", version, about = "Track a flock's chickens and the eggs they lay")]
struct Cli {
    /// SQLite database file (overrides COOP_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level: trace|debug|info|warn|error (overrides COOP_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for log files (overrides COOP_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// Add a chicken to the flock.
    AddChicken { name: String },
    /// List chickens in creation order.
    ListChickens,
    /// Record one egg laid by a chicken on a date (YYYY-MM-DD).
    #[command(allow_negative_numbers = true)]
    RecordEgg { chicken_id: i64, laid_date: String },
    /// List egg records in creation order.
    ListEggs,
    /// Egg totals per chicken.
    ChickenStats,
    /// Egg totals per day.
    DailyStats,
    /// Liveness probe.
    Health,
}

impl Cli {
    fn resolve_config(&self, base: CoopConfig) -> CoopConfig {
        CoopConfig {
            db_path: self.db.clone().unwrap_or(base.db_path),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_dir: self.log_dir.clone().or(base.log_dir),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = cli.resolve_config(CoopConfig::from_env());
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let output = if cli.command == Command::Health {
        health_report()?
    } else {
        let conn = open_db(&config.db_path).with_context(|| {
            format!("failed to open database `{}`", config.db_path.display())
        })?;
        execute(&cli.command, &conn)?
    };

    info!("event=cli_command module=cli status=ok");
    Ok(serde_json::to_string_pretty(&output)?)
}

fn execute(command: &Command, conn: &Connection) -> Result<Value> {
    let flock = FlockService::new(SqliteFlockRepository::try_new(conn)?);
    let stats = StatsService::new(SqliteEggStatsRepository::try_new(conn)?);

    let value = match command {
        Command::AddChicken { name } => {
            serde_json::to_value(flock.create_chicken(&CreateChickenInput::new(name.as_str()))?)?
        }
        Command::ListChickens => serde_json::to_value(flock.list_chickens()?)?,
        Command::RecordEgg {
            chicken_id,
            laid_date,
        } => serde_json::to_value(
            flock.record_egg(&RecordEggInput::new(*chicken_id, laid_date.as_str()))?,
        )?,
        Command::ListEggs => serde_json::to_value(flock.list_egg_records()?)?,
        Command::ChickenStats => serde_json::to_value(stats.chicken_egg_stats()?)?,
        Command::DailyStats => serde_json::to_value(stats.daily_egg_stats()?)?,
        Command::Health => health_report()?,
    };
    Ok(value)
}

fn health_report() -> Result<Value> {
    let mut report = serde_json::to_value(healthcheck())?;
    report["logging"] = match logging_status() {
        Some((level, log_dir)) => json!({ "level": level, "log_dir": log_dir }),
        None => Value::Null,
    };
    Ok(report)
}
