//! Flock repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide append-only create/read APIs over `chickens` and `egg_records`.
//! - Enforce egg-to-chicken referential integrity before insert.
//!
//! # Invariants
//! - Listing order is insertion order (`id ASC`).
//! - `record_egg` never writes when the chicken is missing.

use super::schema::ensure_connection_ready;
use super::{RepoError, RepoResult};
use crate::model::chicken::{Chicken, ChickenId};
use crate::model::egg_record::{EggRecord, NewEggRecord};
use crate::model::input::validate_chicken_name;
use crate::model::now_epoch_ms;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CHICKEN_SELECT_SQL: &str = "SELECT id, name, created_at FROM chickens";
const EGG_RECORD_SELECT_SQL: &str = "SELECT id, chicken_id, laid_date, created_at FROM egg_records";

/// Repository interface for the entity store.
pub trait FlockRepository {
    /// Persists one chicken and returns it with its assigned id.
    fn create_chicken(&self, name: &str) -> RepoResult<Chicken>;
    /// Loads one chicken by id.
    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>>;
    /// Lists all chickens in insertion order.
    fn list_chickens(&self) -> RepoResult<Vec<Chicken>>;
    /// Persists one egg record for an existing chicken.
    fn record_egg(&self, egg: &NewEggRecord) -> RepoResult<EggRecord>;
    /// Lists all egg records in insertion order.
    fn list_egg_records(&self) -> RepoResult<Vec<EggRecord>>;
}

impl<T: FlockRepository + ?Sized> FlockRepository for &T {
    fn create_chicken(&self, name: &str) -> RepoResult<Chicken> {
        (**self).create_chicken(name)
    }

    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>> {
        (**self).get_chicken(id)
    }

    fn list_chickens(&self) -> RepoResult<Vec<Chicken>> {
        (**self).list_chickens()
    }

    fn record_egg(&self, egg: &NewEggRecord) -> RepoResult<EggRecord> {
        (**self).record_egg(egg)
    }

    fn list_egg_records(&self) -> RepoResult<Vec<EggRecord>> {
        (**self).list_egg_records()
    }
}

/// SQLite-backed flock repository.
pub struct SqliteFlockRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlockRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl FlockRepository for SqliteFlockRepository<'_> {
    fn create_chicken(&self, name: &str) -> RepoResult<Chicken> {
        validate_chicken_name(name)?;

        let created_at = now_epoch_ms();
        self.conn.execute(
            "INSERT INTO chickens (name, created_at) VALUES (?1, ?2);",
            params![name, created_at],
        )?;

        Ok(Chicken {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            created_at,
        })
    }

    fn get_chicken(&self, id: ChickenId) -> RepoResult<Option<Chicken>> {
        let chicken = self
            .conn
            .query_row(
                &format!("{CHICKEN_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_chicken_row,
            )
            .optional()?;
        Ok(chicken)
    }

    fn list_chickens(&self) -> RepoResult<Vec<Chicken>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHICKEN_SELECT_SQL} ORDER BY id ASC;"))?;
        let chickens = stmt
            .query_map([], parse_chicken_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chickens)
    }

    fn record_egg(&self, egg: &NewEggRecord) -> RepoResult<EggRecord> {
        // Immediate lock: the existence check and the insert see one snapshot.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM chickens WHERE id = ?1);",
            [egg.chicken_id],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::ChickenNotFound(egg.chicken_id));
        }

        let created_at = now_epoch_ms();
        tx.execute(
            "INSERT INTO egg_records (chicken_id, laid_date, created_at) VALUES (?1, ?2, ?3);",
            params![egg.chicken_id, egg.laid_date, created_at],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(EggRecord {
            id,
            chicken_id: egg.chicken_id,
            laid_date: egg.laid_date,
            created_at,
        })
    }

    fn list_egg_records(&self) -> RepoResult<Vec<EggRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EGG_RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let records = stmt
            .query_map([], parse_egg_record_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

fn parse_chicken_row(row: &Row<'_>) -> rusqlite::Result<Chicken> {
    Ok(Chicken {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_egg_record_row(row: &Row<'_>) -> rusqlite::Result<EggRecord> {
    Ok(EggRecord {
        id: row.get("id")?,
        chicken_id: row.get("chicken_id")?,
        laid_date: row.get("laid_date")?,
        created_at: row.get("created_at")?,
    })
}
