use coop_core::db::migrations::latest_version;
use coop_core::db::{open_db, open_db_in_memory};
use coop_core::{
    CreateChickenInput, FlockRepository, FlockService, FlockServiceError, InMemoryCoopRepository,
    RecordEggInput, RepoError, SqliteFlockRepository, ValidationError,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashSet;
use std::thread;
use std::time::Duration;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn create_chicken_assigns_first_id_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());

    let chicken = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();
    assert_eq!(chicken.id, 1);
    assert_eq!(chicken.name, "Henrietta");
    assert!(chicken.created_at > 0);

    let loaded = service.get_chicken(chicken.id).unwrap().unwrap();
    assert_eq!(loaded, chicken);
}

#[test]
fn chicken_ids_strictly_increase_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());

    let ids: Vec<i64> = ["Zara", "Alice", "Alice", "Mabel"]
        .into_iter()
        .map(|name| {
            service
                .create_chicken(&CreateChickenInput::new(name))
                .unwrap()
                .id
        })
        .collect();

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let listed: Vec<i64> = service
        .list_chickens()
        .unwrap()
        .into_iter()
        .map(|chicken| chicken.id)
        .collect();
    assert_eq!(listed, ids);
}

#[test]
fn list_chickens_is_empty_for_new_store() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());

    assert!(service.list_chickens().unwrap().is_empty());
    assert!(service.list_egg_records().unwrap().is_empty());
}

#[test]
fn blank_chicken_name_is_rejected_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());

    for name in ["", "   ", "\n"] {
        let err = service
            .create_chicken(&CreateChickenInput::new(name))
            .unwrap_err();
        assert!(matches!(
            err,
            FlockServiceError::Validation(ValidationError::EmptyChickenName)
        ));
    }
    assert!(service.list_chickens().unwrap().is_empty());
}

#[test]
fn repository_rejects_blank_name_even_without_service() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFlockRepository::try_new(&conn).unwrap();

    let err = repo.create_chicken(" ").unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn record_egg_persists_and_returns_record() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();

    let egg = service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
        .unwrap();
    assert_eq!(egg.id, 1);
    assert_eq!(egg.chicken_id, hen.id);
    assert_eq!(egg.laid_date, date("2024-01-01"));
    assert!(egg.created_at > 0);

    let stored: String = conn
        .query_row(
            "SELECT laid_date FROM egg_records WHERE id = ?1;",
            [egg.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, "2024-01-01");
    assert_eq!(service.list_egg_records().unwrap(), vec![egg]);
}

#[test]
fn record_egg_for_unknown_chicken_fails_without_write() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();
    service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
        .unwrap();

    let err = service
        .record_egg(&RecordEggInput::new(999, "2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, FlockServiceError::ChickenNotFound(999)));
    assert!(err.to_string().contains("999"));
    assert_eq!(service.list_egg_records().unwrap().len(), 1);
}

#[test]
fn record_egg_rejects_malformed_date_before_lookup() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());

    let err = service
        .record_egg(&RecordEggInput::new(999, "2024-13-01"))
        .unwrap_err();
    assert!(matches!(
        err,
        FlockServiceError::Validation(ValidationError::InvalidLaidDate(_))
    ));
}

#[test]
fn record_egg_rejects_space_padded_date_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();

    for laid_date in ["2024- 1-01", "2024-01- 1"] {
        let err = service
            .record_egg(&RecordEggInput::new(hen.id, laid_date))
            .unwrap_err();
        assert!(matches!(
            err,
            FlockServiceError::Validation(ValidationError::InvalidLaidDate(_))
        ));
    }
    assert!(service.list_egg_records().unwrap().is_empty());
}

#[test]
fn same_chicken_same_day_records_are_distinct() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();

    let first = service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-15"))
        .unwrap();
    let second = service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-15"))
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.laid_date, second.laid_date);
    assert_eq!(service.list_egg_records().unwrap().len(), 2);
}

#[test]
fn future_laid_dates_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();

    let egg = service
        .record_egg(&RecordEggInput::new(hen.id, "2999-06-30"))
        .unwrap();
    assert_eq!(egg.laid_date, date("2999-06-30"));
}

#[test]
fn data_survives_reopening_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coop.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
        let hen = service
            .create_chicken(&CreateChickenInput::new("Henrietta"))
            .unwrap();
        service
            .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
    let chickens = service.list_chickens().unwrap();
    assert_eq!(chickens.len(), 1);
    assert_eq!(chickens[0].name, "Henrietta");

    let next = service
        .create_chicken(&CreateChickenInput::new("Blanche"))
        .unwrap();
    assert_eq!(next.id, 2);
}

#[test]
fn in_memory_backend_matches_sqlite_contract() {
    let repo = InMemoryCoopRepository::new();
    let service = FlockService::new(&repo);

    let hen = service
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();
    assert_eq!(hen.id, 1);

    let egg = service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
        .unwrap();
    assert_eq!(egg.id, 1);

    let err = service
        .record_egg(&RecordEggInput::new(999, "2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, FlockServiceError::ChickenNotFound(999)));
    assert_eq!(repo.list_egg_records().unwrap().len(), 1);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteFlockRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteFlockRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("chickens"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE chickens (id INTEGER PRIMARY KEY, name TEXT NOT NULL, created_at INTEGER);
         CREATE TABLE egg_records (id INTEGER PRIMARY KEY, chicken_id INTEGER, created_at INTEGER);",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteFlockRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "egg_records",
            column: "laid_date"
        })
    ));
}

#[test]
fn record_egg_waits_for_competing_writer_instead_of_checking_outside_lock() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coop.sqlite3");

    let writer = open_db(&path).unwrap();
    let hen = FlockService::new(SqliteFlockRepository::try_new(&writer).unwrap())
        .create_chicken(&CreateChickenInput::new("Henrietta"))
        .unwrap();

    let contender = open_db(&path).unwrap();
    contender.busy_timeout(Duration::from_millis(50)).unwrap();
    let contender_service = FlockService::new(SqliteFlockRepository::try_new(&contender).unwrap());

    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();
    let err = contender_service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
        .unwrap_err();
    assert!(matches!(err, FlockServiceError::Repo(RepoError::Db(_))));
    writer.execute_batch("COMMIT;").unwrap();

    assert!(contender_service.list_egg_records().unwrap().is_empty());
    contender_service
        .record_egg(&RecordEggInput::new(hen.id, "2024-01-01"))
        .unwrap();
    assert_eq!(contender_service.list_egg_records().unwrap().len(), 1);
}

#[test]
fn concurrent_connections_record_every_egg_once() {
    const EGGS_PER_WRITER: usize = 25;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coop.sqlite3");
    let hen_id = {
        let conn = open_db(&path).unwrap();
        FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap())
            .create_chicken(&CreateChickenInput::new("Henrietta"))
            .unwrap()
            .id
    };

    let writers: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap());
                (0..EGGS_PER_WRITER)
                    .map(|_| {
                        service
                            .record_egg(&RecordEggInput::new(hen_id, "2024-01-01"))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<i64>>()
            })
        })
        .collect();

    let ids: Vec<i64> = writers
        .into_iter()
        .flat_map(|writer| writer.join().unwrap())
        .collect();
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 2 * EGGS_PER_WRITER);
    assert_eq!(unique.len(), ids.len());

    let conn = open_db(&path).unwrap();
    let stored = FlockService::new(SqliteFlockRepository::try_new(&conn).unwrap())
        .list_egg_records()
        .unwrap();
    assert_eq!(stored.len(), 2 * EGGS_PER_WRITER);
}
