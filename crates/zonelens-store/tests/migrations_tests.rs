// Integration tests for the migration framework

use rusqlite::Connection;
use zonelens_core::errors::ExErrorKind;
use zonelens_store::migrations::{
    applied_migrations, apply_migration_set, apply_migrations, get_migrations, Migration,
};

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    // Given: An empty SQLite database
    let mut conn = setup_test_db();

    // When: Migrations are applied
    let result = apply_migrations(&mut conn);

    // Then: All migrations succeed
    assert!(result.is_ok(), "Migrations should succeed: {:?}", result.err());

    // And: the expected tables exist
    let tables = get_table_names(&conn);
    for expected in [
        "schema_version",
        "wall_clock_records",
        "provenance_events",
        "sqlite_sequence",
    ] {
        assert!(tables.contains(&expected.to_string()), "Missing table: {}", expected);
    }
}

#[test]
fn test_migrations_recorded_in_order_with_checksums() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();

    let ids = applied_migrations(&conn).unwrap();
    let expected: Vec<String> = get_migrations().iter().map(|m| m.id.to_string()).collect();
    assert_eq!(ids, expected);

    let missing_checksums: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM schema_version WHERE checksum IS NULL OR length(checksum) != 64",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(missing_checksums, 0);
}

#[test]
fn test_reapply_is_idempotent() {
    let mut conn = setup_test_db();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count as usize, get_migrations().len());
}

#[test]
fn test_changed_migration_body_is_rejected() {
    // Given: a database migrated with one version of a migration
    let mut conn = setup_test_db();
    let original = [Migration {
        id: "900_probe",
        sql: "CREATE TABLE probe (x INTEGER);",
    }];
    apply_migration_set(&mut conn, &original).unwrap();

    // When: the same migration id comes back with a different body
    let edited = [Migration {
        id: "900_probe",
        sql: "CREATE TABLE probe (x INTEGER, y TEXT);",
    }];
    let err = apply_migration_set(&mut conn, &edited).unwrap_err();

    // Then: the runner refuses with a checksum mismatch
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("migration_checksum"));
    assert!(err.message().contains("900_probe"));
}

#[test]
fn test_failed_migration_is_not_recorded() {
    let mut conn = setup_test_db();
    let broken = [Migration {
        id: "901_broken",
        sql: "CREATE TABLE oops (;",
    }];

    let err = apply_migration_set(&mut conn, &broken).unwrap_err();

    assert_eq!(err.op(), Some("migration"));
    assert!(applied_migrations(&conn).unwrap().is_empty());
}
