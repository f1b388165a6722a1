//! Seed importer orchestration
//!
//! Validates a seed, then writes its records and provenance in one
//! transaction. Scenarios are not persisted; they are read from the seed
//! file when a suite runs.

#![allow(clippy::result_large_err)]

use std::path::Path;

use rusqlite::Connection;
use zonelens_core::ops::WallClockStore;
use zonelens_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{from_rusqlite, Result};
use crate::repo::SqliteWallClockStore;
use crate::seed::format_v0::SeedV0;
use crate::seed::{compute_seed_digest, parse_seed_file_with_db, provenance};

/// What an import wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedImport {
    pub digest: String,
    pub records: usize,
    pub scenarios: usize,
}

/// Import a seed file into the database
///
/// The whole file is rejected if any record id already exists.
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<SeedImport> {
    let source = path.display().to_string();
    log_op_start!("seed_import", source = source.as_str());
    let start = std::time::Instant::now();

    let result = parse_seed_file_with_db(path, Some(&*conn))
        .and_then(|seed| import_parsed(&seed, &source, conn))
        .map_err(|e| {
            log_op_error!(
                "seed_import",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                source = source.as_str()
            );
            e
        })?;

    log_op_end!(
        "seed_import",
        duration_ms = start.elapsed().as_millis() as u64,
        digest = result.digest.as_str(),
        records = result.records
    );
    Ok(result)
}

/// Import an already validated seed
pub fn import_parsed(seed: &SeedV0, source: &str, conn: &mut Connection) -> Result<SeedImport> {
    let digest = compute_seed_digest(seed)?;
    let records = seed.stored_records()?;

    let tx = conn.transaction().map_err(from_rusqlite)?;
    provenance::emit_started(&tx, &digest, source)?;

    for record in &records {
        SqliteWallClockStore::insert_record_tx(&tx, record)?;
        provenance::emit_applied(&tx, &digest, record.id.0)?;
    }

    provenance::emit_completed(&tx, &digest, records.len())?;
    tx.commit().map_err(from_rusqlite)?;

    Ok(SeedImport {
        digest,
        records: records.len(),
        scenarios: seed.scenarios.len(),
    })
}

/// Insert a seed's records into any store, keeping their ids
pub fn load_records<S: WallClockStore>(seed: &SeedV0, store: &mut S) -> Result<usize> {
    let records = seed.stored_records()?;
    let count = records.len();
    for record in records {
        store.insert_with_id(record)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;
    use std::path::PathBuf;
    use zonelens_core::errors::ExErrorKind;

    fn setup_test_db() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();
        conn
    }

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
    }

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_import_fixture_rows() {
        let mut conn = setup_test_db();

        let import = import_seed(&fixtures_dir().join("seed_fixture_rows.yaml"), &mut conn).unwrap();

        assert_eq!(import.records, 3);
        assert_eq!(count(&conn, "wall_clock_records"), 3);
        // started + one per record + completed
        assert_eq!(count(&conn, "provenance_events"), 5);
    }

    #[test]
    fn test_reimport_is_rejected_atomically() {
        let mut conn = setup_test_db();
        let path = fixtures_dir().join("seed_fixture_rows.yaml");
        import_seed(&path, &mut conn).unwrap();

        let err = import_seed(&path, &mut conn).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(count(&conn, "wall_clock_records"), 3);
        assert_eq!(count(&conn, "provenance_events"), 5);
    }
}
