//! SQLite-backed wall-clock store
//!
//! Digits are kept in a TEXT column in canonical `YYYY-MM-DD HH:MM:SS` form.
//! SQLite attaches no zone to them, and neither does this layer.

#![allow(clippy::result_large_err)]

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Row, Transaction};
use zonelens_core::errors::ExError;
use zonelens_core::model::{NonTemporalField, RecordId, StoredRecord, WallClockValue};
use zonelens_core::ops::{StoreResult, WallClockStore};

use crate::db;
use crate::errors::{from_insert, from_rusqlite, record_not_found, Result};
use crate::migrations::apply_migrations;

const SELECT_COLUMNS: &str = "SELECT id, url, wall_clock FROM wall_clock_records";

/// Wall-clock store over a migrated SQLite connection
pub struct SqliteWallClockStore {
    conn: Connection,
}

impl SqliteWallClockStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, applying pending migrations
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Insert a record with its own id inside a caller-owned transaction
    pub fn insert_record_tx(tx: &Transaction, record: &StoredRecord) -> Result<()> {
        tx.execute(
            "INSERT INTO wall_clock_records (id, url, wall_clock) VALUES (?1, ?2, ?3)",
            rusqlite::params![record.id.0, record.url, record.wall_clock.to_string()],
        )
        .map_err(|e| from_insert(record.id, e))?;
        Ok(())
    }

    /// Raw digits of a record exactly as the column holds them
    pub fn raw_wall_clock(&self, id: RecordId) -> Result<String> {
        self.conn
            .query_row(
                "SELECT wall_clock FROM wall_clock_records WHERE id = ?1",
                [id.0],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?
            .ok_or_else(|| record_not_found(id))
    }
}

type RawRecord = (i64, Option<String>, String);

fn read_raw(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn hydrate((id, url, wall_clock): RawRecord) -> Result<StoredRecord> {
    let wall_clock = WallClockValue::parse(&wall_clock)
        .map_err(|e| ExError::from(e).with_op("hydrate").with_record_id(id))?;
    Ok(StoredRecord {
        id: RecordId(id),
        wall_clock,
        url,
    })
}

impl WallClockStore for SqliteWallClockStore {
    fn insert(&mut self, wall_clock: WallClockValue) -> StoreResult<RecordId> {
        self.conn
            .execute(
                "INSERT INTO wall_clock_records (wall_clock) VALUES (?1)",
                [wall_clock.to_string()],
            )
            .map_err(from_rusqlite)?;
        let id = RecordId(self.conn.last_insert_rowid());
        tracing::debug!(record_id = id.0, %wall_clock, "sqlite store insert");
        Ok(id)
    }

    fn insert_with_id(&mut self, record: StoredRecord) -> StoreResult<()> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        Self::insert_record_tx(&tx, &record)?;
        tx.commit().map_err(from_rusqlite)
    }

    fn get(&self, id: RecordId) -> StoreResult<StoredRecord> {
        let raw = self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), [id.0], read_raw)
            .optional()
            .map_err(from_rusqlite)?
            .ok_or_else(|| record_not_found(id))?;
        hydrate(raw)
    }

    fn update_non_temporal_field(
        &mut self,
        id: RecordId,
        field: NonTemporalField,
    ) -> StoreResult<()> {
        let changed = match field {
            NonTemporalField::Url(url) => self
                .conn
                .execute(
                    "UPDATE wall_clock_records SET url = ?1 WHERE id = ?2",
                    rusqlite::params![url, id.0],
                )
                .map_err(from_rusqlite)?,
        };
        if changed == 0 {
            return Err(record_not_found(id).with_op("update_non_temporal_field"));
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<StoredRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], read_raw)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;
        rows.into_iter().map(hydrate).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonelens_core::errors::ExErrorKind;

    #[test]
    fn test_insert_assigns_ids_after_seeded_rows() {
        let mut store = SqliteWallClockStore::open_in_memory().unwrap();
        store
            .insert_with_id(StoredRecord::new(
                RecordId(10),
                "2020-01-01 13:00:00".parse().unwrap(),
            ))
            .unwrap();

        let id = store.insert("2020-01-02 00:00:00".parse().unwrap()).unwrap();

        assert_eq!(id, RecordId(11));
    }

    #[test]
    fn test_corrupt_digits_surface_as_invalid_wall_clock() {
        let store = SqliteWallClockStore::open_in_memory().unwrap();
        store
            .connection()
            .execute(
                "INSERT INTO wall_clock_records (id, wall_clock) VALUES (1, 'yesterday')",
                [],
            )
            .unwrap();

        let err = store.get(RecordId(1)).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::InvalidWallClock);
        assert_eq!(err.record_id(), Some(1));
    }
}
