//! Provenance event tracking for seed imports
//!
//! Records events in the provenance_events table, correlated by seed digest

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvenanceKind {
    ImportStarted,
    RecordApplied,
    ImportCompleted,
}

impl ProvenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceKind::ImportStarted => "seed_import_started",
            ProvenanceKind::RecordApplied => "seed_record_applied",
            ProvenanceKind::ImportCompleted => "seed_import_completed",
        }
    }
}

/// Emit a provenance event
///
/// Accepts a plain connection or, through deref, an open transaction.
pub fn emit_event(
    conn: &Connection,
    kind: ProvenanceKind,
    correlation_id: &str,
    metadata: serde_json::Value,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO provenance_events (kind, correlation_id, timestamp, metadata) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![kind.as_str(), correlation_id, now, metadata.to_string()],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

pub fn emit_started(conn: &Connection, seed_digest: &str, source: &str) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportStarted,
        seed_digest,
        json!({ "seed_digest": seed_digest, "source": source }),
    )
}

pub fn emit_applied(conn: &Connection, seed_digest: &str, record_id: i64) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::RecordApplied,
        seed_digest,
        json!({ "record_id": record_id }),
    )
}

pub fn emit_completed(conn: &Connection, seed_digest: &str, records: usize) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportCompleted,
        seed_digest,
        json!({ "seed_digest": seed_digest, "records": records }),
    )
}

/// Event kinds recorded for a digest, oldest first
pub fn events_for(conn: &Connection, seed_digest: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT kind FROM provenance_events WHERE correlation_id = ?1 ORDER BY id")
        .map_err(from_rusqlite)?;
    let kinds = stmt
        .query_map([seed_digest], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;

    #[test]
    fn test_emit_event() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrations::apply_migrations(&mut conn).unwrap();

        emit_started(&conn, "abc123", "inline").unwrap();
        emit_completed(&conn, "abc123", 0).unwrap();

        assert_eq!(
            events_for(&conn, "abc123").unwrap(),
            vec!["seed_import_started", "seed_import_completed"]
        );
    }
}
