//! Seed parser with validation
//!
//! Parses YAML and validates schema version, record ids, wall-clock syntax,
//! zone labels, and scenario references to records

#![allow(clippy::result_large_err)]

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use zonelens_core::errors::ExError;
use zonelens_core::verifier::SuiteCase;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    parse_seed_file_with_db(path, None)
}

/// Parse a seed file, resolving record references against the database too
pub fn parse_seed_file_with_db(path: &Path, conn: Option<&Connection>) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(&format!("Failed to read seed file {}: {}", path.display(), e)))?;

    parse_seed_str_with_db(&content, conn)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    parse_seed_str_with_db(content, None)
}

/// Parse a seed from a string with optional database context for record references
pub fn parse_seed_str_with_db(content: &str, conn: Option<&Connection>) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed, conn)?;

    Ok(seed)
}

fn invalid(context: String, err: impl Into<ExError>) -> ExError {
    let err: ExError = err.into();
    let message = format!("{}: {}", context, err.message());
    err.with_op("seed_parse").with_message(message)
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0, conn: Option<&Connection>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut ids = HashSet::new();
    for record in &seed.records {
        if record.id <= 0 {
            return Err(seed_validation(&format!(
                "Record id must be positive, got {}",
                record.id
            )));
        }
        if !ids.insert(record.id) {
            return Err(seed_validation(&format!("Duplicate record id {}", record.id)));
        }
        record
            .to_stored()
            .map_err(|e| invalid(format!("Record {}", record.id), e))?;
    }

    let mut names = HashSet::new();
    for entry in &seed.scenarios {
        if !names.insert(entry.name.as_str()) {
            return Err(seed_validation(&format!(
                "Duplicate scenario name {}",
                entry.name
            )));
        }

        let case = entry
            .resolve()
            .map_err(|e| invalid(format!("Scenario {}", entry.name), e))?;

        if let SuiteCase::Read(read) = case {
            let id = read.record_id.0;
            if !ids.contains(&id) && !record_in_db(conn, id)? {
                return Err(seed_validation(&format!(
                    "Scenario {} references non-existent record {}",
                    entry.name, id
                )));
            }
        }
    }

    Ok(())
}

fn record_in_db(conn: Option<&Connection>, id: i64) -> Result<bool> {
    let Some(conn) = conn else {
        return Ok(false);
    };
    let found = conn
        .query_row(
            "SELECT 1 FROM wall_clock_records WHERE id = ?1",
            [id],
            |_| Ok(()),
        )
        .optional()
        .map_err(crate::errors::from_rusqlite)?;
    Ok(found.is_some())
}
