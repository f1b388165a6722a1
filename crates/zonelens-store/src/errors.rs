//! Error handling for zonelens-store
//!
//! Wraps zonelens-core ExError with store-specific helpers

use zonelens_core::errors::{ExError, ExErrorKind};
use zonelens_core::model::RecordId;
use zonelens_core::ZoneLensError;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a seed validation error
pub fn seed_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("seed_parse")
        .with_message(reason.to_string())
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map an insert failure, reporting a primary-key clash as `AlreadyExists`
pub fn from_insert(id: RecordId, err: rusqlite::Error) -> ExError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            ExError::from(ZoneLensError::RecordAlreadyExists { record_id: id.0 }).with_op("insert")
        }
        _ => from_rusqlite(err).with_record_id(id.0),
    }
}

/// Create a record-not-found error
pub fn record_not_found(id: RecordId) -> ExError {
    ExError::from(ZoneLensError::RecordNotFound { record_id: id.0 }).with_op("get")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_failure_is_persistence() {
        let err = from_insert(RecordId(4), rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.record_id(), Some(4));
    }

    fn constraint_failure(extended_code: std::os::raw::c_int) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(extended_code), None)
    }

    #[test]
    fn test_primary_key_clash_is_already_exists() {
        let err = from_insert(
            RecordId(1),
            constraint_failure(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY),
        );
        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert_eq!(err.record_id(), Some(1));
    }

    #[test]
    fn test_other_constraint_is_persistence() {
        let err = from_insert(
            RecordId(2),
            constraint_failure(rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL),
        );
        assert_eq!(err.kind(), ExErrorKind::Persistence);
        assert_eq!(err.record_id(), Some(2));
    }
}
