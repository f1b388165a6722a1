//! Storage boundary for zone-naive wall-clock digits
//!
//! A store keeps exactly the digits it is given, with no zone metadata, the
//! way a `DATETIME`/`TIMESTAMP WITHOUT TIME ZONE` column does. Errors are
//! returned as the backend raised them; nothing here retries or masks them.

use crate::errors::ExError;
use crate::model::{NonTemporalField, RecordId, StoredRecord, WallClockValue};

pub type StoreResult<T> = std::result::Result<T, ExError>;

pub trait WallClockStore {
    /// Store digits verbatim under a fresh id
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn insert(&mut self, wall_clock: WallClockValue) -> StoreResult<RecordId>;

    /// Store a fully specified record, keeping its id
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the id is taken.
    fn insert_with_id(&mut self, record: StoredRecord) -> StoreResult<()>;

    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    fn get(&self, id: RecordId) -> StoreResult<StoredRecord>;

    /// Change a non-temporal field; the stored digits are never touched
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    fn update_non_temporal_field(
        &mut self,
        id: RecordId,
        field: NonTemporalField,
    ) -> StoreResult<()>;

    /// All records in ascending id order
    ///
    /// # Errors
    ///
    /// Backend failures only.
    fn list(&self) -> StoreResult<Vec<StoredRecord>>;

    /// # Errors
    ///
    /// `NotFound` if no record has this id.
    fn get_wall_clock(&self, id: RecordId) -> StoreResult<WallClockValue> {
        self.get(id).map(|record| record.wall_clock)
    }
}

impl<S: WallClockStore + ?Sized> WallClockStore for Box<S> {
    fn insert(&mut self, wall_clock: WallClockValue) -> StoreResult<RecordId> {
        (**self).insert(wall_clock)
    }

    fn insert_with_id(&mut self, record: StoredRecord) -> StoreResult<()> {
        (**self).insert_with_id(record)
    }

    fn get(&self, id: RecordId) -> StoreResult<StoredRecord> {
        (**self).get(id)
    }

    fn update_non_temporal_field(
        &mut self,
        id: RecordId,
        field: NonTemporalField,
    ) -> StoreResult<()> {
        (**self).update_non_temporal_field(id, field)
    }

    fn list(&self) -> StoreResult<Vec<StoredRecord>> {
        (**self).list()
    }
}
