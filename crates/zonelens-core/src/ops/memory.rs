use std::collections::BTreeMap;

use crate::errors::{ExError, ExErrorKind, ZoneLensError};
use crate::model::{NonTemporalField, RecordId, StoredRecord, WallClockValue};
use crate::ops::store::{StoreResult, WallClockStore};

/// BTreeMap-backed store
///
/// Ids are assigned from a counter that starts at 1 and always moves past
/// the largest id seen, including ids supplied through `insert_with_id`.
/// Once `i64::MAX` is taken, `insert` fails with `ERR_PERSISTENCE` like an
/// AUTOINCREMENT table does.
/// Not thread-safe - designed for single-threaded use.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: BTreeMap<RecordId, StoredRecord>,
    /// `None` once the id space is exhausted
    next_id: Option<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: Some(1),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn id_space_exhausted() -> ExError {
        ExError::new(ExErrorKind::Persistence)
            .with_op("insert")
            .with_message("record id space exhausted")
    }

    fn record_mut(&mut self, id: RecordId) -> StoreResult<&mut StoredRecord> {
        self.records
            .get_mut(&id)
            .ok_or_else(|| ZoneLensError::RecordNotFound { record_id: id.0 }.into())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClockStore for MemoryStore {
    fn insert(&mut self, wall_clock: WallClockValue) -> StoreResult<RecordId> {
        let id = RecordId(self.next_id.ok_or_else(Self::id_space_exhausted)?);
        self.next_id = id.0.checked_add(1);
        self.records.insert(id, StoredRecord::new(id, wall_clock));
        tracing::debug!(record_id = id.0, %wall_clock, "memory store insert");
        Ok(id)
    }

    fn insert_with_id(&mut self, record: StoredRecord) -> StoreResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(ZoneLensError::RecordAlreadyExists {
                record_id: record.id.0,
            }
            .into());
        }
        if let Some(next) = self.next_id {
            if record.id.0 >= next {
                self.next_id = record.id.0.checked_add(1);
            }
        }
        self.records.insert(record.id, record);
        Ok(())
    }

    fn get(&self, id: RecordId) -> StoreResult<StoredRecord> {
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| ZoneLensError::RecordNotFound { record_id: id.0 }.into())
    }

    fn update_non_temporal_field(
        &mut self,
        id: RecordId,
        field: NonTemporalField,
    ) -> StoreResult<()> {
        let record = self.record_mut(id)?;
        match field {
            NonTemporalField::Url(url) => record.url = url,
        }
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<StoredRecord>> {
        Ok(self.records.values().cloned().collect())
    }
}
