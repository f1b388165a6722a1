use std::fmt;

use serde::{Deserialize, Serialize};

use super::WallClockValue;

/// Store-assigned identity of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted row: zone-naive digits plus non-temporal payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub wall_clock: WallClockValue,
    pub url: Option<String>,
}

impl StoredRecord {
    pub fn new(id: RecordId, wall_clock: WallClockValue) -> Self {
        Self {
            id,
            wall_clock,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A change to a field that carries no temporal meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonTemporalField {
    /// Replace (or clear) the record's URL
    Url(Option<String>),
}
