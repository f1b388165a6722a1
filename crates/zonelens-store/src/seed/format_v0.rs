//! Seed Format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! records:
//!   - id: 1
//!     wall_clock: "2020-01-01 13:00:00"
//!     url: "https://example.org/a"
//! scenarios:
//!   - name: paris-reads-london
//!     record: 1
//!     read: { client_zone: Europe/Paris, server_zone: Europe/London }
//!     expected: "2020-01-01 14:00:00"
//! ```

use serde::{Deserialize, Serialize};
use zonelens_core::errors::Result;
use zonelens_core::model::{RecordId, StoredRecord, WallClockValue};
use zonelens_core::verifier::{ScenarioEntry, SuiteCase};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Rows to insert with their ids
    #[serde(default)]
    pub records: Vec<SeedRecord>,

    /// Verification scenarios
    #[serde(default)]
    pub scenarios: Vec<ScenarioEntry>,
}

/// Row definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedRecord {
    pub id: i64,

    /// Zone-naive digits, `YYYY-MM-DD HH:MM:SS`
    pub wall_clock: String,

    #[serde(default)]
    pub url: Option<String>,
}

impl SeedRecord {
    pub fn to_stored(&self) -> Result<StoredRecord> {
        Ok(StoredRecord {
            id: RecordId(self.id),
            wall_clock: WallClockValue::parse(&self.wall_clock)?,
            url: self.url.clone(),
        })
    }
}

impl SeedV0 {
    /// Records in file order
    pub fn stored_records(&self) -> Result<Vec<StoredRecord>> {
        self.records.iter().map(SeedRecord::to_stored).collect()
    }

    /// Scenarios in file order
    pub fn suite_cases(&self) -> Result<Vec<SuiteCase>> {
        self.scenarios.iter().map(ScenarioEntry::resolve).collect()
    }
}
