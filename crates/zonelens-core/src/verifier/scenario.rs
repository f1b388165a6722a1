//! Scenario definitions, their file representation, and outcomes

use serde::{Deserialize, Serialize};
use zonelens_core_types::{RequestId, TraceId};

use crate::codec::LocalTimeKind;
use crate::errors::{Result, ZoneLensError};
use crate::model::{RecordId, WallClockValue, ZoneLabel};
use crate::profile::ConnectionProfile;

/// Client zone plus connection profile in force for one phase of a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneSetting {
    pub client_zone: ZoneLabel,
    pub profile: ConnectionProfile,
}

impl ZoneSetting {
    /// # Errors
    ///
    /// `UnknownZone` for the first label that fails to resolve.
    pub fn new(client_zone: &str, asserted_zone: Option<&str>, server_zone: &str) -> Result<Self> {
        Ok(Self {
            client_zone: ZoneLabel::parse(client_zone)?,
            profile: ConnectionProfile::new(asserted_zone, server_zone)?,
        })
    }
}

/// Write a value, read it back, compare with the expectation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub write: ZoneSetting,
    pub input: WallClockValue,
    pub read: ZoneSetting,
    pub expected: WallClockValue,
}

impl Scenario {
    /// Scenario whose read phase repeats the write settings
    pub fn stable(
        name: impl Into<String>,
        setting: ZoneSetting,
        input: WallClockValue,
        expected: WallClockValue,
    ) -> Self {
        Self {
            name: name.into(),
            write: setting,
            input,
            read: setting,
            expected,
        }
    }
}

/// Read digits already in the store under some settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadScenario {
    pub name: String,
    pub record_id: RecordId,
    pub read: ZoneSetting,
    pub expected: WallClockValue,
}

/// One resolved entry of a suite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteCase {
    RoundTrip(Scenario),
    Read(ReadScenario),
}

impl SuiteCase {
    pub fn name(&self) -> &str {
        match self {
            SuiteCase::RoundTrip(s) => &s.name,
            SuiteCase::Read(s) => &s.name,
        }
    }
}

/// Zone settings as written in a suite file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSettingEntry {
    pub client_zone: String,
    pub server_zone: String,
    #[serde(default)]
    pub asserted_zone: Option<String>,
}

impl ZoneSettingEntry {
    fn resolve(&self) -> Result<ZoneSetting> {
        ZoneSetting::new(
            &self.client_zone,
            self.asserted_zone.as_deref(),
            &self.server_zone,
        )
    }
}

/// A scenario as written in a suite file
///
/// Exactly one of `input` (write then read) or `record` (read a seeded row)
/// must be present. A round trip without `read` reads back under its
/// `write` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub name: String,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub record: Option<i64>,
    #[serde(default)]
    pub write: Option<ZoneSettingEntry>,
    #[serde(default)]
    pub read: Option<ZoneSettingEntry>,
    pub expected: String,
}

impl ScenarioEntry {
    /// Validate the entry and resolve every label and value in it
    ///
    /// # Errors
    ///
    /// `UnknownZone` / `InvalidWallClock` for bad labels or values, and
    /// `InvalidScenario` for structural problems.
    pub fn resolve(&self) -> Result<SuiteCase> {
        let expected = WallClockValue::parse(&self.expected)?;
        let malformed = |reason: &str| ZoneLensError::InvalidScenario {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        match (&self.input, self.record) {
            (Some(input), None) => {
                let write = self
                    .write
                    .as_ref()
                    .ok_or_else(|| malformed("a round trip needs 'write' settings"))?
                    .resolve()?;
                let read = match &self.read {
                    Some(entry) => entry.resolve()?,
                    None => write,
                };
                Ok(SuiteCase::RoundTrip(Scenario {
                    name: self.name.clone(),
                    write,
                    input: WallClockValue::parse(input)?,
                    read,
                    expected,
                }))
            }
            (None, Some(record)) => {
                if self.write.is_some() {
                    return Err(malformed("a read of a seeded record takes no 'write' settings"));
                }
                let read = self
                    .read
                    .as_ref()
                    .ok_or_else(|| malformed("a read of a seeded record needs 'read' settings"))?
                    .resolve()?;
                Ok(SuiteCase::Read(ReadScenario {
                    name: self.name.clone(),
                    record_id: RecordId(record),
                    read,
                    expected,
                }))
            }
            (Some(_), Some(_)) => Err(malformed("'input' and 'record' are mutually exclusive")),
            (None, None) => Err(malformed("one of 'input' or 'record' is required")),
        }
    }
}

/// Result of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripOutcome {
    pub scenario: String,
    pub request_id: RequestId,
    pub record_id: RecordId,
    /// How the input sat in the writing client's zone (round trips only)
    pub input_kind: Option<LocalTimeKind>,
    pub stored_digits: WallClockValue,
    /// How the stored digits sit in the zone used to read them
    pub stored_kind: LocalTimeKind,
    pub displayed: WallClockValue,
    pub expected: WallClockValue,
    pub passed: bool,
}

impl RoundTripOutcome {
    /// Convert a failed outcome into a `RoundTripMismatch`
    ///
    /// # Errors
    ///
    /// `RoundTripMismatch` when `passed` is false.
    pub fn into_result(self) -> Result<Self> {
        if self.passed {
            Ok(self)
        } else {
            Err(ZoneLensError::RoundTripMismatch {
                scenario: self.scenario,
                expected: self.expected.to_string(),
                actual: self.displayed.to_string(),
            })
        }
    }
}

/// Outcomes of a suite run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub trace_id: TraceId,
    pub outcomes: Vec<RoundTripOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RoundTripOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}
