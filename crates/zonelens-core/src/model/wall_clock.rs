use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZoneLensError};

/// Canonical text form, matching what a zone-naive `DATETIME` column prints
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Earliest and latest years a wall-clock value may carry
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A calendar date and time of day with no zone or offset attached
///
/// Second precision. Ordering is chronological on the digits alone, which
/// says nothing about the instants two values denote in different zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallClockValue(NaiveDateTime);

impl WallClockValue {
    /// Build a value from its fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidWallClock` if the fields do not form a valid
    /// proleptic-Gregorian date and time, or the year is outside
    /// `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ZoneLensError::InvalidWallClock {
                reason: format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
            }
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            ZoneLensError::InvalidWallClock {
                reason: format!("{:02}:{:02}:{:02} is not a time of day", hour, minute, second),
            }
        })?;
        Self::from_naive(NaiveDateTime::new(date, time))
    }

    /// Wrap a chrono value, truncating sub-second precision
    ///
    /// # Errors
    ///
    /// Returns `InvalidWallClock` if the year is out of range.
    pub fn from_naive(naive: NaiveDateTime) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&naive.year()) {
            return Err(ZoneLensError::InvalidWallClock {
                reason: format!(
                    "year {} is outside {}..={}",
                    naive.year(),
                    MIN_YEAR,
                    MAX_YEAR
                ),
            });
        }
        let truncated = naive.with_nanosecond(0).unwrap_or(naive);
        Ok(Self(truncated))
    }

    /// Parse `YYYY-MM-DD HH:MM:SS` (the `T` separator is also accepted)
    ///
    /// # Errors
    ///
    /// Returns `InvalidWallClock` on malformed input.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let naive = NaiveDateTime::parse_from_str(trimmed, WALL_CLOCK_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, ISO_FORMAT))
            .map_err(|e| ZoneLensError::InvalidWallClock {
                reason: format!("'{}': {}", trimmed, e),
            })?;
        Self::from_naive(naive)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for WallClockValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WALL_CLOCK_FORMAT))
    }
}

impl FromStr for WallClockValue {
    type Err = ZoneLensError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WallClockValue {
    type Error = ZoneLensError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<WallClockValue> for String {
    fn from(value: WallClockValue) -> Self {
        value.to_string()
    }
}
