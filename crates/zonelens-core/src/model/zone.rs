use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ZoneLensError};

/// Environment variable consulted for the host's default zone
pub const HOST_ZONE_ENV: &str = "TZ";

/// An IANA zone identifier resolved against the bundled tz database
///
/// Resolution happens when the label is accepted; offsets are still looked
/// up per date at conversion time. Link names (`US/Eastern`) keep their
/// spelling but share the rules of their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneLabel(Tz);

impl ZoneLabel {
    /// Resolve a label
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if the label is not in the tz database.
    pub fn parse(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        trimmed
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| ZoneLensError::UnknownZone {
                label: trimmed.to_string(),
            })
    }

    pub fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// Zone named by a `TZ` value
    ///
    /// A leading `:` is ignored, as POSIX allows. An unset value means UTC.
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if the value names no IANA zone.
    pub fn from_tz_value(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(raw) => Self::parse(raw.trim_start_matches(':')),
            None => Ok(Self::utc()),
        }
    }

    /// Zone the host process runs in, read from `TZ`
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if `TZ` is set but names no IANA zone.
    pub fn host_default() -> Result<Self> {
        Self::from_tz_value(std::env::var(HOST_ZONE_ENV).ok().as_deref())
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn tz(&self) -> Tz {
        self.0
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZoneLabel {
    type Err = ZoneLensError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ZoneLabel {
    type Error = ZoneLensError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ZoneLabel> for String {
    fn from(value: ZoneLabel) -> Self {
        value.name().to_string()
    }
}
