//! Wall-clock ⇄ instant conversion under client, asserted and server zones
//!
//! # Resolution policy
//!
//! A local time is turned into an instant with one global rule, whatever
//! store sits behind the codec:
//!
//! - **Unique**: the single matching instant.
//! - **Fold** (fall back, the local time occurs twice): the earlier instant,
//!   i.e. the offset in force before the transition.
//! - **Gap** (spring forward, the local time never occurs): the offset in
//!   force before the transition. The instant lands after the transition, so
//!   rendering it back in the same zone moves the time forward by the gap
//!   length (`Europe/London` 2018-03-25 01:31:04 becomes 02:31:04 BST).
//!
//! Neither case is an error.

use chrono::{DateTime, Duration, LocalResult, Offset, TimeZone, Utc};
use serde::Serialize;

use crate::errors::Result;
use crate::model::{WallClockValue, ZoneLabel};
use crate::profile::ConnectionProfile;

/// How a local time maps onto the time line in a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalTimeKind {
    Unique,
    /// Occurs twice; the earlier occurrence is used
    Ambiguous,
    /// Skipped by a forward transition; the pre-transition offset is used
    Gap,
}

/// Stateless conversion engine
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalCodec;

impl TemporalCodec {
    /// Write path: client wall-clock → digits physically stored
    ///
    /// The value is read in `client_zone`, and the instant is rendered in the
    /// profile's asserted zone, or its server zone when nothing is asserted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWallClock` only when the rendered digits fall outside
    /// the supported year range (inputs within a day of its ends).
    pub fn to_stored_digits(
        value: WallClockValue,
        client_zone: ZoneLabel,
        profile: &ConnectionProfile,
    ) -> Result<WallClockValue> {
        let instant = Self::to_instant(value, client_zone);
        let digits = Self::from_instant(instant, profile.effective_zone())?;
        tracing::trace!(
            input = %value,
            client_zone = %client_zone,
            wire_zone = %profile.effective_zone(),
            digits = %digits,
            "to_stored_digits"
        );
        Ok(digits)
    }

    /// Read path: stored digits → wall-clock shown in the client zone
    ///
    /// # Errors
    ///
    /// Same range condition as [`TemporalCodec::to_stored_digits`].
    pub fn from_stored_digits(
        digits: WallClockValue,
        client_zone: ZoneLabel,
        profile: &ConnectionProfile,
    ) -> Result<WallClockValue> {
        let instant = Self::to_instant(digits, profile.effective_zone());
        let displayed = Self::from_instant(instant, client_zone)?;
        tracing::trace!(
            digits = %digits,
            wire_zone = %profile.effective_zone(),
            client_zone = %client_zone,
            displayed = %displayed,
            "from_stored_digits"
        );
        Ok(displayed)
    }

    /// Resolve a local time in `zone` to an instant under the module policy
    pub fn to_instant(value: WallClockValue, zone: ZoneLabel) -> DateTime<Utc> {
        let tz = zone.tz();
        let naive = value.as_naive();
        match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                let before = Self::offset_before_gap(value, zone);
                Utc.from_utc_datetime(&(naive - Duration::seconds(i64::from(before))))
            }
        }
    }

    /// Render an instant as wall-clock digits in `zone`
    ///
    /// # Errors
    ///
    /// Returns `InvalidWallClock` if the local year is out of range.
    pub fn from_instant(instant: DateTime<Utc>, zone: ZoneLabel) -> Result<WallClockValue> {
        WallClockValue::from_naive(instant.with_timezone(&zone.tz()).naive_local())
    }

    /// Classify a local time in `zone`
    pub fn classify(value: WallClockValue, zone: ZoneLabel) -> LocalTimeKind {
        match zone.tz().from_local_datetime(&value.as_naive()) {
            LocalResult::Single(_) => LocalTimeKind::Unique,
            LocalResult::Ambiguous(_, _) => LocalTimeKind::Ambiguous,
            LocalResult::None => LocalTimeKind::Gap,
        }
    }

    /// UTC offset, in seconds, in force just before the gap containing `value`
    ///
    /// Probes one day earlier; assumes no second transition within that day.
    fn offset_before_gap(value: WallClockValue, zone: ZoneLabel) -> i32 {
        let probe = value.as_naive() - Duration::days(1);
        zone.tz()
            .offset_from_utc_datetime(&probe)
            .fix()
            .local_minus_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str) -> ZoneLabel {
        ZoneLabel::parse(name).unwrap()
    }

    fn wc(text: &str) -> WallClockValue {
        text.parse().unwrap()
    }

    #[test]
    fn test_classify_london_transitions() {
        let london = zone("Europe/London");
        assert_eq!(
            TemporalCodec::classify(wc("2020-01-01 13:00:00"), london),
            LocalTimeKind::Unique
        );
        assert_eq!(
            TemporalCodec::classify(wc("2018-03-25 01:31:04"), london),
            LocalTimeKind::Gap
        );
        assert_eq!(
            TemporalCodec::classify(wc("2018-10-28 01:30:00"), london),
            LocalTimeKind::Ambiguous
        );
    }

    #[test]
    fn test_gap_uses_offset_before_transition() {
        let instant = TemporalCodec::to_instant(wc("2018-03-25 01:31:04"), zone("Europe/London"));
        assert_eq!(
            TemporalCodec::from_instant(instant, ZoneLabel::utc()).unwrap(),
            wc("2018-03-25 01:31:04")
        );
        assert_eq!(
            TemporalCodec::from_instant(instant, zone("Europe/London")).unwrap(),
            wc("2018-03-25 02:31:04")
        );
    }

    #[test]
    fn test_fold_uses_earlier_instant() {
        let instant = TemporalCodec::to_instant(wc("2018-10-28 01:30:00"), zone("Europe/London"));
        assert_eq!(
            TemporalCodec::from_instant(instant, ZoneLabel::utc()).unwrap(),
            wc("2018-10-28 00:30:00")
        );
    }

    #[test]
    fn test_rendering_past_year_9999_fails() {
        let profile = ConnectionProfile::unasserted(zone("Asia/Tokyo"));
        let result =
            TemporalCodec::to_stored_digits(wc("9999-12-31 23:00:00"), ZoneLabel::utc(), &profile);
        assert!(matches!(
            result,
            Err(crate::errors::ZoneLensError::InvalidWallClock { .. })
        ));
    }
}
