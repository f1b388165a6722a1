use zonelens_core::{ConnectionProfile, WallClockValue, ZoneLabel, ZoneSetting};

/// Parse a wall-clock value, panicking on malformed test input
#[allow(dead_code)]
pub fn wc(text: &str) -> WallClockValue {
    text.parse().expect("valid wall-clock literal")
}

#[allow(dead_code)]
pub fn zone(label: &str) -> ZoneLabel {
    ZoneLabel::parse(label).expect("known zone")
}

#[allow(dead_code)]
pub fn profile(asserted: Option<&str>, server: &str) -> ConnectionProfile {
    ConnectionProfile::new(asserted, server).expect("known zones")
}

#[allow(dead_code)]
pub fn setting(client: &str, asserted: Option<&str>, server: &str) -> ZoneSetting {
    ZoneSetting::new(client, asserted, server).expect("known zones")
}
