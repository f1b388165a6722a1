//! zonelens core - time zone conversion model for zone-naive storage
//!
//! A client thinks in wall-clock values in its own zone; a store keeps
//! zone-naive digits; the connection between them may assert a zone that
//! differs from the one the server runs in. This crate provides:
//! - Zone labels and wall-clock values resolved eagerly against the tz database
//! - The process-wide client zone registry with guarded scenarios
//! - Connection profiles (server zone plus optional asserted zone)
//! - The temporal codec with a deterministic gap and fold policy
//! - The wall-clock store boundary and an in-memory store
//! - Round-trip verification of write/read scenarios

pub mod codec;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod profile;
pub mod registry;
pub mod verifier;

// Re-export commonly used types
pub use codec::{LocalTimeKind, TemporalCodec};
pub use errors::{ExError, ExErrorKind, Result, ZoneLensError};
pub use model::{NonTemporalField, RecordId, StoredRecord, WallClockValue, ZoneLabel};
pub use ops::{MemoryStore, StoreResult, WallClockStore};
pub use profile::ConnectionProfile;
pub use registry::{ScenarioGuard, ZoneRegistry, ZoneSnapshot};
pub use verifier::{
    ReadScenario, RoundTripOutcome, RoundTripVerifier, Scenario, ScenarioEntry, SuiteCase,
    SuiteReport, ZoneSetting, ZoneSettingEntry,
};
