//! Process-wide client zone with explicit save/restore
//!
//! The registry stands in for a runtime's mutable "default time zone". Reads
//! are cheap and concurrent; a scenario that mutates the zone takes the
//! scenario lock through [`ZoneRegistry::begin_scenario`], which restores the
//! prior zone when the guard drops.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, RwLock};

use crate::errors::Result;
use crate::model::ZoneLabel;

/// Saved registry state, restorable with [`ZoneRegistry::restore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a snapshot does nothing unless passed to restore()"]
pub struct ZoneSnapshot(ZoneLabel);

impl ZoneSnapshot {
    pub fn zone(&self) -> ZoneLabel {
        self.0
    }
}

#[derive(Debug)]
pub struct ZoneRegistry {
    current: RwLock<ZoneLabel>,
    scenario: Mutex<()>,
}

static GLOBAL: OnceLock<ZoneRegistry> = OnceLock::new();

impl ZoneRegistry {
    pub fn new(initial: ZoneLabel) -> Self {
        Self {
            current: RwLock::new(initial),
            scenario: Mutex::new(()),
        }
    }

    /// Registry seeded with the host's default zone
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if `TZ` names no IANA zone.
    pub fn from_host() -> Result<Self> {
        Ok(Self::new(ZoneLabel::host_default()?))
    }

    /// The process-wide registry, initialised from the host on first use
    ///
    /// Starts at UTC when `TZ` names no IANA zone. Callers that must report
    /// a bad `TZ` check [`ZoneLabel::host_default`] first.
    pub fn global() -> &'static ZoneRegistry {
        GLOBAL.get_or_init(|| Self::from_host().unwrap_or_else(|_| Self::new(ZoneLabel::utc())))
    }

    /// Replace the current client zone
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if the label does not resolve; the registry is
    /// left unchanged.
    pub fn set_client_zone(&self, label: &str) -> Result<ZoneLabel> {
        let zone = ZoneLabel::parse(label)?;
        self.set_zone(zone);
        Ok(zone)
    }

    pub fn set_zone(&self, zone: ZoneLabel) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(from = %*current, to = %zone, "client zone changed");
        *current = zone;
    }

    pub fn current_client_zone(&self) -> ZoneLabel {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot(self.current_client_zone())
    }

    pub fn restore(&self, snapshot: ZoneSnapshot) {
        self.set_zone(snapshot.0);
    }

    /// Enter a zone-mutating scenario
    ///
    /// Blocks until no other scenario is active. The returned guard restores
    /// the zone captured here when dropped. Calling this again on the same
    /// thread while a guard is alive deadlocks.
    pub fn begin_scenario(&self) -> ScenarioGuard<'_> {
        let lock = self
            .scenario
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        ScenarioGuard {
            registry: self,
            baseline: self.snapshot(),
            _lock: lock,
        }
    }
}

/// Exclusive access to the registry for one scenario
pub struct ScenarioGuard<'r> {
    registry: &'r ZoneRegistry,
    baseline: ZoneSnapshot,
    _lock: MutexGuard<'r, ()>,
}

impl ScenarioGuard<'_> {
    /// # Errors
    ///
    /// Returns `UnknownZone` if the label does not resolve.
    pub fn set_client_zone(&self, label: &str) -> Result<ZoneLabel> {
        self.registry.set_client_zone(label)
    }

    pub fn set_zone(&self, zone: ZoneLabel) {
        self.registry.set_zone(zone);
    }

    pub fn current_client_zone(&self) -> ZoneLabel {
        self.registry.current_client_zone()
    }

    /// Zone that will be restored on drop
    pub fn baseline(&self) -> ZoneLabel {
        self.baseline.zone()
    }
}

impl Drop for ScenarioGuard<'_> {
    fn drop(&mut self) {
        self.registry.restore(self.baseline);
    }
}
