//! Round-trip verification
//!
//! A verifier drives the codec and a store through a scenario: the value is
//! converted under the write settings, stored, fetched, and converted back
//! under the read settings. The client zone for each phase is set through the
//! [`ZoneRegistry`] inside a scenario guard, so the registry is back at its
//! baseline once the scenario finishes, fails, or panics.
//!
//! A displayed value that differs from the expectation is reported as a
//! failed [`RoundTripOutcome`], not an error; errors are reserved for the
//! store and codec failing outright.

mod scenario;

pub use scenario::{
    ReadScenario, RoundTripOutcome, Scenario, ScenarioEntry, SuiteCase, SuiteReport, ZoneSetting,
    ZoneSettingEntry,
};

use zonelens_core_types::{RequestContext, TraceId};

use crate::codec::TemporalCodec;
use crate::errors::ExError;
use crate::model::{NonTemporalField, RecordId};
use crate::ops::{StoreResult, WallClockStore};
use crate::registry::ZoneRegistry;
use crate::{log_op_end, log_op_error, log_op_start};

pub struct RoundTripVerifier<'r, S: WallClockStore> {
    registry: &'r ZoneRegistry,
    store: S,
    trace_id: Option<TraceId>,
}

impl<'r, S: WallClockStore> RoundTripVerifier<'r, S> {
    pub fn new(registry: &'r ZoneRegistry, store: S) -> Self {
        Self {
            registry,
            store,
            trace_id: None,
        }
    }

    /// Tag every request issued by this verifier with a trace
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn context(&self) -> RequestContext {
        match &self.trace_id {
            Some(trace_id) => RequestContext::child_of(trace_id),
            None => RequestContext::new(),
        }
    }

    /// Write `scenario.input`, read it back, and compare with `expected`
    ///
    /// # Errors
    ///
    /// Store failures, or `InvalidWallClock` if a conversion leaves the
    /// supported year range. A mismatch is not an error.
    pub fn verify(&mut self, scenario: &Scenario) -> StoreResult<RoundTripOutcome> {
        let ctx = self.context();
        log_op_start!(
            "verify_round_trip",
            scenario = scenario.name.as_str(),
            request_id = ctx.request_id.as_str()
        );
        let start = std::time::Instant::now();

        let outcome = self.verify_impl(scenario, &ctx).map_err(|e| {
            let e = attach_context(e, &ctx);
            log_op_error!(
                "verify_round_trip",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                scenario = scenario.name.as_str()
            );
            e
        })?;

        log_op_end!(
            "verify_round_trip",
            duration_ms = start.elapsed().as_millis() as u64,
            scenario = scenario.name.as_str(),
            record_id = outcome.record_id.0,
            passed = outcome.passed
        );
        Ok(outcome)
    }

    fn verify_impl(
        &mut self,
        scenario: &Scenario,
        ctx: &RequestContext,
    ) -> StoreResult<RoundTripOutcome> {
        let registry = self.registry;
        let guard = registry.begin_scenario();

        guard.set_zone(scenario.write.client_zone);
        let writer_zone = guard.current_client_zone();
        let input_kind = TemporalCodec::classify(scenario.input, writer_zone);
        let digits =
            TemporalCodec::to_stored_digits(scenario.input, writer_zone, &scenario.write.profile)?;

        let record_id = self.store.insert(digits)?;
        let stored_digits = self.store.get_wall_clock(record_id)?;

        guard.set_zone(scenario.read.client_zone);
        let reader_zone = guard.current_client_zone();
        let displayed =
            TemporalCodec::from_stored_digits(stored_digits, reader_zone, &scenario.read.profile)?;

        Ok(RoundTripOutcome {
            scenario: scenario.name.clone(),
            request_id: ctx.request_id.clone(),
            record_id,
            input_kind: Some(input_kind),
            stored_digits,
            stored_kind: TemporalCodec::classify(
                stored_digits,
                scenario.read.profile.effective_zone(),
            ),
            displayed,
            expected: scenario.expected,
            passed: displayed == scenario.expected,
        })
    }

    /// Read digits already in the store and compare with `expected`
    ///
    /// # Errors
    ///
    /// `NotFound` if the record is missing, otherwise as [`Self::verify`].
    pub fn verify_read(&self, scenario: &ReadScenario) -> StoreResult<RoundTripOutcome> {
        let ctx = self.context();
        log_op_start!(
            "verify_read",
            scenario = scenario.name.as_str(),
            record_id = scenario.record_id.0,
            request_id = ctx.request_id.as_str()
        );
        let start = std::time::Instant::now();

        let outcome = self.verify_read_impl(scenario, &ctx).map_err(|e| {
            let e = attach_context(e, &ctx);
            log_op_error!(
                "verify_read",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                scenario = scenario.name.as_str()
            );
            e
        })?;

        log_op_end!(
            "verify_read",
            duration_ms = start.elapsed().as_millis() as u64,
            scenario = scenario.name.as_str(),
            passed = outcome.passed
        );
        Ok(outcome)
    }

    fn verify_read_impl(
        &self,
        scenario: &ReadScenario,
        ctx: &RequestContext,
    ) -> StoreResult<RoundTripOutcome> {
        let guard = self.registry.begin_scenario();
        let stored_digits = self.store.get_wall_clock(scenario.record_id)?;

        guard.set_zone(scenario.read.client_zone);
        let displayed = TemporalCodec::from_stored_digits(
            stored_digits,
            guard.current_client_zone(),
            &scenario.read.profile,
        )?;

        Ok(RoundTripOutcome {
            scenario: scenario.name.clone(),
            request_id: ctx.request_id.clone(),
            record_id: scenario.record_id,
            input_kind: None,
            stored_digits,
            stored_kind: TemporalCodec::classify(
                stored_digits,
                scenario.read.profile.effective_zone(),
            ),
            displayed,
            expected: scenario.expected,
            passed: displayed == scenario.expected,
        })
    }

    /// Like [`Self::verify`], but a mismatch is an error
    ///
    /// # Errors
    ///
    /// `RoundTripMismatch` when the displayed value differs from `expected`.
    pub fn verify_strict(&mut self, scenario: &Scenario) -> StoreResult<RoundTripOutcome> {
        self.verify(scenario)?
            .into_result()
            .map_err(|e| ExError::from(e).with_zone(scenario.read.client_zone.name()))
    }

    /// # Errors
    ///
    /// As [`Self::verify`] or [`Self::verify_read`].
    pub fn verify_case(&mut self, case: &SuiteCase) -> StoreResult<RoundTripOutcome> {
        match case {
            SuiteCase::RoundTrip(scenario) => self.verify(scenario),
            SuiteCase::Read(scenario) => self.verify_read(scenario),
        }
    }

    /// Run every case in order under one trace
    ///
    /// Failed comparisons are collected in the report. The first store or
    /// codec error stops the run.
    ///
    /// # Errors
    ///
    /// As [`Self::verify_case`].
    pub fn verify_suite(&mut self, cases: &[SuiteCase]) -> StoreResult<SuiteReport> {
        let trace_id = self.trace_id.get_or_insert_with(TraceId::new).clone();
        log_op_start!(
            "verify_suite",
            trace_id = trace_id.as_str(),
            cases = cases.len()
        );
        let start = std::time::Instant::now();

        let mut outcomes = Vec::with_capacity(cases.len());
        for case in cases {
            match self.verify_case(case) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    log_op_error!(
                        "verify_suite",
                        e.clone(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        scenario = case.name()
                    );
                    return Err(e);
                }
            }
        }

        let report = SuiteReport { trace_id, outcomes };
        log_op_end!(
            "verify_suite",
            duration_ms = start.elapsed().as_millis() as u64,
            passed = report.passed(),
            failed = report.failed()
        );
        Ok(report)
    }

    /// Update a non-temporal field and report whether the digits survived
    ///
    /// # Errors
    ///
    /// `NotFound` if the record is missing.
    pub fn verify_update_invariance(
        &mut self,
        id: RecordId,
        field: NonTemporalField,
    ) -> StoreResult<bool> {
        let before = self.store.get_wall_clock(id)?;
        self.store.update_non_temporal_field(id, field)?;
        let after = self.store.get_wall_clock(id)?;
        if before != after {
            tracing::warn!(record_id = id.0, %before, %after, "update changed stored digits");
        }
        Ok(before == after)
    }
}

fn attach_context(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;
    use crate::model::{WallClockValue, ZoneLabel};
    use crate::ops::MemoryStore;

    fn wc(text: &str) -> WallClockValue {
        text.parse().unwrap()
    }

    fn setting(client: &str, asserted: Option<&str>, server: &str) -> ZoneSetting {
        ZoneSetting::new(client, asserted, server).unwrap()
    }

    #[test]
    fn test_registry_restored_after_verify() {
        let registry = ZoneRegistry::new(ZoneLabel::utc());
        let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

        let scenario = Scenario::stable(
            "paris",
            setting("Europe/Paris", None, "Europe/London"),
            wc("2020-01-01 13:00:00"),
            wc("2020-01-01 13:00:00"),
        );
        let outcome = verifier.verify(&scenario).unwrap();

        assert!(outcome.passed);
        assert_eq!(outcome.stored_digits, wc("2020-01-01 12:00:00"));
        assert_eq!(registry.current_client_zone(), ZoneLabel::utc());
    }

    #[test]
    fn test_missing_record_carries_request_id() {
        let registry = ZoneRegistry::new(ZoneLabel::utc());
        let verifier = RoundTripVerifier::new(&registry, MemoryStore::new())
            .with_trace_id(TraceId::new());

        let err = verifier
            .verify_read(&ReadScenario {
                name: "missing".to_string(),
                record_id: RecordId(42),
                read: setting("UTC", None, "UTC"),
                expected: wc("2020-01-01 00:00:00"),
            })
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert!(err.request_id().is_some());
        assert!(err.trace_id().is_some());
    }

    #[test]
    fn test_strict_turns_mismatch_into_error() {
        let registry = ZoneRegistry::new(ZoneLabel::utc());
        let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

        let scenario = Scenario {
            name: "shift".to_string(),
            write: setting("US/Eastern", None, "Europe/London"),
            input: wc("2020-01-01 13:00:00"),
            read: setting("US/Eastern", Some("US/Eastern"), "Europe/London"),
            expected: wc("2020-01-01 13:00:00"),
        };

        let err = verifier.verify_strict(&scenario).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::RoundTripMismatch);
    }
}
