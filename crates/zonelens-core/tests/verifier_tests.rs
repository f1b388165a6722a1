#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{setting, wc, zone};
use zonelens_core::{
    ExErrorKind, LocalTimeKind, MemoryStore, NonTemporalField, ReadScenario, RecordId,
    RoundTripVerifier, Scenario, StoredRecord, SuiteCase, WallClockStore, ZoneRegistry,
};
use zonelens_core_types::TraceId;

fn registry() -> ZoneRegistry {
    ZoneRegistry::new(zone("Asia/Tokyo"))
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .insert_with_id(StoredRecord::new(RecordId(1), wc("2020-01-01 13:00:00")))
        .unwrap();
    store
        .insert_with_id(StoredRecord::new(RecordId(2), wc("2020-06-01 14:00:00")))
        .unwrap();
    store
}

#[test]
fn test_stable_round_trip_under_assertion() {
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

    for asserted in ["Europe/London", "US/Eastern", "Asia/Shanghai"] {
        let scenario = Scenario::stable(
            format!("paris-asserting-{}", asserted),
            setting("Europe/Paris", Some(asserted), "Europe/London"),
            wc("2020-01-01 13:00:00"),
            wc("2020-01-01 13:00:00"),
        );

        let outcome = verifier.verify(&scenario).unwrap();

        assert!(outcome.passed, "{:?}", outcome);
        assert_eq!(outcome.input_kind, Some(LocalTimeKind::Unique));
    }

    assert_eq!(verifier.store().len(), 3);
    assert_eq!(registry.current_client_zone(), zone("Asia/Tokyo"));
}

#[test]
fn test_semantics_shift_is_reported_as_failure() {
    // GIVEN an Eastern client writing through a London server, then reading
    // the same row with Eastern asserted
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());
    let scenario = Scenario {
        name: "assertion-added".to_string(),
        write: setting("US/Eastern", None, "Europe/London"),
        input: wc("2020-01-01 13:00:00"),
        read: setting("US/Eastern", Some("US/Eastern"), "Europe/London"),
        expected: wc("2020-01-01 13:00:00"),
    };

    // WHEN verified
    let outcome = verifier.verify(&scenario).unwrap();

    // THEN the outcome fails and shows the shifted value
    assert!(!outcome.passed);
    assert_eq!(outcome.stored_digits, wc("2020-01-01 18:00:00"));
    assert_eq!(outcome.displayed, wc("2020-01-01 18:00:00"));
}

#[test]
fn test_read_seeded_rows() {
    let registry = registry();
    let verifier = RoundTripVerifier::new(&registry, seeded_store());

    let cases = [
        (1, "Europe/Paris", None, "Europe/London", "2020-01-01 14:00:00"),
        (1, "Europe/Paris", Some("Europe/Paris"), "Europe/London", "2020-01-01 13:00:00"),
        (1, "US/Eastern", None, "Europe/London", "2020-01-01 08:00:00"),
        (1, "US/Eastern", Some("US/Eastern"), "Europe/London", "2020-01-01 13:00:00"),
        (2, "Europe/Paris", None, "UTC", "2020-06-01 16:00:00"),
    ];

    for (id, client, asserted, server, expected) in cases {
        let outcome = verifier
            .verify_read(&ReadScenario {
                name: format!("row{}-{}", id, client),
                record_id: RecordId(id),
                read: setting(client, asserted, server),
                expected: wc(expected),
            })
            .unwrap();
        assert!(outcome.passed, "{:?}", outcome);
        assert_eq!(outcome.input_kind, None);
    }
}

#[test]
fn test_suite_collects_failures_under_one_trace() {
    let registry = registry();
    let trace_id = TraceId::new();
    let mut verifier =
        RoundTripVerifier::new(&registry, seeded_store()).with_trace_id(trace_id.clone());

    let cases = vec![
        SuiteCase::Read(ReadScenario {
            name: "row1-paris".to_string(),
            record_id: RecordId(1),
            read: setting("Europe/Paris", None, "Europe/London"),
            expected: wc("2020-01-01 14:00:00"),
        }),
        SuiteCase::Read(ReadScenario {
            name: "row1-wrong".to_string(),
            record_id: RecordId(1),
            read: setting("Europe/Paris", None, "Europe/London"),
            expected: wc("2020-01-01 13:00:00"),
        }),
        SuiteCase::RoundTrip(Scenario::stable(
            "stable",
            setting("Asia/Shanghai", None, "UTC"),
            wc("2020-02-02 02:02:02"),
            wc("2020-02-02 02:02:02"),
        )),
    ];

    let report = verifier.verify_suite(&cases).unwrap();

    assert_eq!(report.trace_id, trace_id);
    assert_eq!(report.passed(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.all_passed());
    assert_eq!(
        report.failures().map(|o| o.scenario.as_str()).collect::<Vec<_>>(),
        vec!["row1-wrong"]
    );
}

#[test]
fn test_suite_stops_on_store_error() {
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

    let cases = vec![SuiteCase::Read(ReadScenario {
        name: "missing".to_string(),
        record_id: RecordId(99),
        read: setting("UTC", None, "UTC"),
        expected: wc("2020-01-01 00:00:00"),
    })];

    let err = verifier.verify_suite(&cases).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.record_id(), Some(99));
    assert_eq!(registry.current_client_zone(), zone("Asia/Tokyo"));
}

#[test]
fn test_update_invariance() {
    // GIVEN row 1 holding 13:00 London digits
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, seeded_store());

    // WHEN its url is changed
    let unchanged = verifier
        .verify_update_invariance(
            RecordId(1),
            NonTemporalField::Url(Some("https://example.org/changed".to_string())),
        )
        .unwrap();

    // THEN the digits are untouched and still read the same way
    assert!(unchanged);
    let row = verifier.store().get(RecordId(1)).unwrap();
    assert_eq!(row.url.as_deref(), Some("https://example.org/changed"));
    assert_eq!(row.wall_clock, wc("2020-01-01 13:00:00"));

    let eastern = verifier
        .verify_read(&ReadScenario {
            name: "after-update".to_string(),
            record_id: RecordId(1),
            read: setting("US/Eastern", None, "Europe/London"),
            expected: wc("2020-01-01 08:00:00"),
        })
        .unwrap();
    assert!(eastern.passed);

    let asserted = verifier
        .verify_read(&ReadScenario {
            name: "after-update-asserted".to_string(),
            record_id: RecordId(1),
            read: setting("US/Eastern", Some("US/Eastern"), "Europe/London"),
            expected: wc("2020-01-01 13:00:00"),
        })
        .unwrap();
    assert!(asserted.passed);
}

#[test]
fn test_update_of_missing_record_fails() {
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

    let err = verifier
        .verify_update_invariance(RecordId(5), NonTemporalField::Url(None))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_gap_scenario_outcome_is_classified() {
    let registry = registry();
    let mut verifier = RoundTripVerifier::new(&registry, MemoryStore::new());

    let outcome = verifier
        .verify(&Scenario::stable(
            "spring-forward",
            setting("Europe/London", None, "UTC"),
            wc("2018-03-25 01:31:04"),
            wc("2018-03-25 02:31:04"),
        ))
        .unwrap();

    assert!(outcome.passed);
    assert_eq!(outcome.input_kind, Some(LocalTimeKind::Gap));
    assert_eq!(outcome.stored_kind, LocalTimeKind::Unique);
    assert_eq!(outcome.stored_digits, wc("2018-03-25 01:31:04"));
}

#[test]
fn test_boxed_store_is_accepted() {
    let registry = registry();
    let store: Box<dyn WallClockStore> = Box::new(MemoryStore::new());
    let mut verifier = RoundTripVerifier::new(&registry, store);

    let outcome = verifier
        .verify(&Scenario::stable(
            "boxed",
            setting("UTC", None, "UTC"),
            wc("2021-07-04 12:00:00"),
            wc("2021-07-04 12:00:00"),
        ))
        .unwrap();

    assert!(outcome.passed);
    assert_eq!(verifier.into_store().list().unwrap().len(), 1);
}
