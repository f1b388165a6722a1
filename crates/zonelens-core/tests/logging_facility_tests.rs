#![allow(clippy::unwrap_used, clippy::expect_used)]

use zonelens_core::errors::ZoneLensError;
use zonelens_core::logging_facility::test_capture::init_test_capture;
use zonelens_core::{log_op_end, log_op_error, log_op_start};
use zonelens_core::{
    MemoryStore, ReadScenario, RecordId, RoundTripVerifier, ZoneLabel, ZoneRegistry, ZoneSetting,
};
use zonelens_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, client_zone = "Europe/Paris");

    let starts: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].field("client_zone"), Some("Europe/Paris"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let ends = capture.events_for_op(op_name);
    assert_eq!(ends.len(), 1);
    assert!(ends[0].is(op_name, EVENT_END));
    assert_eq!(ends[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ZoneLensError::UnknownZone {
        label: "Nowhere/Town".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let errors = capture.events_for_op(op_name);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is(op_name, EVENT_END_ERROR));
    assert_eq!(errors[0].field(FIELD_ERR_CODE), Some("ERR_UNKNOWN_ZONE"));
    assert_eq!(errors[0].level, tracing::Level::ERROR);
}

#[test]
fn test_verifier_emits_start_and_error_for_missing_record() {
    let capture = init_test_capture();
    let registry = ZoneRegistry::new(ZoneLabel::utc());
    let verifier = RoundTripVerifier::new(&registry, MemoryStore::new());
    let scenario_name = "logging-missing-record-unique";

    let result = verifier.verify_read(&ReadScenario {
        name: scenario_name.to_string(),
        record_id: RecordId(404),
        read: ZoneSetting::new("UTC", None, "UTC").unwrap(),
        expected: "2020-01-01 00:00:00".parse().unwrap(),
    });
    assert!(result.is_err());

    let ours: Vec<_> = capture
        .events_for_op("verify_read")
        .into_iter()
        .filter(|e| e.field("scenario") == Some(scenario_name))
        .collect();

    assert!(ours.iter().any(|e| e.event.as_deref() == Some(EVENT_START)));
    let error = ours
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event");
    assert_eq!(error.field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
}
