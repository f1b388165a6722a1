//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Zone contexts
pub const FIELD_CLIENT_ZONE: &str = "client_zone";
pub const FIELD_SERVER_ZONE: &str = "server_zone";
pub const FIELD_ASSERTED_ZONE: &str = "asserted_zone";

// Record identifiers
pub const FIELD_RECORD_ID: &str = "record_id";

// Scenario outcome
pub const FIELD_SCENARIO: &str = "scenario";
pub const FIELD_PASSED: &str = "passed";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
