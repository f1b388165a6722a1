use zonelens_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ZoneLensError
pub type Result<T> = std::result::Result<T, ZoneLensError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    UnknownZone,
    InvalidWallClock,

    // Storage
    NotFound,
    AlreadyExists,
    Persistence,

    // Verification
    RoundTripMismatch,

    // Integration/IO
    Io,
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownZone => "ERR_UNKNOWN_ZONE",
            ExErrorKind::InvalidWallClock => "ERR_INVALID_WALL_CLOCK",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::RoundTripMismatch => "ERR_ROUND_TRIP_MISMATCH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the zone and
/// record context needed to debug a conversion.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    record_id: Option<i64>,
    zone: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            zone: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_record_id(mut self, id: i64) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Add the zone label involved in the failure
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record_id) = self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        if let Some(zone) = &self.zone {
            write!(f, " (zone: {})", zone)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the zone model, codec, stores and verifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZoneLensError {
    // ===== Zone Errors =====
    /// IANA label does not resolve against the tz database
    #[error("Unknown time zone: {label}")]
    UnknownZone { label: String },

    // ===== Wall-clock Errors =====
    /// Fields do not form a calendar date/time, or text failed to parse
    #[error("Invalid wall-clock value: {reason}")]
    InvalidWallClock { reason: String },

    /// Connection URL could not be parsed
    #[error("Invalid connection URL {url}: {reason}")]
    InvalidConnectionUrl { url: String, reason: String },

    // ===== Store Errors =====
    /// No record stored under the id
    #[error("Record not found: {record_id}")]
    RecordNotFound { record_id: i64 },

    /// A record with the id already exists
    #[error("Record already exists: {record_id}")]
    RecordAlreadyExists { record_id: i64 },

    // ===== Verification Errors =====
    /// Scenario definition is structurally incomplete or contradictory
    #[error("Invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },

    /// Displayed value differs from the scenario's expectation
    #[error("Round trip mismatch in scenario '{scenario}': expected {expected}, got {actual}")]
    RoundTripMismatch {
        scenario: String,
        expected: String,
        actual: String,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<ZoneLensError> for ExError {
    fn from(err: ZoneLensError) -> Self {
        match err {
            ZoneLensError::UnknownZone { label } => ExError::new(ExErrorKind::UnknownZone)
                .with_zone(label)
                .with_message("Time zone label does not resolve"),

            ZoneLensError::InvalidWallClock { reason } => {
                ExError::new(ExErrorKind::InvalidWallClock).with_message(reason)
            }

            ZoneLensError::InvalidConnectionUrl { url, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_connection_url")
                    .with_message(format!("{}: {}", url, reason))
            }

            ZoneLensError::RecordNotFound { record_id } => ExError::new(ExErrorKind::NotFound)
                .with_record_id(record_id)
                .with_message("Record not found"),

            ZoneLensError::RecordAlreadyExists { record_id } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_record_id(record_id)
                    .with_message("Record already exists")
            }

            ZoneLensError::InvalidScenario { name, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("resolve_scenario")
                    .with_message(format!("Scenario '{}': {}", name, reason))
            }

            ZoneLensError::RoundTripMismatch {
                scenario,
                expected,
                actual,
            } => ExError::new(ExErrorKind::RoundTripMismatch)
                .with_op("verify")
                .with_message(format!(
                    "Scenario '{}': expected {}, got {}",
                    scenario, expected, actual
                )),

            ZoneLensError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            ZoneLensError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ZoneLensError {
    fn from(err: serde_json::Error) -> Self {
        ZoneLensError::Serialization {
            message: err.to_string(),
        }
    }
}
