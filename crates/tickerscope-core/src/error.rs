use std::fmt::{Display, Formatter};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::http_client::HttpError;

const MAX_ACTUAL_LEN: usize = 48;

/// Location of a field inside an upstream JSON document.
///
/// Segments are the raw upstream keys (or array indices), so a path reads
/// exactly like the payload it points into: `Meta Data.2. Symbol`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn contains(&self, segment: &str) -> bool {
        self.0.iter().any(|candidate| candidate == segment)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return f.write_str("$");
        }
        f.write_str(&self.0.join("."))
    }
}

impl From<FieldPath> for String {
    fn from(value: FieldPath) -> Self {
        value.to_string()
    }
}

/// Why an upstream payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingField,
    UnexpectedType,
    NotNumeric,
    InvalidTimestamp,
    OutOfRange,
    MalformedDocument,
}

impl ValidationErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing field",
            Self::UnexpectedType => "unexpected type",
            Self::NotNumeric => "not numeric",
            Self::InvalidTimestamp => "invalid timestamp",
            Self::OutOfRange => "out of range",
            Self::MalformedDocument => "malformed document",
        }
    }
}

impl Display for ValidationErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream payload does not match the shape expected for its endpoint.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("{kind} at '{path}': expected {expected}, found {actual}")]
pub struct ValidationError {
    kind: ValidationErrorKind,
    path: FieldPath,
    expected: String,
    actual: String,
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        path: FieldPath,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing(path: FieldPath, expected: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::MissingField, path, expected, "nothing")
    }

    pub fn unexpected_type(path: FieldPath, expected: impl Into<String>, found: &Value) -> Self {
        Self::new(
            ValidationErrorKind::UnexpectedType,
            path,
            expected,
            describe_value(found),
        )
    }

    pub fn not_numeric(path: FieldPath, expected: impl Into<String>, raw: &str) -> Self {
        Self::new(
            ValidationErrorKind::NotNumeric,
            path,
            expected,
            quote_raw(raw),
        )
    }

    pub fn invalid_timestamp(path: FieldPath, raw: &str) -> Self {
        Self::new(
            ValidationErrorKind::InvalidTimestamp,
            path,
            "a calendar date or date-time",
            quote_raw(raw),
        )
    }

    pub fn out_of_range(path: FieldPath, expected: impl Into<String>, raw: &str) -> Self {
        Self::new(
            ValidationErrorKind::OutOfRange,
            path,
            expected,
            quote_raw(raw),
        )
    }

    pub fn malformed_document(detail: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorKind::MalformedDocument,
            FieldPath::root(),
            "a JSON document",
            detail,
        )
    }

    pub const fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(flag) => format!("boolean {flag}"),
        Value::Number(number) => format!("number {number}"),
        Value::String(text) => format!("string {}", quote_raw(text)),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} key(s)", map.len()),
    }
}

fn quote_raw(raw: &str) -> String {
    if raw.chars().count() <= MAX_ACTUAL_LEN {
        return format!("'{raw}'");
    }
    let truncated = raw.chars().take(MAX_ACTUAL_LEN).collect::<String>();
    format!("'{truncated}...'")
}

/// Caller-supplied arguments rejected before any upstream call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid interval '{value}', expected one of 1min, 5min, 15min, 30min, 60min")]
    InvalidInterval { value: String },
    #[error("invalid output size '{value}', expected compact or full")]
    InvalidOutputSize { value: String },

    #[error("search keywords cannot be empty")]
    EmptyKeywords,

    #[error("timestamp must be YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("investment amount must be a positive number: '{value}'")]
    InvalidAmount { value: String },
    #[error("series has no observation on or after {date}")]
    NoObservationAfter { date: String },
}

/// Configuration problems detected while assembling a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("credential pool must contain at least one API key")]
    EmptyCredentialPool,
    #[error("API key at position {index} is blank")]
    BlankCredential { index: usize },
    #[error("per-key call limit must be greater than zero")]
    ZeroCallLimit,
    #[error("environment variable {name} is not set")]
    MissingVariable { name: &'static str },
    #[error("environment variable {name} has an invalid value: '{value}'")]
    InvalidVariable { name: &'static str, value: String },
}

/// Error returned by every query operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("unable to interpret response: {0}")]
    Validation(#[from] ValidationError),

    #[error("service temporarily unavailable: attempt {attempts} exceeds the ceiling of {ceiling}")]
    QuotaExceeded { attempts: u64, ceiling: u64 },

    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl QueryError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "query.validation",
            Self::QuotaExceeded { .. } => "query.quota_exceeded",
            Self::Transport(_) => "query.transport",
            Self::Input(_) => "query.invalid_input",
        }
    }

    /// Short message suitable for an end user; the `Display` form carries the detail.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "unable to interpret response",
            Self::QuotaExceeded { .. } => "service temporarily unavailable",
            Self::Transport(_) => "request failed",
            Self::Input(_) => "invalid request",
        }
    }
}
