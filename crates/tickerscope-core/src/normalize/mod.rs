//! # Schema Normalizer
//!
//! Turns raw upstream JSON into the domain entities in two stages:
//!
//! 1. **Structural validation** (`validate_*`): required keys are present
//!    and hold strings. The result is a `Raw*` shape that still carries the
//!    upstream text.
//! 2. **Projection** (`project_*`): numbered keys become semantic fields,
//!    numeric strings become numbers, date keys become timestamps and the
//!    series is sorted.
//!
//! Every failure is a [`ValidationError`] whose [`FieldPath`] uses the
//! upstream key names, e.g. `Meta Data.2. Symbol`.
//!
//! | Endpoint | Entry point | Output |
//! |----------|-------------|--------|
//! | Time series (intraday/daily/weekly/monthly) | [`normalize_time_series`] | [`TimeSeries`](crate::TimeSeries) |
//! | Symbol search | [`normalize_search`] | `Vec<`[`SymbolMatch`](crate::SymbolMatch)`>` |
//! | Company overview | [`normalize_overview`] | [`CompanyOverview`](crate::CompanyOverview) |

mod overview;
mod search;
mod time_series;

pub use overview::{
    normalize_overview, project_overview, validate_overview, RawOverview, OVERVIEW_FLOAT_FIELDS,
    OVERVIEW_INTEGER_FIELDS, OVERVIEW_TEXT_FIELDS,
};
pub use search::{
    normalize_search, project_search, validate_search, RawCandidate, RawSearch, BEST_MATCHES_KEY,
};
pub use time_series::{
    normalize_time_series, project_time_series, validate_time_series, MetadataLayout,
    RawObservation, RawSeriesMetadata, RawTimeSeries, SeriesSchema, META_DATA_KEY,
};

use serde_json::{Map, Value};

use crate::{FieldPath, ValidationError};

/// Parses an upstream numeric string into a finite `f64`.
pub fn coerce_f64(raw: &str, path: &FieldPath) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::not_numeric(
            path.clone(),
            "a decimal number",
            raw,
        )),
    }
}

/// Parses an upstream numeric string into an `i64`.
pub fn coerce_i64(raw: &str, path: &FieldPath) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::not_numeric(path.clone(), "an integer", raw))
}

pub(crate) fn require_object<'a>(
    value: &'a Value,
    path: &FieldPath,
) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::unexpected_type(path.clone(), "an object", value))
}

pub(crate) fn require_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &FieldPath,
    expected: &str,
) -> Result<&'a Value, ValidationError> {
    object
        .get(key)
        .ok_or_else(|| ValidationError::missing(path.child(key), expected))
}

pub(crate) fn require_string(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<String, ValidationError> {
    let value = require_field(object, key, path, "a string")?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::unexpected_type(path.child(key), "a string", value))
}

pub(crate) fn optional_string(
    object: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
) -> Result<Option<String>, ValidationError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(other) => Err(ValidationError::unexpected_type(
            path.child(key),
            "a string",
            other,
        )),
    }
}
