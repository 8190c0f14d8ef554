use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};
use serde_json::Value;
use tickerscope_core::Function;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::output::Table;

/// Request identifier (UUID v4) attached to every command result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Envelope metadata. Field order is fixed to keep JSON output stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub request_id: RequestId,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub generated_at: OffsetDateTime,
    pub function: Function,
    /// Upstream attempts made by this run, rotations included.
    pub attempts: u64,
    pub latency_ms: u64,
}

impl Metadata {
    pub fn new(function: Function, attempts: u64, latency_ms: u64) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            generated_at: OffsetDateTime::now_utc(),
            function,
            attempts,
            latency_ms,
        }
    }

    pub fn generated_at_rfc3339(&self) -> String {
        self.generated_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }
}

fn serialize_rfc3339<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = value
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

/// Command output: metadata, JSON data and its tabular rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub meta: Metadata,
    pub data: Value,
    #[serde(skip)]
    pub table: Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn serialized_meta_keeps_field_order_and_rfc3339_time() {
        let metadata = Metadata {
            request_id: RequestId(
                Uuid::parse_str("123e4567-e89b-42d3-a456-426614174000").expect("uuid"),
            ),
            generated_at: OffsetDateTime::UNIX_EPOCH,
            function: Function::TimeSeriesDaily,
            attempts: 2,
            latency_ms: 4200,
        };

        let rendered = serde_json::to_string(&metadata).expect("serializes");
        assert_eq!(
            rendered,
            "{\"request_id\":\"123e4567-e89b-42d3-a456-426614174000\",\"generated_at\":\"1970-01-01T00:00:00Z\",\"function\":\"TIME_SERIES_DAILY\",\"attempts\":2,\"latency_ms\":4200}"
        );
        assert_eq!(metadata.generated_at_rfc3339(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn envelope_omits_table() {
        let envelope = Envelope {
            meta: Metadata::new(Function::Overview, 1, 3),
            data: serde_json::json!({"symbol": "IBM"}),
            table: Table::new(["field", "value"]),
        };

        let rendered = serde_json::to_value(&envelope).expect("serializes");
        assert!(rendered.get("table").is_none());
        assert_eq!(rendered["data"]["symbol"], "IBM");
    }
}
