use serde_json::Value;

use super::{coerce_f64, optional_string, require_field, require_object, require_string};
use crate::{
    FieldPath, Granularity, MarketTimestamp, Observation, Series, SeriesMetadata, TimeSeries,
    ValidationError,
};

pub const META_DATA_KEY: &str = "Meta Data";

const INFORMATION_KEY: &str = "1. Information";
const SYMBOL_KEY: &str = "2. Symbol";
const LAST_REFRESHED_KEY: &str = "3. Last Refreshed";

const OPEN_KEY: &str = "1. open";
const HIGH_KEY: &str = "2. high";
const LOW_KEY: &str = "3. low";
const CLOSE_KEY: &str = "4. close";
const VOLUME_KEY: &str = "5. volume";

/// Which optional metadata keys an endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataLayout {
    /// `4. Interval`, `5. Output Size`, `6. Time Zone`
    Intraday,
    /// `4. Output Size`, `5. Time Zone`
    Daily,
    /// `4. Time Zone`
    Periodic,
}

impl MetadataLayout {
    pub const fn interval_key(self) -> Option<&'static str> {
        match self {
            Self::Intraday => Some("4. Interval"),
            Self::Daily | Self::Periodic => None,
        }
    }

    pub const fn output_size_key(self) -> Option<&'static str> {
        match self {
            Self::Intraday => Some("5. Output Size"),
            Self::Daily => Some("4. Output Size"),
            Self::Periodic => None,
        }
    }

    pub const fn time_zone_key(self) -> &'static str {
        match self {
            Self::Intraday => "6. Time Zone",
            Self::Daily => "5. Time Zone",
            Self::Periodic => "4. Time Zone",
        }
    }
}

/// Document keys expected for one granularity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSchema {
    granularity: Granularity,
    series_key: String,
    layout: MetadataLayout,
}

impl SeriesSchema {
    pub fn for_granularity(granularity: Granularity) -> Self {
        let (series_key, layout) = match granularity {
            Granularity::Intraday(interval) => (
                format!("Time Series ({})", interval.as_str()),
                MetadataLayout::Intraday,
            ),
            Granularity::Daily => (String::from("Time Series (Daily)"), MetadataLayout::Daily),
            Granularity::Weekly => (
                String::from("Weekly Time Series"),
                MetadataLayout::Periodic,
            ),
            Granularity::Monthly => (
                String::from("Monthly Time Series"),
                MetadataLayout::Periodic,
            ),
        };

        Self {
            granularity,
            series_key,
            layout,
        }
    }

    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn series_key(&self) -> &str {
        &self.series_key
    }

    pub const fn layout(&self) -> MetadataLayout {
        self.layout
    }
}

/// `Meta Data` block with every value still in upstream form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSeriesMetadata {
    pub information: String,
    pub symbol: String,
    pub last_refreshed: String,
    pub interval: Option<String>,
    pub output_size: Option<String>,
    pub time_zone: Option<String>,
}

/// One series entry: the date key and its five numeric strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    pub key: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

/// Structurally valid time-series document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTimeSeries {
    pub schema: SeriesSchema,
    pub metadata: RawSeriesMetadata,
    pub entries: Vec<RawObservation>,
}

pub fn validate_time_series(
    granularity: Granularity,
    document: &Value,
) -> Result<RawTimeSeries, ValidationError> {
    let schema = SeriesSchema::for_granularity(granularity);
    let root_path = FieldPath::root();
    let root = require_object(document, &root_path)?;

    let meta_path = root_path.child(META_DATA_KEY);
    let meta = require_object(
        require_field(root, META_DATA_KEY, &root_path, "an object")?,
        &meta_path,
    )?;
    let layout = schema.layout();
    let optional = |key: Option<&str>| match key {
        Some(key) => optional_string(meta, key, &meta_path),
        None => Ok(None),
    };
    let metadata = RawSeriesMetadata {
        information: require_string(meta, INFORMATION_KEY, &meta_path)?,
        symbol: require_string(meta, SYMBOL_KEY, &meta_path)?,
        last_refreshed: require_string(meta, LAST_REFRESHED_KEY, &meta_path)?,
        interval: optional(layout.interval_key())?,
        output_size: optional(layout.output_size_key())?,
        time_zone: optional(Some(layout.time_zone_key()))?,
    };

    let series_path = root_path.child(schema.series_key());
    let series = require_object(
        require_field(root, schema.series_key(), &root_path, "an object")?,
        &series_path,
    )?;

    let mut entries = Vec::with_capacity(series.len());
    for (key, entry) in series {
        let entry_path = series_path.child(key.as_str());
        let entry = require_object(entry, &entry_path)?;
        entries.push(RawObservation {
            key: key.clone(),
            open: require_string(entry, OPEN_KEY, &entry_path)?,
            high: require_string(entry, HIGH_KEY, &entry_path)?,
            low: require_string(entry, LOW_KEY, &entry_path)?,
            close: require_string(entry, CLOSE_KEY, &entry_path)?,
            volume: require_string(entry, VOLUME_KEY, &entry_path)?,
        });
    }

    Ok(RawTimeSeries {
        schema,
        metadata,
        entries,
    })
}

pub fn project_time_series(raw: RawTimeSeries) -> Result<TimeSeries, ValidationError> {
    let series_path = FieldPath::root().child(raw.schema.series_key());

    let observations = raw
        .entries
        .iter()
        .map(|entry| project_observation(entry, &series_path.child(entry.key.as_str())))
        .collect::<Result<Vec<_>, _>>()?;

    let series = Series::new(
        raw.metadata.symbol.clone(),
        raw.schema.granularity(),
        observations,
    );

    let RawSeriesMetadata {
        information,
        symbol,
        last_refreshed,
        interval,
        output_size,
        time_zone,
    } = raw.metadata;

    Ok(TimeSeries {
        metadata: SeriesMetadata {
            information,
            symbol,
            last_refreshed,
            interval,
            output_size,
            time_zone,
        },
        series,
    })
}

fn project_observation(
    entry: &RawObservation,
    entry_path: &FieldPath,
) -> Result<Observation, ValidationError> {
    let timestamp = MarketTimestamp::parse(&entry.key)
        .map_err(|_| ValidationError::invalid_timestamp(entry_path.clone(), &entry.key))?;
    let number = |key: &str, raw: &str| coerce_f64(raw, &entry_path.child(key));

    Ok(Observation::new(
        timestamp,
        number(OPEN_KEY, &entry.open)?,
        number(HIGH_KEY, &entry.high)?,
        number(LOW_KEY, &entry.low)?,
        number(CLOSE_KEY, &entry.close)?,
        number(VOLUME_KEY, &entry.volume)?,
    ))
}

/// Validates then projects a time-series document for `granularity`.
pub fn normalize_time_series(
    granularity: Granularity,
    document: &Value,
) -> Result<TimeSeries, ValidationError> {
    project_time_series(validate_time_series(granularity, document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntradayInterval, ValidationErrorKind};
    use serde_json::json;

    fn bar(open: &str, close: &str) -> Value {
        json!({
            "1. open": open,
            "2. high": "190.0000",
            "3. low": "180.0000",
            "4. close": close,
            "5. volume": "4021456"
        })
    }

    fn daily_document() -> Value {
        json!({
            "Meta Data": {
                "1. Information": "Daily Prices (open, high, low, close) and Volumes",
                "2. Symbol": "IBM",
                "3. Last Refreshed": "2024-01-05",
                "4. Output Size": "Compact",
                "5. Time Zone": "US/Eastern"
            },
            "Time Series (Daily)": {
                "2024-01-05": bar("185.0000", "186.5000"),
                "2024-01-03": bar("183.0000", "184.1000"),
                "2024-01-04": bar("184.2000", "185.3000")
            }
        })
    }

    #[test]
    fn schema_names_series_key_per_granularity() {
        let intraday =
            SeriesSchema::for_granularity(Granularity::Intraday(IntradayInterval::OneMinute));
        assert_eq!(intraday.series_key(), "Time Series (1min)");
        assert_eq!(intraday.layout().time_zone_key(), "6. Time Zone");
        assert_eq!(
            SeriesSchema::for_granularity(Granularity::Monthly).series_key(),
            "Monthly Time Series"
        );
    }

    #[test]
    fn daily_document_projects_sorted_series() {
        let normalized =
            normalize_time_series(Granularity::Daily, &daily_document()).expect("valid document");

        assert_eq!(normalized.metadata.symbol, "IBM");
        assert_eq!(normalized.metadata.output_size.as_deref(), Some("Compact"));
        assert_eq!(normalized.metadata.time_zone.as_deref(), Some("US/Eastern"));
        assert_eq!(normalized.metadata.interval, None);

        let closes = normalized
            .series
            .observations()
            .iter()
            .map(|observation| observation.close)
            .collect::<Vec<_>>();
        assert_eq!(closes, vec![184.1, 185.3, 186.5]);
        assert_eq!(normalized.series.granularity(), Granularity::Daily);
    }

    #[test]
    fn validation_keeps_upstream_text() {
        let raw = validate_time_series(Granularity::Daily, &daily_document()).expect("valid");
        assert_eq!(raw.entries.len(), 3);
        assert!(raw.entries.iter().any(|entry| entry.open == "185.0000"));
        assert_eq!(raw.metadata.last_refreshed, "2024-01-05");
    }

    #[test]
    fn wrong_granularity_reports_missing_series_key() {
        let err = normalize_time_series(Granularity::Weekly, &daily_document())
            .expect_err("weekly key is absent");
        assert_eq!(err.kind(), ValidationErrorKind::MissingField);
        assert_eq!(err.path().to_string(), "Weekly Time Series");
    }

    #[test]
    fn non_string_optional_metadata_is_rejected() {
        let mut document = daily_document();
        document["Meta Data"]["5. Time Zone"] = json!(5);

        let err = normalize_time_series(Granularity::Daily, &document).expect_err("must fail");
        assert_eq!(err.kind(), ValidationErrorKind::UnexpectedType);
        assert_eq!(err.path().to_string(), "Meta Data.5. Time Zone");
    }

    #[test]
    fn unparseable_entry_key_is_an_invalid_timestamp() {
        let mut document = daily_document();
        document["Time Series (Daily)"]["last friday"] = bar("1.0", "1.0");

        let err = normalize_time_series(Granularity::Daily, &document).expect_err("must fail");
        assert_eq!(err.kind(), ValidationErrorKind::InvalidTimestamp);
        assert_eq!(err.path().to_string(), "Time Series (Daily).last friday");
    }

    #[test]
    fn empty_series_object_is_valid() {
        let mut document = daily_document();
        document["Time Series (Daily)"] = json!({});

        let normalized = normalize_time_series(Granularity::Daily, &document).expect("valid");
        assert!(normalized.series.is_empty());
    }
}
