use serde::{Deserialize, Serialize};

use crate::{Granularity, MarketTimestamp};

/// One time-stamped price/volume record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: MarketTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Observation {
    pub const fn new(
        timestamp: MarketTimestamp,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Observations for one symbol and granularity, ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SeriesParts")]
pub struct Series {
    symbol: String,
    granularity: Granularity,
    observations: Vec<Observation>,
}

#[derive(Deserialize)]
struct SeriesParts {
    symbol: String,
    granularity: Granularity,
    observations: Vec<Observation>,
}

impl From<SeriesParts> for Series {
    fn from(parts: SeriesParts) -> Self {
        Self::new(parts.symbol, parts.granularity, parts.observations)
    }
}

impl Series {
    /// Builds a series, stable-sorting the observations by timestamp.
    pub fn new(
        symbol: impl Into<String>,
        granularity: Granularity,
        mut observations: Vec<Observation>,
    ) -> Self {
        observations.sort_by_key(|observation| observation.timestamp);
        Self {
            symbol: symbol.into(),
            granularity,
            observations,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// First and last timestamp covered by the series.
    pub fn time_extent(&self) -> Option<(MarketTimestamp, MarketTimestamp)> {
        Some((self.first()?.timestamp, self.latest()?.timestamp))
    }

    /// Lowest and highest close, the chart's value domain.
    pub fn close_extent(&self) -> Option<(f64, f64)> {
        let mut closes = self.observations.iter().map(|observation| observation.close);
        let first = closes.next()?;
        Some(closes.fold((first, first), |(low, high), close| {
            (low.min(close), high.max(close))
        }))
    }

    /// Observations with `from <= timestamp <= to`.
    pub fn between(&self, from: MarketTimestamp, to: MarketTimestamp) -> &[Observation] {
        if from > to {
            return &[];
        }
        let start = self
            .observations
            .partition_point(|observation| observation.timestamp < from);
        let end = self
            .observations
            .partition_point(|observation| observation.timestamp <= to);
        &self.observations[start..end]
    }

    /// First observation at or after `at`.
    pub fn on_or_after(&self, at: MarketTimestamp) -> Option<&Observation> {
        let index = self
            .observations
            .partition_point(|observation| observation.timestamp < at);
        self.observations.get(index)
    }
}

/// Descriptive envelope returned alongside a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    pub information: String,
    pub symbol: String,
    /// Kept as the upstream string; its format varies by endpoint.
    pub last_refreshed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Normalized time-series response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub metadata: SeriesMetadata,
    pub series: Series,
}

/// Symbol search candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: String,
    pub region: String,
    pub timezone: String,
    pub currency: String,
    /// Upstream relevance in `0.0..=1.0`.
    pub match_score: f64,
}

/// Fundamentals snapshot for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: String,
    pub asset_type: String,
    pub name: String,
    pub description: String,
    pub cik: i64,
    pub exchange: String,
    pub currency: String,
    pub country: String,
    pub sector: String,
    pub industry: String,
    pub address: String,
    pub fiscal_year_end: String,
    pub latest_quarter: String,
    pub market_capitalization: i64,
    pub ebitda: i64,
    pub pe_ratio: f64,
    pub peg_ratio: f64,
    pub book_value: f64,
    pub dividend_per_share: f64,
    pub dividend_yield: f64,
    pub eps: f64,
    pub revenue_per_share_ttm: f64,
    pub profit_margin: f64,
    pub operating_margin_ttm: f64,
    pub return_on_assets_ttm: f64,
    pub return_on_equity_ttm: f64,
    pub revenue_ttm: i64,
    pub gross_profit_ttm: i64,
    pub diluted_eps_ttm: f64,
    pub quarterly_earnings_growth_yoy: f64,
    pub quarterly_revenue_growth_yoy: f64,
    pub analyst_target_price: f64,
    pub trailing_pe: f64,
    pub forward_pe: f64,
    pub price_to_sales_ratio_ttm: f64,
    pub price_to_book_ratio: f64,
    pub ev_to_revenue: f64,
    pub ev_to_ebitda: f64,
    pub beta: f64,
    pub week_52_high: f64,
    pub week_52_low: f64,
    pub day_50_moving_average: f64,
    pub day_200_moving_average: f64,
    pub shares_outstanding: i64,
    pub dividend_date: String,
    pub ex_dividend_date: String,
}
