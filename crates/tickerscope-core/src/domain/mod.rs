//! # Domain Models
//!
//! Normalized entities handed to consumers of the client.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observation`] | One OHLCV record |
//! | [`Series`] | Observations for one symbol, ascending by timestamp |
//! | [`SeriesMetadata`] | Descriptive envelope of a series response |
//! | [`TimeSeries`] | Metadata plus series |
//! | [`SymbolMatch`] | Symbol search candidate |
//! | [`CompanyOverview`] | Fundamentals snapshot |
//! | [`Symbol`] | Validated ticker symbol |
//! | [`IntradayInterval`] | Intraday bar width (1min .. 60min) |
//! | [`Granularity`] | Intraday, daily, weekly or monthly bucket |
//! | [`MarketTimestamp`] | Exchange-local date-time |
//!
//! A [`Series`] keeps its observations private so the ascending-time
//! ordering established at construction cannot be broken afterwards.

mod interval;
mod models;
mod symbol;
mod timestamp;

pub use interval::{Granularity, IntradayInterval, OutputSize};
pub use models::{
    CompanyOverview, Observation, Series, SeriesMetadata, SymbolMatch, TimeSeries,
};
pub use symbol::Symbol;
pub use timestamp::MarketTimestamp;
