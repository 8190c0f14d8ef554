//! Alpha Vantage query client.
//!
//! Owns one [`KeyRotatingFetcher`]; each query builds its parameters, fetches
//! through the credential pool and hands the body to the matching normalizer.
//! Clients built separately never share rotation state.

use std::sync::Arc;

use tracing::debug;

use crate::fetcher::KeyRotatingFetcher;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::{normalize_overview, normalize_search, normalize_time_series};
use crate::query::QueryParams;
use crate::{
    ClientConfig, CompanyOverview, ConfigError, Granularity, IntradayInterval, OutputSize,
    QueryError, Symbol, SymbolMatch, TimeSeries,
};

pub struct AlphaVantageClient {
    fetcher: KeyRotatingFetcher,
}

impl AlphaVantageClient {
    pub const fn new(fetcher: KeyRotatingFetcher) -> Self {
        Self { fetcher }
    }

    /// Client over the production reqwest transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(
        config: &ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        KeyRotatingFetcher::from_config(config, http_client).map(Self::new)
    }

    pub fn fetcher(&self) -> &KeyRotatingFetcher {
        &self.fetcher
    }

    pub async fn intraday(
        &self,
        symbol: &Symbol,
        interval: IntradayInterval,
    ) -> Result<TimeSeries, QueryError> {
        self.time_series(symbol, Granularity::Intraday(interval), None)
            .await
    }

    pub async fn daily(&self, symbol: &Symbol) -> Result<TimeSeries, QueryError> {
        self.time_series(symbol, Granularity::Daily, None).await
    }

    pub async fn weekly(&self, symbol: &Symbol) -> Result<TimeSeries, QueryError> {
        self.time_series(symbol, Granularity::Weekly, None).await
    }

    pub async fn monthly(&self, symbol: &Symbol) -> Result<TimeSeries, QueryError> {
        self.time_series(symbol, Granularity::Monthly, None).await
    }

    /// Any granularity; `output_size` is ignored where the endpoint has no such parameter.
    pub async fn time_series(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
        output_size: Option<OutputSize>,
    ) -> Result<TimeSeries, QueryError> {
        let params = QueryParams::time_series(symbol, granularity, output_size);
        let body = self.fetcher.fetch(&params).await?;
        let normalized = normalize_time_series(granularity, &body)?;

        debug!(
            function = %params.function(),
            symbol = %symbol,
            observations = normalized.series.len(),
            "time series normalized"
        );
        Ok(normalized)
    }

    /// Candidates in upstream relevance order; no matches is an empty vector.
    pub async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, QueryError> {
        let params = QueryParams::symbol_search(keywords)?;
        let body = self.fetcher.fetch(&params).await?;
        let matches = normalize_search(&body)?;

        debug!(
            function = %params.function(),
            matches = matches.len(),
            "symbol search normalized"
        );
        Ok(matches)
    }

    pub async fn overview(&self, symbol: &Symbol) -> Result<CompanyOverview, QueryError> {
        let params = QueryParams::overview(symbol);
        let body = self.fetcher.fetch(&params).await?;
        let overview = normalize_overview(&body)?;

        debug!(function = %params.function(), symbol = %symbol, "overview normalized");
        Ok(overview)
    }
}
