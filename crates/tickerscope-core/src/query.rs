//! Upstream function identifiers and request parameters.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Granularity, InputError, OutputSize, Symbol};

/// Value of the upstream `function` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
    TimeSeriesIntraday,
    TimeSeriesDaily,
    TimeSeriesWeekly,
    TimeSeriesMonthly,
    SymbolSearch,
    Overview,
}

impl Function {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeriesIntraday => "TIME_SERIES_INTRADAY",
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Self::TimeSeriesWeekly => "TIME_SERIES_WEEKLY",
            Self::TimeSeriesMonthly => "TIME_SERIES_MONTHLY",
            Self::SymbolSearch => "SYMBOL_SEARCH",
            Self::Overview => "OVERVIEW",
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters of one upstream call, minus the credential.
///
/// The fetcher appends `apikey` per attempt, so the same value can be
/// replayed unchanged across credential rotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    function: Function,
    extra: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub const fn new(function: Function) -> Self {
        Self {
            function,
            extra: Vec::new(),
        }
    }

    pub fn time_series(
        symbol: &Symbol,
        granularity: Granularity,
        output_size: Option<OutputSize>,
    ) -> Self {
        let mut params = Self::new(granularity.function()).with("symbol", symbol.as_str());
        if let Granularity::Intraday(interval) = granularity {
            params = params.with("interval", interval.as_str());
        }
        if let Some(size) = output_size.filter(|_| granularity.supports_output_size()) {
            params = params.with("outputsize", size.as_str());
        }
        params
    }

    pub fn symbol_search(keywords: &str) -> Result<Self, InputError> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(InputError::EmptyKeywords);
        }
        Ok(Self::new(Function::SymbolSearch).with("keywords", keywords))
    }

    pub fn overview(symbol: &Symbol) -> Self {
        Self::new(Function::Overview).with("symbol", symbol.as_str())
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extra.push((name, value.into()));
        self
    }

    pub const fn function(&self) -> Function {
        self.function
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        if name == "function" {
            return Some(self.function.as_str());
        }
        self.extra
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All parameters in wire order, `function` first.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(self.extra.len() + 1);
        pairs.push(("function", self.function.as_str()));
        pairs.extend(self.extra.iter().map(|(key, value)| (*key, value.as_str())));
        pairs
    }
}
