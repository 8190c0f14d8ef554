//! # Tickerscope Core
//!
//! Alpha Vantage client core: a schema normalizer for the upstream's loosely
//! typed JSON and a fetcher that rotates across a pool of API keys when the
//! upstream answers with its rate-limit notice.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analytics`] | Investment simulation over a series |
//! | [`client`] | Query client (intraday, daily, weekly, monthly, search, overview) |
//! | [`config`] | Client configuration and environment lookup |
//! | [`credentials`] | Credential pool with rotation cursor and attempt ceiling |
//! | [`domain`] | Normalized entities (Series, SymbolMatch, CompanyOverview) |
//! | [`error`] | Error types |
//! | [`fetcher`] | Key-rotating fetcher |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Two-stage validation and projection per endpoint |
//! | [`query`] | Upstream function identifiers and query parameters |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickerscope_core::{AlphaVantageClient, ClientConfig, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(["key-one", "key-two"]);
//!     let client = AlphaVantageClient::from_config(&config)?;
//!
//!     let daily = client.daily(&Symbol::parse("IBM")?).await?;
//!     if let Some(latest) = daily.series.latest() {
//!         println!("IBM close: {:.2}", latest.close);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  CLI / Caller       │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────────┐
//! │ AlphaVantageClient  │────▶│ Schema Normalizer    │
//! └──────────┬──────────┘     │ validate ─▶ project  │
//!            │                └──────────────────────┘
//!            ▼
//! ┌─────────────────────┐     ┌──────────────────────┐
//! │ KeyRotatingFetcher  │────▶│ CredentialPool       │
//! └──────────┬──────────┘     └──────────────────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ HTTP Client         │
//! │ (reqwest/test)      │
//! └─────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every query returns [`QueryError`]:
//!
//! ```rust
//! use tickerscope_core::QueryError;
//!
//! fn describe(error: &QueryError) -> &'static str {
//!     match error {
//!         QueryError::QuotaExceeded { .. } => "every key is over quota",
//!         QueryError::Validation(_) => "upstream payload changed shape",
//!         QueryError::Transport(_) => "network or upstream failure",
//!         QueryError::Input(_) => "bad arguments",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys never appear in logs, `Debug` output or transport errors
//! - Log events name the credential by its pool index

pub mod analytics;
pub mod client;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod http_client;
pub mod normalize;
pub mod query;

// Analytics
pub use analytics::{simulate_investment, InvestmentOutcome};

// Client
pub use client::AlphaVantageClient;

// Configuration
pub use config::ClientConfig;

// Credential pool
pub use credentials::{Attempt, CredentialPool};

// Domain models
pub use domain::{
    CompanyOverview, Granularity, IntradayInterval, MarketTimestamp, Observation, OutputSize,
    Series, SeriesMetadata, Symbol, SymbolMatch, TimeSeries,
};

// Error types
pub use error::{
    ConfigError, FieldPath, InputError, QueryError, ValidationError, ValidationErrorKind,
};

// Fetcher
pub use fetcher::{KeyRotatingFetcher, DEFAULT_RATE_LIMIT_NOTICE};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Query parameters
pub use query::{Function, QueryParams};
