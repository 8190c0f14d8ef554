//! CLI argument definitions for tickerscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `intraday` | Intraday OHLCV bars (1min .. 60min) |
//! | `daily` | Daily OHLCV bars |
//! | `weekly` | Weekly OHLCV bars |
//! | `monthly` | Monthly OHLCV bars |
//! | `search` | Symbol search by keywords |
//! | `overview` | Company fundamentals |
//! | `calculate` | Value of an investment made on a past date |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--api-key` | `TICKERSCOPE_API_KEYS` | API key, repeat for a rotation pool |
//! | `--calls-per-key` | `5` | Calls allowed per key before it is skipped |
//! | `--base-url` | Alpha Vantage | Upstream query endpoint |
//! | `--timeout-ms` | `5000` | Request timeout in ms |
//! | `--demo` | `false` | Use the public demo key |
//!
//! # Examples
//!
//! ```bash
//! # Daily bars as a table
//! tickerscope daily IBM --format table
//!
//! # Rotate across two keys
//! tickerscope --api-key KEY_ONE --api-key KEY_TWO search tesco
//!
//! # What would 1000 invested in IBM on 2020-03-02 be worth today?
//! tickerscope calculate IBM --date 2020-03-02 --amount 1000
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerscope_core::{Granularity, IntradayInterval, OutputSize};

/// Alpha Vantage market data from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "tickerscope",
    author,
    version,
    about = "Alpha Vantage market data from the command line",
    long_about = "tickerscope queries Alpha Vantage time series, symbol search and company \
overviews, normalizes the payloads and prints them as JSON or tables.\n\
\n\
Several API keys can be supplied; when one is over its call frequency the next \
one is used.\n\
\n\
Use 'tickerscope <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// API key. Repeat to build a rotation pool; overrides TICKERSCOPE_API_KEYS.
    #[arg(long = "api-key", global = true, value_name = "KEY")]
    pub api_keys: Vec<String>,

    /// Calls allowed per key within one run.
    #[arg(long, global = true)]
    pub calls_per_key: Option<u32>,

    /// Upstream query endpoint.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Use the public demo key (only the documented sample symbols work).
    #[arg(long, global = true, default_value_t = false, conflicts_with = "api_keys")]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Metadata lines followed by an aligned table.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch intraday bars.
    Intraday(IntradayArgs),
    /// Fetch daily bars.
    Daily(DailyArgs),
    /// Fetch weekly bars.
    Weekly(SymbolArgs),
    /// Fetch monthly bars.
    Monthly(SymbolArgs),
    /// Search symbols by keywords.
    Search(SearchArgs),
    /// Fetch company fundamentals.
    Overview(SymbolArgs),
    /// Value an investment made on a past date at the latest close.
    Calculate(CalculateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SymbolArgs {
    /// Ticker symbol, e.g. IBM or TSCO.LON.
    pub symbol: String,
}

#[derive(Debug, Clone, Args)]
pub struct IntradayArgs {
    pub symbol: String,

    /// Bar width: 1min, 5min, 15min, 30min or 60min.
    #[arg(long, default_value_t = IntradayInterval::default())]
    pub interval: IntradayInterval,

    /// compact (latest 100 bars) or full.
    #[arg(long)]
    pub output_size: Option<OutputSize>,
}

#[derive(Debug, Clone, Args)]
pub struct DailyArgs {
    pub symbol: String,

    /// compact (latest 100 bars) or full.
    #[arg(long)]
    pub output_size: Option<OutputSize>,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Keywords, joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    pub symbol: String,

    /// Investment date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,

    /// Amount invested, in the listing currency.
    #[arg(long)]
    pub amount: f64,

    /// Series used for pricing.
    #[arg(long, value_enum, default_value_t = PriceSeries::Daily)]
    pub series: PriceSeries,
}

/// Series granularities usable for pricing an investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriceSeries {
    /// Full daily history.
    Daily,
    Weekly,
    Monthly,
}

impl PriceSeries {
    pub const fn granularity(self) -> Granularity {
        match self {
            Self::Daily => Granularity::Daily,
            Self::Weekly => Granularity::Weekly,
            Self::Monthly => Granularity::Monthly,
        }
    }
}
