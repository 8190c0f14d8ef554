mod calculate;
mod overview;
mod search;
mod series;

use std::time::Instant;

use serde_json::Value;
use tickerscope_core::{AlphaVantageClient, ClientConfig, Function, Granularity};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::{Envelope, Metadata};
use crate::output::Table;

pub struct CommandResult {
    pub function: Function,
    pub data: Value,
    pub table: Table,
}

impl CommandResult {
    pub fn new(function: Function, data: Value, table: Table) -> Self {
        Self {
            function,
            data,
            table,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let config = client_config(cli)?;
    let client = AlphaVantageClient::from_config(&config)?;
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Intraday(args) => {
            let granularity = Granularity::Intraday(args.interval);
            series::run(&client, &args.symbol, granularity, args.output_size).await?
        }
        Command::Daily(args) => {
            series::run(&client, &args.symbol, Granularity::Daily, args.output_size).await?
        }
        Command::Weekly(args) => {
            series::run(&client, &args.symbol, Granularity::Weekly, None).await?
        }
        Command::Monthly(args) => {
            series::run(&client, &args.symbol, Granularity::Monthly, None).await?
        }
        Command::Search(args) => search::run(&client, args).await?,
        Command::Overview(args) => overview::run(&client, &args.symbol).await?,
        Command::Calculate(args) => calculate::run(&client, args).await?,
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let attempts = client.fetcher().pool().total_attempts();
    info!(
        function = %command_result.function,
        attempts,
        latency_ms,
        "command completed"
    );

    let CommandResult {
        function,
        data,
        table,
    } = command_result;

    Ok(Envelope {
        meta: Metadata::new(function, attempts, latency_ms),
        data,
        table,
    })
}

/// Flags win over the environment; `--demo` and `--api-key` skip the key variable.
fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = if cli.demo {
        ClientConfig::demo()
    } else if !cli.api_keys.is_empty() {
        ClientConfig::new(cli.api_keys.iter().cloned())
    } else {
        ClientConfig::from_env()?
    };

    if let Some(calls_per_key) = cli.calls_per_key {
        config = config.with_calls_per_key(calls_per_key);
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    config.validate()?;
    Ok(config)
}
