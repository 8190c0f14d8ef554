use tickerscope_core::{AlphaVantageClient, Granularity, OutputSize, Symbol, TimeSeries};

use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

pub async fn run(
    client: &AlphaVantageClient,
    symbol: &str,
    granularity: Granularity,
    output_size: Option<OutputSize>,
) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(symbol)?;
    let time_series = client
        .time_series(&symbol, granularity, output_size)
        .await?;

    let table = observation_table(&time_series);
    let data = serde_json::to_value(&time_series)?;
    Ok(CommandResult::new(granularity.function(), data, table))
}

/// Newest bar first, as a terminal reader expects.
fn observation_table(time_series: &TimeSeries) -> Table {
    let mut table = Table::new(["timestamp", "open", "high", "low", "close", "volume"]);
    for observation in time_series.series.observations().iter().rev() {
        table.push_row([
            observation.timestamp.to_string(),
            format!("{:.4}", observation.open),
            format!("{:.4}", observation.high),
            format!("{:.4}", observation.low),
            format!("{:.4}", observation.close),
            format!("{:.0}", observation.volume),
        ]);
    }
    table
}
