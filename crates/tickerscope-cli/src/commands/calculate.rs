use serde::Serialize;

use tickerscope_core::{
    simulate_investment, AlphaVantageClient, Granularity, InvestmentOutcome, MarketTimestamp,
    OutputSize, Symbol,
};

use crate::cli::CalculateArgs;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CalculationData {
    symbol: String,
    granularity: Granularity,
    outcome: InvestmentOutcome,
}

pub async fn run(
    client: &AlphaVantageClient,
    args: &CalculateArgs,
) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let invested_on = MarketTimestamp::parse(&args.date)?;
    let granularity = args.series.granularity();

    // compact daily output only reaches back about 100 sessions
    let output_size = Some(OutputSize::Full).filter(|_| granularity == Granularity::Daily);
    let time_series = client
        .time_series(&symbol, granularity, output_size)
        .await?;
    let outcome = simulate_investment(&time_series.series, invested_on, args.amount)?;

    let table = outcome_table(&outcome);
    let data = serde_json::to_value(CalculationData {
        symbol: symbol.to_string(),
        granularity,
        outcome,
    })?;
    Ok(CommandResult::new(granularity.function(), data, table))
}

fn outcome_table(outcome: &InvestmentOutcome) -> Table {
    let mut table = Table::new(["field", "value"]);
    table.push_row(["amount".to_owned(), format!("{:.2}", outcome.amount)]);
    table.push_row(["bought_on".to_owned(), outcome.entry.timestamp.to_string()]);
    table.push_row(["buy_price".to_owned(), format!("{:.4}", outcome.entry.close)]);
    table.push_row(["valued_on".to_owned(), outcome.exit.timestamp.to_string()]);
    table.push_row(["latest_price".to_owned(), format!("{:.4}", outcome.exit.close)]);
    table.push_row(["shares".to_owned(), format!("{:.6}", outcome.shares)]);
    table.push_row(["final_value".to_owned(), format!("{:.2}", outcome.final_value)]);
    table.push_row(["profit".to_owned(), format!("{:.2}", outcome.profit)]);
    table.push_row([
        "return".to_owned(),
        format!("{:.2}%", outcome.return_ratio * 100.0),
    ]);
    table
}
