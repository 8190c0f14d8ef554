use tickerscope_core::{AlphaVantageClient, CompanyOverview, Function, Symbol};

use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

pub async fn run(client: &AlphaVantageClient, symbol: &str) -> Result<CommandResult, CliError> {
    let symbol = Symbol::parse(symbol)?;
    let overview = client.overview(&symbol).await?;

    let table = overview_table(&overview);
    let data = serde_json::to_value(&overview)?;
    Ok(CommandResult::new(Function::Overview, data, table))
}

/// Headline fields only; the JSON output carries everything.
fn overview_table(overview: &CompanyOverview) -> Table {
    let mut table = Table::new(["field", "value"]);
    let rows: [(&str, String); 14] = [
        ("symbol", overview.symbol.clone()),
        ("name", overview.name.clone()),
        ("exchange", overview.exchange.clone()),
        ("currency", overview.currency.clone()),
        ("sector", overview.sector.clone()),
        ("industry", overview.industry.clone()),
        ("market_capitalization", overview.market_capitalization.to_string()),
        ("pe_ratio", overview.pe_ratio.to_string()),
        ("eps", overview.eps.to_string()),
        ("dividend_yield", overview.dividend_yield.to_string()),
        ("beta", overview.beta.to_string()),
        ("week_52_high", overview.week_52_high.to_string()),
        ("week_52_low", overview.week_52_low.to_string()),
        ("analyst_target_price", overview.analyst_target_price.to_string()),
    ];
    for (field, value) in rows {
        table.push_row([field.to_owned(), value]);
    }
    table
}
