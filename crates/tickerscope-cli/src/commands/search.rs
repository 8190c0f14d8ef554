use serde::Serialize;

use tickerscope_core::{AlphaVantageClient, Function, SymbolMatch};

use crate::cli::SearchArgs;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<SymbolMatch>,
}

pub async fn run(client: &AlphaVantageClient, args: &SearchArgs) -> Result<CommandResult, CliError> {
    let query = args.keywords.join(" ");
    let results = client.search_symbols(&query).await?;

    let mut table = Table::new(["symbol", "name", "type", "region", "currency", "score"]);
    for candidate in &results {
        table.push_row([
            candidate.symbol.clone(),
            candidate.name.clone(),
            candidate.instrument_type.clone(),
            candidate.region.clone(),
            candidate.currency.clone(),
            format!("{:.4}", candidate.match_score),
        ]);
    }

    let data = serde_json::to_value(SearchResponseData {
        query: query.trim().to_owned(),
        results,
    })?;
    Ok(CommandResult::new(Function::SymbolSearch, data, table))
}
