//! Derived figures over a normalized series.

use serde::{Deserialize, Serialize};

use crate::{InputError, MarketTimestamp, Observation, Series};

/// Result of buying at one close and holding until the latest close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOutcome {
    pub amount: f64,
    /// Observation whose close was the purchase price.
    pub entry: Observation,
    /// Latest observation in the series.
    pub exit: Observation,
    pub shares: f64,
    pub final_value: f64,
    pub profit: f64,
    /// `profit / amount`
    pub return_ratio: f64,
}

/// Invests `amount` at the close of the first observation on or after
/// `invested_on` and values the position at the latest close.
pub fn simulate_investment(
    series: &Series,
    invested_on: MarketTimestamp,
    amount: f64,
) -> Result<InvestmentOutcome, InputError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(InputError::InvalidAmount {
            value: amount.to_string(),
        });
    }

    let not_found = || InputError::NoObservationAfter {
        date: invested_on.to_string(),
    };
    let entry = *series
        .on_or_after(invested_on)
        .filter(|observation| observation.close > 0.0)
        .ok_or_else(not_found)?;
    let exit = *series.latest().ok_or_else(not_found)?;

    let shares = amount / entry.close;
    let final_value = shares * exit.close;
    let profit = final_value - amount;

    Ok(InvestmentOutcome {
        amount,
        entry,
        exit,
        shares,
        final_value,
        profit,
        return_ratio: profit / amount,
    })
}
