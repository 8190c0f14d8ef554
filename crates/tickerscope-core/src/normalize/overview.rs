use std::collections::BTreeMap;

use serde_json::Value;

use super::{coerce_f64, coerce_i64, require_object, require_string};
use crate::{CompanyOverview, FieldPath, ValidationError};

pub const OVERVIEW_TEXT_FIELDS: [&str; 14] = [
    "Symbol",
    "AssetType",
    "Name",
    "Description",
    "Exchange",
    "Currency",
    "Country",
    "Sector",
    "Industry",
    "Address",
    "FiscalYearEnd",
    "LatestQuarter",
    "DividendDate",
    "ExDividendDate",
];

pub const OVERVIEW_INTEGER_FIELDS: [&str; 6] = [
    "CIK",
    "MarketCapitalization",
    "EBITDA",
    "RevenueTTM",
    "GrossProfitTTM",
    "SharesOutstanding",
];

pub const OVERVIEW_FLOAT_FIELDS: [&str; 26] = [
    "PERatio",
    "PEGRatio",
    "BookValue",
    "DividendPerShare",
    "DividendYield",
    "EPS",
    "RevenuePerShareTTM",
    "ProfitMargin",
    "OperatingMarginTTM",
    "ReturnOnAssetsTTM",
    "ReturnOnEquityTTM",
    "DilutedEPSTTM",
    "QuarterlyEarningsGrowthYOY",
    "QuarterlyRevenueGrowthYOY",
    "AnalystTargetPrice",
    "TrailingPE",
    "ForwardPE",
    "PriceToSalesRatioTTM",
    "PriceToBookRatio",
    "EVToRevenue",
    "EVToEBITDA",
    "Beta",
    "52WeekHigh",
    "52WeekLow",
    "50DayMovingAverage",
    "200DayMovingAverage",
];

/// Flat overview object restricted to the known keys, values untouched.
///
/// Unknown upstream keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawOverview {
    fields: BTreeMap<&'static str, String>,
}

impl RawOverview {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn validate_overview(document: &Value) -> Result<RawOverview, ValidationError> {
    let root_path = FieldPath::root();
    let root = require_object(document, &root_path)?;

    let mut fields = BTreeMap::new();
    let keys = OVERVIEW_TEXT_FIELDS
        .iter()
        .chain(OVERVIEW_INTEGER_FIELDS.iter())
        .chain(OVERVIEW_FLOAT_FIELDS.iter());
    for key in keys {
        fields.insert(*key, require_string(root, key, &root_path)?);
    }

    Ok(RawOverview { fields })
}

struct FieldReader<'a> {
    raw: &'a RawOverview,
}

impl FieldReader<'_> {
    fn raw(&self, key: &str) -> Result<&str, ValidationError> {
        self.raw
            .get(key)
            .ok_or_else(|| ValidationError::missing(FieldPath::root().child(key), "a string"))
    }

    fn text(&self, key: &str) -> Result<String, ValidationError> {
        self.raw(key).map(str::to_owned)
    }

    fn integer(&self, key: &str) -> Result<i64, ValidationError> {
        coerce_i64(self.raw(key)?, &FieldPath::root().child(key))
    }

    fn float(&self, key: &str) -> Result<f64, ValidationError> {
        coerce_f64(self.raw(key)?, &FieldPath::root().child(key))
    }
}

pub fn project_overview(raw: &RawOverview) -> Result<CompanyOverview, ValidationError> {
    let r = FieldReader { raw };

    Ok(CompanyOverview {
        symbol: r.text("Symbol")?,
        asset_type: r.text("AssetType")?,
        name: r.text("Name")?,
        description: r.text("Description")?,
        cik: r.integer("CIK")?,
        exchange: r.text("Exchange")?,
        currency: r.text("Currency")?,
        country: r.text("Country")?,
        sector: r.text("Sector")?,
        industry: r.text("Industry")?,
        address: r.text("Address")?,
        fiscal_year_end: r.text("FiscalYearEnd")?,
        latest_quarter: r.text("LatestQuarter")?,
        market_capitalization: r.integer("MarketCapitalization")?,
        ebitda: r.integer("EBITDA")?,
        pe_ratio: r.float("PERatio")?,
        peg_ratio: r.float("PEGRatio")?,
        book_value: r.float("BookValue")?,
        dividend_per_share: r.float("DividendPerShare")?,
        dividend_yield: r.float("DividendYield")?,
        eps: r.float("EPS")?,
        revenue_per_share_ttm: r.float("RevenuePerShareTTM")?,
        profit_margin: r.float("ProfitMargin")?,
        operating_margin_ttm: r.float("OperatingMarginTTM")?,
        return_on_assets_ttm: r.float("ReturnOnAssetsTTM")?,
        return_on_equity_ttm: r.float("ReturnOnEquityTTM")?,
        revenue_ttm: r.integer("RevenueTTM")?,
        gross_profit_ttm: r.integer("GrossProfitTTM")?,
        diluted_eps_ttm: r.float("DilutedEPSTTM")?,
        quarterly_earnings_growth_yoy: r.float("QuarterlyEarningsGrowthYOY")?,
        quarterly_revenue_growth_yoy: r.float("QuarterlyRevenueGrowthYOY")?,
        analyst_target_price: r.float("AnalystTargetPrice")?,
        trailing_pe: r.float("TrailingPE")?,
        forward_pe: r.float("ForwardPE")?,
        price_to_sales_ratio_ttm: r.float("PriceToSalesRatioTTM")?,
        price_to_book_ratio: r.float("PriceToBookRatio")?,
        ev_to_revenue: r.float("EVToRevenue")?,
        ev_to_ebitda: r.float("EVToEBITDA")?,
        beta: r.float("Beta")?,
        week_52_high: r.float("52WeekHigh")?,
        week_52_low: r.float("52WeekLow")?,
        day_50_moving_average: r.float("50DayMovingAverage")?,
        day_200_moving_average: r.float("200DayMovingAverage")?,
        shares_outstanding: r.integer("SharesOutstanding")?,
        dividend_date: r.text("DividendDate")?,
        ex_dividend_date: r.text("ExDividendDate")?,
    })
}

pub fn normalize_overview(document: &Value) -> Result<CompanyOverview, ValidationError> {
    project_overview(&validate_overview(document)?)
}
