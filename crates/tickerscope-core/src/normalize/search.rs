use serde_json::{Map, Value};

use super::{coerce_f64, require_field, require_object, require_string};
use crate::{FieldPath, SymbolMatch, ValidationError};

pub const BEST_MATCHES_KEY: &str = "bestMatches";

const SYMBOL_KEY: &str = "1. symbol";
const NAME_KEY: &str = "2. name";
const TYPE_KEY: &str = "3. type";
const REGION_KEY: &str = "4. region";
const MARKET_OPEN_KEY: &str = "5. marketOpen";
const MARKET_CLOSE_KEY: &str = "6. marketClose";
const TIMEZONE_KEY: &str = "7. timezone";
const CURRENCY_KEY: &str = "8. currency";
const MATCH_SCORE_KEY: &str = "9. matchScore";

/// One `bestMatches` candidate with all nine upstream fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub symbol: String,
    pub name: String,
    pub instrument_type: String,
    pub region: String,
    pub market_open: String,
    pub market_close: String,
    pub timezone: String,
    pub currency: String,
    pub match_score: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSearch {
    pub candidates: Vec<RawCandidate>,
}

pub fn validate_search(document: &Value) -> Result<RawSearch, ValidationError> {
    let root_path = FieldPath::root();
    let root = require_object(document, &root_path)?;

    let matches_path = root_path.child(BEST_MATCHES_KEY);
    let matches = require_field(root, BEST_MATCHES_KEY, &root_path, "an array")?;
    let matches = matches
        .as_array()
        .ok_or_else(|| ValidationError::unexpected_type(matches_path.clone(), "an array", matches))?;

    let candidates = matches
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let path = matches_path.index(index);
            validate_candidate(require_object(candidate, &path)?, &path)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawSearch { candidates })
}

fn validate_candidate(
    candidate: &Map<String, Value>,
    path: &FieldPath,
) -> Result<RawCandidate, ValidationError> {
    let field = |key: &str| require_string(candidate, key, path);

    Ok(RawCandidate {
        symbol: field(SYMBOL_KEY)?,
        name: field(NAME_KEY)?,
        instrument_type: field(TYPE_KEY)?,
        region: field(REGION_KEY)?,
        market_open: field(MARKET_OPEN_KEY)?,
        market_close: field(MARKET_CLOSE_KEY)?,
        timezone: field(TIMEZONE_KEY)?,
        currency: field(CURRENCY_KEY)?,
        match_score: field(MATCH_SCORE_KEY)?,
    })
}

/// Market hours are dropped; upstream order is kept.
pub fn project_search(raw: RawSearch) -> Result<Vec<SymbolMatch>, ValidationError> {
    let matches_path = FieldPath::root().child(BEST_MATCHES_KEY);

    raw.candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let score_path = matches_path.index(index).child(MATCH_SCORE_KEY);
            let match_score = coerce_f64(&candidate.match_score, &score_path)?;
            if !(0.0..=1.0).contains(&match_score) {
                return Err(ValidationError::out_of_range(
                    score_path,
                    "a score between 0 and 1",
                    &candidate.match_score,
                ));
            }

            Ok(SymbolMatch {
                symbol: candidate.symbol,
                name: candidate.name,
                instrument_type: candidate.instrument_type,
                region: candidate.region,
                timezone: candidate.timezone,
                currency: candidate.currency,
                match_score,
            })
        })
        .collect()
}

pub fn normalize_search(document: &Value) -> Result<Vec<SymbolMatch>, ValidationError> {
    project_search(validate_search(document)?)
}
