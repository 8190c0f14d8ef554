use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::InputError;

const MAX_SYMBOL_LEN: usize = 15;

/// Ticker symbol as the upstream API lists it.
///
/// Exchange-suffixed listings (`TSCO.LON`, `600104.SHH`), share classes
/// (`BRK-B`) and digit-leading codes all pass, so any `1. symbol` returned
/// by a search can be queried again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

const fn is_symbol_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_')
}

impl Symbol {
    /// Checks the trimmed input's charset and length, then uppercases it.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptySymbol);
        }

        if let Some((index, ch)) = trimmed
            .chars()
            .enumerate()
            .find(|(_, ch)| !is_symbol_char(*ch))
        {
            return Err(InputError::SymbolInvalidChar { ch, index });
        }

        // charset is ASCII from here on, so bytes and chars agree
        if trimmed.len() > MAX_SYMBOL_LEN {
            return Err(InputError::SymbolTooLong {
                len: trimmed.len(),
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = InputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
