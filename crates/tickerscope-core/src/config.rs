//! Client configuration.
//!
//! Values come from code, from the process environment, or from any
//! key-value lookup:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `TICKERSCOPE_API_KEYS` | comma-separated ordered key list (required) |
//! | `TICKERSCOPE_CALLS_PER_KEY` | per-key call limit |
//! | `TICKERSCOPE_BASE_URL` | upstream base URL |
//! | `TICKERSCOPE_TIMEOUT_MS` | per-request timeout in milliseconds |

use std::env;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;

use crate::fetcher::DEFAULT_RATE_LIMIT_NOTICE;
use crate::ConfigError;

pub const API_KEYS_VAR: &str = "TICKERSCOPE_API_KEYS";
pub const CALLS_PER_KEY_VAR: &str = "TICKERSCOPE_CALLS_PER_KEY";
pub const BASE_URL_VAR: &str = "TICKERSCOPE_BASE_URL";
pub const TIMEOUT_MS_VAR: &str = "TICKERSCOPE_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_CALLS_PER_KEY: u32 = 5;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Public credential the upstream accepts for its documented sample symbols.
pub const DEMO_API_KEY: &str = "demo";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_keys: Vec<String>,
    pub calls_per_key: u32,
    pub base_url: String,
    pub timeout_ms: u64,
    pub rate_limit_notice: String,
}

impl ClientConfig {
    pub fn new<I, K>(api_keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            api_keys: api_keys.into_iter().map(Into::into).collect(),
            calls_per_key: DEFAULT_CALLS_PER_KEY,
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            rate_limit_notice: String::from(DEFAULT_RATE_LIMIT_NOTICE),
        }
    }

    pub fn demo() -> Self {
        Self::new([DEMO_API_KEY])
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let keys = read(API_KEYS_VAR).ok_or(ConfigError::MissingVariable { name: API_KEYS_VAR })?;
        let mut config = Self::new(split_keys(&keys));

        if let Some(raw) = read(CALLS_PER_KEY_VAR) {
            config.calls_per_key = parse_var(CALLS_PER_KEY_VAR, &raw)?;
        }
        if let Some(raw) = read(BASE_URL_VAR) {
            config.base_url = raw.trim().to_owned();
        }
        if let Some(raw) = read(TIMEOUT_MS_VAR) {
            config.timeout_ms = parse_var(TIMEOUT_MS_VAR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_calls_per_key(mut self, calls_per_key: u32) -> Self {
        self.calls_per_key = calls_per_key;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_rate_limit_notice(mut self, notice: impl Into<String>) -> Self {
        self.rate_limit_notice = notice.into();
        self
    }

    /// Checks the same invariants the credential pool enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_keys.is_empty() {
            return Err(ConfigError::EmptyCredentialPool);
        }
        if let Some(index) = self.api_keys.iter().position(|key| key.trim().is_empty()) {
            return Err(ConfigError::BlankCredential { index });
        }
        if self.calls_per_key == 0 {
            return Err(ConfigError::ZeroCallLimit);
        }
        Ok(())
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_keys", &format_args!("[{} redacted]", self.api_keys.len()))
            .field("calls_per_key", &self.calls_per_key)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

/// Splits a comma-separated key list; empty segments are kept so they fail validation.
fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',').map(|key| key.trim().to_owned()).collect()
}

fn parse_var<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidVariable {
            name,
            value: raw.to_owned(),
        })
}
