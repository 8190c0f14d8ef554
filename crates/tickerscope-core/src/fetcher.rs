//! Key-rotating fetcher.
//!
//! The upstream enforces a hard per-key quota and answers over-quota calls
//! with HTTP 200 and a `{"Note": "..."}` body. On that sentinel the fetcher
//! moves to the next key and tries again, sequentially, until the pool's
//! attempt ceiling is exceeded.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::credentials::CredentialPool;
use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::query::QueryParams;
use crate::{ClientConfig, ConfigError, QueryError, ValidationError};

/// Notice text the upstream returns when a key is over its call frequency.
pub const DEFAULT_RATE_LIMIT_NOTICE: &str = "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day. Please visit https://www.alphavantage.co/premium/ if you would like to target a higher API call frequency.";

/// Key of the rate-limit sentinel object.
pub const RATE_LIMIT_NOTE_KEY: &str = "Note";

pub struct KeyRotatingFetcher {
    http_client: Arc<dyn HttpClient>,
    pool: CredentialPool,
    base_url: String,
    timeout_ms: u64,
    rate_limit_notice: String,
}

impl KeyRotatingFetcher {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        pool: CredentialPool,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            pool,
            base_url: base_url.into(),
            timeout_ms: 5_000,
            rate_limit_notice: String::from(DEFAULT_RATE_LIMIT_NOTICE),
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, ConfigError> {
        let pool = CredentialPool::new(config.api_keys.clone(), config.calls_per_key)?;
        Ok(Self::new(http_client, pool, config.base_url.clone())
            .with_timeout_ms(config.timeout_ms)
            .with_rate_limit_notice(config.rate_limit_notice.clone()))
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_rate_limit_notice(mut self, notice: impl Into<String>) -> Self {
        self.rate_limit_notice = notice.into();
        self
    }

    pub fn pool(&self) -> &CredentialPool {
        &self.pool
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when `body` is the upstream's rate-limit notice and nothing else.
    pub fn is_rate_limit_notice(&self, body: &Value) -> bool {
        let Some(object) = body.as_object() else {
            return false;
        };
        object
            .get(RATE_LIMIT_NOTE_KEY)
            .and_then(Value::as_str)
            .is_some_and(|note| note.trim() == self.rate_limit_notice.trim())
    }

    /// Performs the GET for `params`, rotating keys on the rate-limit notice.
    ///
    /// Returns the raw JSON body; shape checks belong to the normalizer.
    pub async fn fetch(&self, params: &QueryParams) -> Result<Value, QueryError> {
        loop {
            let attempt = match self.pool.begin_attempt() {
                Ok(attempt) => attempt,
                Err(error) => {
                    warn!(
                        function = %params.function(),
                        ceiling = self.pool.attempt_ceiling(),
                        "credential pool exhausted"
                    );
                    return Err(error);
                }
            };

            debug!(
                function = %params.function(),
                attempt = attempt.number,
                credential = attempt.credential_index,
                "issuing upstream request"
            );

            let request = self.build_request(params, attempt.credential_index);
            let response = self.http_client.execute(request).await?;
            let body = serde_json::from_str::<Value>(&response.body);

            if body
                .as_ref()
                .is_ok_and(|value| self.is_rate_limit_notice(value))
            {
                let next = self.pool.rotate();
                warn!(
                    function = %params.function(),
                    attempt = attempt.number,
                    credential = attempt.credential_index,
                    next_credential = next,
                    "rate limit notice received, rotating credential"
                );
                continue;
            }

            if !response.is_success() {
                return Err(HttpError::from_status(response.status).into());
            }

            return body.map_err(|error| ValidationError::malformed_document(error.to_string()).into());
        }
    }

    fn build_request(&self, params: &QueryParams, credential_index: usize) -> HttpRequest {
        let request = params.pairs().into_iter().fold(
            HttpRequest::get(&self.base_url),
            |request, (name, value)| request.with_query(name, value),
        );
        request
            .with_query("apikey", self.pool.key(credential_index))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms)
    }
}
