//! HTTP client for the aggregated `GET /search` backend endpoint.

mod url;

use std::time::Duration;

use partsfinder_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::SearchError;
use crate::retry::retry_with_backoff;
use crate::transport::SearchTransport;

/// Client for the multi-store search backend.
///
/// Non-2xx responses surface as [`SearchError::UnexpectedStatus`] carrying
/// the status code, except 429 which becomes [`SearchError::RateLimited`].
/// Rate limiting and network failures are retried with exponential backoff
/// up to `max_retries` additional attempts.
pub struct SearchClient {
    client: Client,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl SearchClient {
    /// Creates a `SearchClient` with configured base URL, timeout, `User-Agent`
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidBaseUrl`] if `base_url` is not an http(s) URL.
    /// - [`SearchError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, SearchError> {
        let base_url = url::parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Creates a client from the `PARTSFINDER_*` settings in `config`.
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the raw response envelope for `query`.
    ///
    /// The body is returned as untyped JSON; working out its shape is the
    /// normalizer's job.
    ///
    /// # Errors
    ///
    /// - [`SearchError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`SearchError::UnexpectedStatus`]: any other non-2xx status (not retried).
    /// - [`SearchError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`SearchError::Deserialize`]: response body is not valid JSON (not retried).
    pub async fn fetch_envelope(&self, query: &str) -> Result<Value, SearchError> {
        let url = url::search_url(&self.base_url, query);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        // no hint: the configured backoff alone sets the wait
                        .unwrap_or(0);
                    return Err(SearchError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(SearchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Value>(&body).map_err(|e| SearchError::Deserialize {
                    context: format!("search response for \"{query}\""),
                    source: e,
                })
            }
        })
        .await
    }
}

impl SearchTransport for SearchClient {
    async fn search(&self, query: &str) -> Result<Value, SearchError> {
        self.fetch_envelope(query).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
