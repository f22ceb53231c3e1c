//! Retry with exponential backoff for transient search backend errors.
//!
//! Only rate limiting (429) and network-level failures are retried. A bad
//! status or an unparseable body will not change on a second try.

use std::future::Future;
use std::time::Duration;

use crate::error::SearchError;

/// Returns `true` if `err` is transient and worth retrying after a delay.
fn is_retriable(err: &SearchError) -> bool {
    matches!(err, SearchError::RateLimited { .. } | SearchError::Http(_))
}

/// Seconds to wait before retry `attempt + 1`: `backoff_base_secs * 2^attempt`,
/// or the server's `Retry-After` when a 429 asked for longer.
fn backoff_delay_secs(err: &SearchError, attempt: u32, backoff_base_secs: u64) -> u64 {
    let backoff = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    match err {
        SearchError::RateLimited { retry_after_secs } => backoff.max(*retry_after_secs),
        _ => backoff,
    }
}

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds, stretched to the `Retry-After` value of a 429 when that is
/// longer. With `max_retries = 1` the operation runs at most twice.
/// Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, SearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_delay_secs(&err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient search error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
