use std::future::Future;

use serde_json::Value;

use crate::error::SearchError;

/// Fetches the raw search envelope for a query.
///
/// [`crate::SearchClient`] is the HTTP implementation. Any failure, whether a
/// non-2xx status, a network error or an unparseable body, is returned as an
/// `Err` and ends the session as failed.
pub trait SearchTransport: Send + Sync {
    fn search(&self, query: &str) -> impl Future<Output = Result<Value, SearchError>> + Send;
}
