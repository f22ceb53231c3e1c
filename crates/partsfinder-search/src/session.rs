//! The search session aggregate: one query lifecycle and its view state.
//!
//! A submit is split into two halves so that the session never has to be
//! borrowed across an `.await`: [`SearchSession::begin`] moves to `pending`
//! and hands out a [`PendingSearch`] ticket, and [`SearchSession::complete`]
//! applies the transport outcome for that ticket. Every `begin` bumps the
//! generation counter; a ticket from an older generation is stale and its
//! outcome is dropped, so only the most recent submit can ever mutate state.

use std::sync::Arc;

use partsfinder_core::StoreRegistry;
use serde::Serialize;
use serde_json::Value;

use crate::error::SearchError;
use crate::normalize::normalize;
use crate::results::SearchResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Idle,
    Pending,
    Success,
    Failed,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Idle => write!(f, "idle"),
            SearchStatus::Pending => write!(f, "pending"),
            SearchStatus::Success => write!(f, "success"),
            SearchStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Ticket for one in-flight submit, returned by [`SearchSession::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    generation: u64,
    query: String,
}

impl PendingSearch {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The trimmed query to send to the backend.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// User-facing text for a failed search.
#[must_use]
pub fn failure_message(err: &SearchError) -> String {
    format!("Error performing search: {err}. Please try again.")
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    registry: Arc<StoreRegistry>,
    query_text: String,
    status: SearchStatus,
    results: SearchResults,
    active_store_id: Option<String>,
    error_message: Option<String>,
    generation: u64,
}

impl SearchSession {
    /// Creates an `idle` session with no results.
    #[must_use]
    pub fn new(registry: Arc<StoreRegistry>) -> Self {
        Self {
            registry,
            query_text: String::new(),
            status: SearchStatus::Idle,
            results: SearchResults::new(),
            active_store_id: None,
            error_message: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// The last submitted query, trimmed.
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    #[must_use]
    pub fn results(&self) -> &SearchResults {
        &self.results
    }

    #[must_use]
    pub fn active_store_id(&self) -> Option<&str> {
        self.active_store_id.as_deref()
    }

    /// Present only while `status` is `failed`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `true` if `pending` belongs to the most recent submit.
    #[must_use]
    pub fn is_current(&self, pending: &PendingSearch) -> bool {
        pending.generation == self.generation
    }

    /// Starts a new search for `query`.
    ///
    /// A query that is empty after trimming is refused: nothing changes and
    /// `None` is returned. Otherwise prior results, error and active tab are
    /// cleared, the status becomes `pending`, and the returned ticket must be
    /// passed to [`Self::complete`] once the transport answers.
    pub fn begin(&mut self, query: &str) -> Option<PendingSearch> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty search query");
            return None;
        }

        self.generation += 1;
        self.query_text = query.to_owned();
        self.status = SearchStatus::Pending;
        self.results = SearchResults::new();
        self.active_store_id = None;
        self.error_message = None;

        tracing::debug!(query, generation = self.generation, "search submitted");
        Some(PendingSearch {
            generation: self.generation,
            query: self.query_text.clone(),
        })
    }

    /// Applies the transport outcome for `pending`.
    ///
    /// Stale tickets (a newer [`Self::begin`] has happened since) are
    /// discarded without touching state. Returns whether state changed.
    pub fn complete(
        &mut self,
        pending: &PendingSearch,
        outcome: Result<Value, SearchError>,
    ) -> bool {
        if !self.is_current(pending) {
            tracing::debug!(
                query = pending.query(),
                generation = pending.generation,
                current = self.generation,
                "discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(envelope) => {
                let results = normalize(&envelope, &pending.query, &self.registry);
                self.active_store_id = results
                    .ordered(&self.registry)
                    .into_iter()
                    .find(|s| !s.products.is_empty())
                    .map(|s| s.store.store_id.clone());
                tracing::info!(
                    query = pending.query(),
                    stores = results.len(),
                    products = results.total_products(),
                    active = self.active_store_id.as_deref().unwrap_or(""),
                    "search completed"
                );
                self.results = results;
                self.status = SearchStatus::Success;
            }
            Err(err) => {
                tracing::warn!(query = pending.query(), error = %err, "search failed");
                self.error_message = Some(failure_message(&err));
                self.status = SearchStatus::Failed;
            }
        }
        true
    }

    /// Switches the active tab to `store_id`.
    ///
    /// A no-op unless the store has at least one product in the current
    /// results. Returns whether the active tab changed.
    pub fn select_tab(&mut self, store_id: &str) -> bool {
        if !self.results.has_products(store_id) {
            tracing::debug!(store_id, "ignoring tab selection for store without results");
            return false;
        }
        if self.active_store_id.as_deref() == Some(store_id) {
            return false;
        }
        self.active_store_id = Some(store_id.to_owned());
        true
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
