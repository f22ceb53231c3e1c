//! Read-only view state derived from a [`SearchSession`].
//!
//! Every function here is pure and safe to call in any status; none of them
//! mutate the session.

use partsfinder_core::{Product, StoreDescriptor};
use serde::Serialize;

use crate::session::{SearchSession, SearchStatus};

/// A store tab: a store with results, its product count, and whether it is
/// the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreTab<'a> {
    pub store: &'a StoreDescriptor,
    pub count: usize,
    pub active: bool,
}

/// Everything a presentation layer needs to draw the results screen.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView<'a> {
    pub query: &'a str,
    pub status: SearchStatus,
    pub total: usize,
    pub tabs: Vec<StoreTab<'a>>,
    pub active_store_id: Option<&'a str>,
    pub active_products: &'a [Product],
    pub summary: Option<String>,
    pub empty_state: Option<String>,
    pub error_message: Option<&'a str>,
}

/// Sum of product counts across all stores.
#[must_use]
pub fn total_result_count(session: &SearchSession) -> usize {
    session.results().total_products()
}

/// Stores with at least one product, in registry order followed by stores
/// the registry does not know.
#[must_use]
pub fn stores_with_results(session: &SearchSession) -> Vec<StoreTab<'_>> {
    let active = session.active_store_id();
    session
        .results()
        .ordered(session.registry())
        .into_iter()
        .filter(|s| !s.products.is_empty())
        .map(|s| StoreTab {
            store: &s.store,
            count: s.products.len(),
            active: active == Some(s.store.store_id.as_str()),
        })
        .collect()
}

/// Products of the active tab; empty when no tab is active.
#[must_use]
pub fn active_products(session: &SearchSession) -> &[Product] {
    session
        .active_store_id()
        .and_then(|id| session.results().get(id))
        .unwrap_or_default()
}

#[must_use]
pub fn is_loading(session: &SearchSession) -> bool {
    session.status() == SearchStatus::Pending
}

/// `"Found N products in M stores"` after a search that found something.
#[must_use]
pub fn summary(session: &SearchSession) -> Option<String> {
    let total = total_result_count(session);
    if session.status() != SearchStatus::Success || total == 0 {
        return None;
    }
    let stores = stores_with_results(session).len();
    Some(format!("Found {total} products in {stores} stores"))
}

/// The "nothing found" message after a successful search with no products.
#[must_use]
pub fn empty_state_message(session: &SearchSession) -> Option<String> {
    if session.status() != SearchStatus::Success || total_result_count(session) > 0 {
        return None;
    }
    Some(format!(
        "No products found for \"{}\"",
        session.query_text()
    ))
}

/// Collects every projection into one value.
#[must_use]
pub fn results_view(session: &SearchSession) -> ResultsView<'_> {
    ResultsView {
        query: session.query_text(),
        status: session.status(),
        total: total_result_count(session),
        tabs: stores_with_results(session),
        active_store_id: session.active_store_id(),
        active_products: active_products(session),
        summary: summary(session),
        empty_state: empty_state_message(session),
        error_message: session.error_message(),
    }
}
