//! Async driver that owns a [`SearchSession`] and runs its transport calls.
//!
//! The session lives inside a `tokio::sync::watch` channel: every mutation
//! goes through `send_if_modified`, which serializes writers and wakes
//! subscribers only when the session actually changed. Transport calls run
//! on spawned tasks and are never cancelled; a superseded call still
//! finishes, and the session drops its outcome because the ticket is stale.

use std::sync::Arc;

use partsfinder_core::StoreRegistry;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::session::SearchSession;
use crate::transport::SearchTransport;

pub struct SearchController<T> {
    transport: Arc<T>,
    state: Arc<watch::Sender<SearchSession>>,
}

impl<T> Clone for SearchController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> SearchController<T>
where
    T: SearchTransport + 'static,
{
    #[must_use]
    pub fn new(transport: T, registry: Arc<StoreRegistry>) -> Self {
        let (state, _) = watch::channel(SearchSession::new(registry));
        Self {
            transport: Arc::new(transport),
            state: Arc::new(state),
        }
    }

    /// Submits `query` and returns immediately.
    ///
    /// Returns `None` (and changes nothing) for a blank query. Otherwise the
    /// session is `pending` when this returns, and the handle resolves once
    /// the transport outcome has been applied or discarded. Dropping the
    /// handle does not cancel the search.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, query: &str) -> Option<JoinHandle<()>> {
        let mut pending = None;
        self.state.send_if_modified(|session| {
            pending = session.begin(query);
            pending.is_some()
        });
        let pending = pending?;

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        Some(tokio::spawn(async move {
            let outcome = transport.search(pending.query()).await;
            state.send_if_modified(|session| session.complete(&pending, outcome));
        }))
    }

    /// Switches the active tab; a no-op unless `store_id` has results.
    /// Returns whether the active tab changed.
    pub fn select_tab(&self, store_id: &str) -> bool {
        self.state
            .send_if_modified(|session| session.select_tab(store_id))
    }

    /// A copy of the current session state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    /// A receiver that is notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }
}
