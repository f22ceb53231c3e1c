//! Handler for `partsfinder search`.
//!
//! Drives a single [`SearchController`] submission to completion and prints
//! the resulting view. A failed session is reported on stderr through the
//! returned error so the process exits non-zero.

use std::sync::Arc;

use partsfinder_search::{results_view, SearchClient, SearchController, SearchStatus};

use crate::render;

/// Run one search and print the outcome.
///
/// # Errors
///
/// Returns an error if the store registry or HTTP client cannot be built,
/// the query is blank, or the search itself fails.
pub(crate) async fn run_search(
    config: &partsfinder_core::AppConfig,
    query: &str,
    store: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let registry = Arc::new(config.store_registry()?);
    let client = SearchClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build search client: {e}"))?;
    tracing::debug!(base_url = %client.base_url(), "search client ready");

    let controller = SearchController::new(client, registry);
    let handle = controller
        .submit(query)
        .ok_or_else(|| anyhow::anyhow!("search query must not be blank"))?;
    handle.await?;

    if let Some(store_id) = store {
        if !controller.select_tab(store_id) {
            let active = controller.snapshot().active_store_id().map(str::to_owned);
            tracing::warn!(
                store = %store_id,
                active = ?active,
                "requested store has no results; keeping default tab"
            );
        }
    }

    let session = controller.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&results_view(&session))?);
    } else if session.status() != SearchStatus::Failed {
        print!("{}", render::render_session(&session));
    }

    if session.status() == SearchStatus::Failed {
        anyhow::bail!(
            "{}",
            session.error_message().unwrap_or("search failed")
        );
    }
    Ok(())
}
