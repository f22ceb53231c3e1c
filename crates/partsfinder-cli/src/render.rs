//! Plain-text rendering of a search session and the store registry.

use partsfinder_core::{Product, StoreRegistry};
use partsfinder_search::projection::{empty_state_message, summary};
use partsfinder_search::{active_products, stores_with_results, SearchSession, SearchStatus};

/// Renders the session as the terminal equivalent of the results screen:
/// summary line, store tabs, then the active tab's products.
pub(crate) fn render_session(session: &SearchSession) -> String {
    let mut lines: Vec<String> = Vec::new();
    match session.status() {
        SearchStatus::Idle => {}
        SearchStatus::Pending => lines.push("Searching...".to_owned()),
        SearchStatus::Failed => {
            if let Some(message) = session.error_message() {
                lines.push(message.to_owned());
            }
        }
        SearchStatus::Success => {
            if let Some(message) = empty_state_message(session) {
                lines.push(message);
            }
            if let Some(line) = summary(session) {
                lines.push(line);
                lines.push(String::new());
                lines.push(render_tabs(session));
                lines.push(String::new());
                lines.extend(active_products(session).iter().map(render_product));
            }
        }
    }

    if lines.is_empty() {
        String::new()
    } else {
        lines.join("\n") + "\n"
    }
}

/// One line of tabs; the active one is wrapped in brackets.
fn render_tabs(session: &SearchSession) -> String {
    stores_with_results(session)
        .iter()
        .map(|tab| {
            let label = format!("{} ({})", tab.store.display_name, tab.count);
            if tab.active {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_product(product: &Product) -> String {
    let mut block = format!("- {}  {}", display_title(product), product.price);
    if let Some(url) = &product.detail_url {
        block.push_str(&format!("\n    {url}"));
    }
    if let Some(image) = &product.image_url {
        block.push_str(&format!("\n    image: {image}"));
    }
    block
}

fn display_title(product: &Product) -> &str {
    if product.title.is_empty() {
        "(untitled)"
    } else {
        &product.title
    }
}

pub(crate) fn render_stores(registry: &StoreRegistry) -> String {
    let width = registry
        .stores()
        .iter()
        .map(|s| s.store_id.len())
        .max()
        .unwrap_or(0);
    registry
        .stores()
        .iter()
        .map(|s| format!("{:width$}  {}\n", s.store_id, s.display_name))
        .collect()
}
