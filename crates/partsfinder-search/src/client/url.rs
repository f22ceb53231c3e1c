//! URL helpers for the search client.

use reqwest::Url;

use crate::error::SearchError;

/// Parses the configured backend base URL.
///
/// The result always ends in exactly one `/` so that joining `search`
/// appends to any path prefix (`https://host/api` → `https://host/api/search`)
/// instead of replacing its last segment.
pub(super) fn parse_base_url(base_url: &str) -> Result<Url, SearchError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    Ok(url)
}

/// Builds `<base>/search?q=<query>` with the query form-encoded.
pub(super) fn search_url(base: &Url, query: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("search");
    }
    url.query_pairs_mut().clear().append_pair("q", query);
    url
}
