//! Normalization from raw backend envelopes to [`SearchResults`].
//!
//! Shape detection lives in [`crate::types`]; this module turns each store's
//! loosely-shaped products into [`Product`]s, applies the query-term filter,
//! and groups products under canonical store ids. Malformed input degrades
//! instead of failing: a bad product becomes an empty-titled product, a bad
//! envelope becomes an empty mapping.

use std::collections::{HashMap, HashSet};

use partsfinder_core::{Price, Product, StoreRegistry};
use serde_json::Value;

use crate::results::SearchResults;
use crate::types::{detect_envelope, is_store_result, RawEnvelope, RawProduct, RawStoreResult};

/// Normalizes a backend response body into the canonical per-store mapping.
///
/// Only products whose title contains `query` (case-insensitive, trimmed)
/// are kept. Product order within a store follows the envelope; entries whose
/// labels resolve to the same store are concatenated in the order seen.
#[must_use]
pub fn normalize(envelope: &Value, query: &str, registry: &StoreRegistry) -> SearchResults {
    let mut acc = Accumulator::new(registry, query.trim());

    match detect_envelope(envelope) {
        RawEnvelope::StoreMap(map) => {
            for (label, products) in map {
                match products.as_array() {
                    Some(products) => acc.push_store(label, products),
                    None => {
                        tracing::debug!(store = %label, "ignoring non-list store value in envelope");
                    }
                }
            }
        }
        RawEnvelope::ResultList(entries) => {
            for entry in entries {
                acc.push_result_entry(&RawStoreResult::from_value(entry));
            }
        }
        RawEnvelope::BareList(items) => {
            for entry in items {
                if is_store_result(entry) {
                    acc.push_result_entry(&RawStoreResult::from_value(entry));
                } else {
                    acc.push_tagged_product(entry);
                }
            }
        }
        RawEnvelope::Unrecognized => {
            tracing::warn!("search response is not a recognized envelope, treating as no results");
        }
    }

    acc.results
}

/// Converts one raw product into a [`Product`] without filtering.
///
/// `position` is the product's index in its store's list and becomes the
/// identifier when the vendor sent neither `sku` nor `id`.
#[must_use]
pub fn normalize_product(raw: RawProduct, position: usize, store_id: &str) -> Product {
    Product {
        identifier: raw.sku.or(raw.id).unwrap_or_else(|| position.to_string()),
        title: raw.title.or(raw.name).unwrap_or_default(),
        price: raw.price.map_or(Price::Unavailable, Price::Listed),
        image_url: raw.image,
        detail_url: raw.link.or(raw.url),
        store_id: store_id.to_owned(),
    }
}

/// Per-store bookkeeping that spans concatenated entries.
#[derive(Default)]
struct StoreCursor {
    /// Raw products seen so far, so positional ids continue across entries.
    raw_seen: usize,
    /// Identifiers already handed out in this store's list.
    ids: HashSet<String>,
}

struct Accumulator<'a> {
    registry: &'a StoreRegistry,
    query: &'a str,
    cursors: HashMap<String, StoreCursor>,
    results: SearchResults,
}

impl<'a> Accumulator<'a> {
    fn new(registry: &'a StoreRegistry, query: &'a str) -> Self {
        Self {
            registry,
            query,
            cursors: HashMap::new(),
            results: SearchResults::new(),
        }
    }

    fn push_result_entry(&mut self, entry: &RawStoreResult) {
        let Some(label) = entry.label() else {
            tracing::warn!("skipping store result with no site label");
            return;
        };
        if !entry.is_successful() {
            tracing::debug!(store = %label, "skipping unsuccessful store result");
            return;
        }
        self.push_store(label, entry.product_values());
    }

    /// A bare product in a result list, grouped by its own `store`/`site`.
    fn push_tagged_product(&mut self, value: &Value) {
        let raw = RawProduct::from_value(value);
        match raw.store_label().map(str::to_owned) {
            Some(label) => self.push_raw(&label, vec![raw]),
            None => tracing::warn!("skipping product with no store label outside a store entry"),
        }
    }

    fn push_store(&mut self, label: &str, products: &[Value]) {
        let raws = products.iter().map(RawProduct::from_value).collect();
        self.push_raw(label, raws);
    }

    fn push_raw(&mut self, label: &str, raws: Vec<RawProduct>) {
        let store = self.registry.resolve(label);
        let cursor = self.cursors.entry(store.store_id.clone()).or_default();
        let offset = cursor.raw_seen;
        cursor.raw_seen += raws.len();

        let mut kept = Vec::new();
        for (idx, raw) in raws.into_iter().enumerate() {
            let position = offset + idx;
            let mut product = normalize_product(raw, position, &store.store_id);
            if !product.title_matches(self.query) {
                continue;
            }
            while cursor.ids.contains(&product.identifier) {
                product.identifier = format!("{}#{position}", product.identifier);
            }
            cursor.ids.insert(product.identifier.clone());
            kept.push(product);
        }

        tracing::debug!(
            store = %store.store_id,
            label,
            kept = kept.len(),
            "normalized store results"
        );
        self.results.append(store, kept);
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
