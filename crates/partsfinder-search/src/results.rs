//! The canonical `store → products` mapping produced by the normalizer.

use std::collections::BTreeMap;

use partsfinder_core::{Product, StoreDescriptor, StoreRegistry};
use serde::Serialize;

/// One store's normalized products, with the descriptor its label resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreResults {
    pub store: StoreDescriptor,
    /// Products in the order the backend returned them.
    pub products: Vec<Product>,
}

/// Normalized search results keyed by canonical store id.
///
/// Keys carry no display order of their own; use [`SearchResults::ordered`]
/// to walk stores the way they are presented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResults {
    stores: BTreeMap<String, StoreResults>,
}

impl SearchResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Products for `store_id`, or `None` if the store is not in the mapping.
    #[must_use]
    pub fn get(&self, store_id: &str) -> Option<&[Product]> {
        self.stores.get(store_id).map(|s| s.products.as_slice())
    }

    #[must_use]
    pub fn store(&self, store_id: &str) -> Option<&StoreResults> {
        self.stores.get(store_id)
    }

    /// `true` if `store_id` is present with at least one product.
    #[must_use]
    pub fn has_products(&self, store_id: &str) -> bool {
        self.get(store_id).is_some_and(|p| !p.is_empty())
    }

    /// Number of stores in the mapping, including stores with no products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn total_products(&self) -> usize {
        self.stores.values().map(|s| s.products.len()).sum()
    }

    /// Iterates stores by canonical id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoreResults)> {
        self.stores.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Stores in presentation order: registry order first, then stores the
    /// registry does not know, by id.
    #[must_use]
    pub fn ordered<'a>(&'a self, registry: &StoreRegistry) -> Vec<&'a StoreResults> {
        let known = registry
            .stores()
            .iter()
            .filter_map(|s| self.stores.get(&s.store_id));
        let unknown = self
            .stores
            .values()
            .filter(|s| registry.position(&s.store.store_id).is_none());
        known.chain(unknown).collect()
    }

    /// Appends `products` to the list for `store`, creating the entry if needed.
    pub fn append(&mut self, store: StoreDescriptor, products: Vec<Product>) {
        self.stores
            .entry(store.store_id.clone())
            .or_insert_with(|| StoreResults {
                store,
                products: Vec::new(),
            })
            .products
            .extend(products);
    }
}
