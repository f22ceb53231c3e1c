use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Presentation tag given to stores the registry does not know.
pub const DEFAULT_PRESENTATION_TAG: &str = "bg-gray-500";

/// Store id used when a raw label contains nothing sluggable.
pub const UNKNOWN_STORE_ID: &str = "unknown";

const BUILTIN_STORES: &[(&str, &str, &str)] = &[
    ("iml-home", "IML Home", "bg-blue-600"),
    ("wesco", "Wesco", "bg-orange-600"),
    ("banner-solutions", "Banner Solutions", "bg-red-600"),
    ("seclock", "SECLOCK", "bg-gray-700"),
    ("door-controls-usa", "Door Controls USA", "bg-green-600"),
    ("systems-depot", "The Systems Depot Inc", "bg-purple-600"),
    ("adi-global", "ADI Global", "bg-indigo-600"),
    ("silmar-electronics", "Silmar Electronics", "bg-teal-600"),
];

/// A vendor the search backend can report results for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDescriptor {
    #[serde(rename = "id")]
    pub store_id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Opaque styling token for the presentation layer (e.g. a CSS class).
    #[serde(rename = "tag", default = "default_tag")]
    pub presentation_tag: String,
}

fn default_tag() -> String {
    DEFAULT_PRESENTATION_TAG.to_owned()
}

impl StoreDescriptor {
    #[must_use]
    pub fn new(store_id: &str, display_name: &str, presentation_tag: &str) -> Self {
        Self {
            store_id: store_id.to_owned(),
            display_name: display_name.to_owned(),
            presentation_tag: presentation_tag.to_owned(),
        }
    }

    /// Builds a descriptor for a store label the registry does not know.
    #[must_use]
    pub fn synthesized(raw_name: &str) -> Self {
        let slug = slugify(raw_name);
        let store_id = if slug.is_empty() {
            UNKNOWN_STORE_ID.to_owned()
        } else {
            slug
        };
        Self {
            store_id,
            display_name: raw_name.trim().to_owned(),
            presentation_tag: DEFAULT_PRESENTATION_TAG.to_owned(),
        }
    }
}

/// Generate a URL-safe slug from a store label.
///
/// Every run of non-alphanumeric characters becomes a single `-`, e.g.
/// `"The Systems Depot, Inc."` becomes `"the-systems-depot-inc"`.
#[must_use]
pub fn slugify(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Lowercases a label and collapses punctuation and whitespace to single
/// spaces so that `"SECLOCK"`, `" Seclock "` and `"door-controls-usa"` /
/// `"Door Controls, USA"` compare equal.
fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The immutable, ordered catalog of known stores.
///
/// Registry order is the display order for tabs and decides which store is
/// selected by default after a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRegistry {
    stores: Vec<StoreDescriptor>,
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StoreRegistry {
    /// The registry of security and electrical suppliers shipped with the
    /// application.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            stores: BUILTIN_STORES
                .iter()
                .map(|(id, name, tag)| StoreDescriptor::new(id, name, tag))
                .collect(),
        }
    }

    /// Creates a registry from an explicit store list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the list is empty, an id or
    /// name is blank, an id is not already a slug, or two stores share an
    /// id or a normalized name.
    pub fn new(stores: Vec<StoreDescriptor>) -> Result<Self, ConfigError> {
        validate_stores(&stores)?;
        Ok(Self { stores })
    }

    /// All stores in registry order.
    #[must_use]
    pub fn stores(&self) -> &[StoreDescriptor] {
        &self.stores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn get(&self, store_id: &str) -> Option<&StoreDescriptor> {
        self.stores.iter().find(|s| s.store_id == store_id)
    }

    /// Registry rank of `store_id`, or `None` for stores outside the registry.
    #[must_use]
    pub fn position(&self, store_id: &str) -> Option<usize> {
        self.stores.iter().position(|s| s.store_id == store_id)
    }

    /// Maps a raw backend store label onto a descriptor.
    ///
    /// Tries an exact canonical-id match, then a case, whitespace and
    /// punctuation insensitive match against each store's name and id. Labels
    /// that match nothing get a synthesized descriptor so their products are
    /// never dropped.
    #[must_use]
    pub fn resolve(&self, raw_store_name: &str) -> StoreDescriptor {
        if let Some(store) = self.get(raw_store_name) {
            return store.clone();
        }

        let wanted = normalize_label(raw_store_name);
        if !wanted.is_empty() {
            let found = self.stores.iter().find(|s| {
                normalize_label(&s.display_name) == wanted || normalize_label(&s.store_id) == wanted
            });
            if let Some(store) = found {
                return store.clone();
            }
        }

        StoreDescriptor::synthesized(raw_store_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreDescriptor>,
}

/// Load and validate a store registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_store_registry(path: &Path) -> Result<StoreRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let stores_file: StoresFile =
        serde_yaml::from_str(&content).map_err(ConfigError::StoresFileParse)?;

    StoreRegistry::new(stores_file.stores)
}

fn validate_stores(stores: &[StoreDescriptor]) -> Result<(), ConfigError> {
    if stores.is_empty() {
        return Err(ConfigError::Validation(
            "store list must contain at least one store".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();

    for store in stores {
        if store.store_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store id must be non-empty".to_string(),
            ));
        }

        if store.display_name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty name",
                store.store_id
            )));
        }

        if slugify(&store.store_id) != store.store_id {
            return Err(ConfigError::Validation(format!(
                "store id '{}' is not a slug; use '{}'",
                store.store_id,
                slugify(&store.store_id)
            )));
        }

        if !seen_ids.insert(store.store_id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.store_id
            )));
        }

        if !seen_names.insert(normalize_label(&store.display_name)) {
            return Err(ConfigError::Validation(format!(
                "duplicate store name: '{}' (from store '{}')",
                store.display_name, store.store_id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
