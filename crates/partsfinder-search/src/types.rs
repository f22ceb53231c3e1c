//! Raw response types for the backend `GET /search` endpoint.
//!
//! ## Observed envelope shapes
//!
//! ### Store map
//! The older backend returns a JSON object keyed by store, each value an
//! array of product-like objects:
//! `{ "wesco": [{ "name": "Camera X", "price": "$10" }], "seclock": [] }`.
//! Keys are usually canonical store ids but may be display names.
//!
//! ### Result list
//! The scraper backend returns one entry per store with its own success flag:
//! `{ "results": [{ "success": true, "site": "Wesco", "data": { "products": [...] } }] }`.
//! Failed scrapes come back as `"success": false` with no `data`, or with an
//! `error` field and no flag at all. Some builds send the list without the
//! `results` wrapper, and some put `products` directly on the entry. A bare
//! list may also mix entries with products tagged by `store` or `site`.
//!
//! ### Product fields
//! Every field is optional and vendors disagree on names: `title` or `name`,
//! `sku` or `id`, `link` or `url`. Ids and prices arrive as strings or as
//! bare JSON numbers. Empty strings are common and mean "absent".

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// The envelope shape detected by [`detect_envelope`].
#[derive(Debug)]
pub enum RawEnvelope<'a> {
    /// Object keyed by store label.
    StoreMap(&'a Map<String, Value>),
    /// The `results` array of a wrapped result list. Every element is read
    /// as a per-store entry.
    ResultList(&'a [Value]),
    /// A top-level array: per-store entries mixed with store-tagged products.
    BareList(&'a [Value]),
    /// Anything else: a scalar, or a body that is not structured at all.
    Unrecognized,
}

/// Works out which envelope shape `body` uses.
///
/// An object with a `results` array is a result list when the array is
/// empty or any element is a per-store entry; malformed siblings are then
/// absorbed entry by entry. Otherwise `results` is just a store key.
#[must_use]
pub fn detect_envelope(body: &Value) -> RawEnvelope<'_> {
    match body {
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(entries))
                if entries.is_empty() || entries.iter().any(is_store_result) =>
            {
                RawEnvelope::ResultList(entries)
            }
            _ => RawEnvelope::StoreMap(map),
        },
        Value::Array(items) => RawEnvelope::BareList(items),
        _ => RawEnvelope::Unrecognized,
    }
}

const STORE_RESULT_KEYS: [&str; 4] = ["success", "data", "products", "error"];

/// Returns `true` if `value` looks like a per-store result entry rather than
/// a product.
#[must_use]
pub fn is_store_result(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| STORE_RESULT_KEYS.iter().any(|key| obj.contains_key(*key)))
}

/// One per-store entry of a result-list envelope.
#[derive(Debug, Default, Deserialize)]
pub struct RawStoreResult {
    /// `Some(false)` marks a store whose scrape failed; absent means success.
    #[serde(default, deserialize_with = "loose_flag")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "loose_text")]
    pub site: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub store: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub products: Option<Value>,
    /// Scrape error reported instead of (or alongside) a success flag.
    #[serde(default)]
    pub error: Option<Value>,
}

impl RawStoreResult {
    /// Parses an entry, treating a non-object value as an entry with no fields.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// An explicit `success` flag wins; without one, the entry failed only
    /// if it carries an `error`.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        self.success.unwrap_or(self.error.is_none())
    }

    /// The raw store label: `site`, falling back to `store`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.site.as_deref().or(self.store.as_deref())
    }

    /// Product values from `data.products`, falling back to `products`.
    #[must_use]
    pub fn product_values(&self) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|d| d.get("products"))
            .and_then(Value::as_array)
            .or_else(|| self.products.as_ref().and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// A product-like object as sent by the backend. All fields optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct RawProduct {
    #[serde(default, deserialize_with = "loose_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub store: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub site: Option<String>,
}

impl RawProduct {
    /// Parses a product, treating a non-object value as a product with no
    /// fields.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// The product's own store label, used only for products that arrive
    /// outside any store grouping.
    #[must_use]
    pub fn store_label(&self) -> Option<&str> {
        self.store.as_deref().or(self.site.as_deref())
    }
}

/// Accepts a string or number; anything else, and blank strings, become `None`.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a JSON boolean; anything else becomes `None`.
fn loose_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}
