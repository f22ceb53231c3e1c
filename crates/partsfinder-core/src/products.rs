use serde::{Deserialize, Serialize};

/// Display text used when a product carries no price.
pub const PRICE_UNAVAILABLE_LABEL: &str = "Price unavailable";

/// A product price exactly as the backend formatted it.
///
/// No numeric parsing happens here: vendors send `"$10"`, `"10.00"`,
/// `"Call for price"` and so on, and the text is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Price {
    Listed(String),
    Unavailable,
}

impl Price {
    /// Returns the listed price text, or `None` for [`Price::Unavailable`].
    #[must_use]
    pub fn as_listed(&self) -> Option<&str> {
        match self {
            Price::Listed(text) => Some(text),
            Price::Unavailable => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Price::Listed(_))
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Listed(text) => write!(f, "{text}"),
            Price::Unavailable => write!(f, "{PRICE_UNAVAILABLE_LABEL}"),
        }
    }
}

/// One catalog entry after normalization, in the shape shared by every
/// vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Vendor SKU or id, or the product's position in its store list when
    /// the vendor sent neither. Unique within one store's list.
    pub identifier: String,
    /// Display title; empty when the vendor sent neither `title` nor `name`.
    pub title: String,
    pub price: Price,
    pub image_url: Option<String>,
    /// Link to the vendor's product page. `None` hides the "view product"
    /// link.
    pub detail_url: Option<String>,
    /// Canonical store id from the [`crate::StoreRegistry`], never the raw
    /// backend label.
    pub store_id: String,
}

impl Product {
    /// Returns `true` if the title contains `needle` ignoring case.
    ///
    /// An empty needle matches every product.
    #[must_use]
    pub fn title_matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
