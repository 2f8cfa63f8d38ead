use serde::{Deserialize, Serialize};

/// Owner details read from a profile page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// Display name of the wishlist owner
    pub name: String,

    /// Full-size profile picture, if the owner set one
    pub photo_url: Option<String>,

    /// Public wishlists besides the one shown on the page
    pub wishlists: Vec<WishlistRef>,
}

/// A public wishlist listed on a profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistRef {
    pub code: String,
    pub name: Option<String>,
    /// Displayed item count; the page leaves it blank for some lists
    pub size: Option<u32>,
}

/// Price cell of a wishlist item, classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Price {
    /// Normalized numeric token, e.g. `12.99`
    Amount(String),
    /// No price shown, or "click to see price"
    Unavailable,
    /// Non-purchasable reminder; holds the cell text
    Idea(String),
    /// "At <price>" offers range; holds the raw cell text
    Range(String),
}

impl Price {
    /// Token used in the flat price sequence. Ranges have none.
    pub fn as_token(&self) -> Option<String> {
        match self {
            Price::Amount(amount) => Some(amount.clone()),
            Price::Unavailable => Some(String::new()),
            Price::Idea(text) => Some(text.clone()),
            Price::Range(_) => None,
        }
    }

    pub fn is_idea(&self) -> bool {
        matches!(self, Price::Idea(_))
    }
}

/// One catalog entry of a wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub title: String,
    /// Empty when the item has no byline
    pub author: String,
    pub price: Price,
    /// Host the item was added from, for items not sold by the storefront
    pub source_site: Option<String>,
    pub cover_url: Option<String>,
    /// Empty when the item carries no catalog code
    pub detail_url: String,
}

/// A per-item problem noticed during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the entry within the sequence it was read from
    pub item: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(item: usize, message: impl Into<String>) -> Self {
        Self {
            item,
            message: message.into(),
        }
    }
}

/// Sum of the purchasable prices of a wishlist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub total: f64,
    /// Tokens that could not be parsed and were left out of the total
    pub skipped: Vec<Diagnostic>,
}

/// Everything read from a printable wishlist page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistSummary {
    pub items: Vec<WishlistItem>,
    pub source_sites: Vec<String>,
    pub idea_titles: Vec<String>,
    pub total: Expense,
    pub diagnostics: Vec<Diagnostic>,
}

/// A wishlist found by a name or e-mail search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub display_name: String,
    pub code: String,
}

impl SearchHit {
    pub fn new(display_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            code: code.into(),
        }
    }
}
