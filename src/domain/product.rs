use std::{
    cmp::Ordering,
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A handmade product listed by the artisan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Listing price in rupees, usually the one picked in the pricing panel.
    #[serde(default)]
    pub price: Option<f64>,
    /// Unix seconds.
    pub created_at: u64,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            materials: Vec::new(),
            region: None,
            price: None,
            created_at: unix_now(),
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_ci(&self.name, needle)
            || contains_ci(&self.description, needle)
            || contains_ci(&self.category, needle)
            || self
                .materials
                .iter()
                .any(|material| contains_ci(material, needle))
    }
}

/// Product attributes sent to the pricing service. Anything in `extra` is
/// forwarded untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Categories offered in the product form.
pub const CATEGORIES: [&str; 8] = [
    "Textiles",
    "Pottery",
    "Jewelry",
    "Woodwork",
    "Paintings",
    "Metalwork",
    "Home Decor",
    "Accessories",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Name,
    PriceLowToHigh,
    PriceHighToLow,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Newest,
        SortOrder::Name,
        SortOrder::PriceLowToHigh,
        SortOrder::PriceHighToLow,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SortOrder::Newest => "newest",
            SortOrder::Name => "name",
            SortOrder::PriceLowToHigh => "price-asc",
            SortOrder::PriceHighToLow => "price-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest first",
            SortOrder::Name => "Name",
            SortOrder::PriceLowToHigh => "Price: low to high",
            SortOrder::PriceHighToLow => "Price: high to low",
        }
    }

    pub fn from_key(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|order| order.key() == key)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    /// `None` or `"all"` shows every category.
    pub category: Option<String>,
    pub sort: SortOrder,
}

/// Applies search, category filter and sort. The sort is stable.
pub fn filter_products(products: &[Product], query: &CatalogQuery) -> Vec<Product> {
    let needle = query.search.trim().to_lowercase();
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|cat| !cat.is_empty() && !cat.eq_ignore_ascii_case("all"));

    let mut matches: Vec<Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.matches_search(&needle))
        .filter(|product| {
            category
                .map(|cat| product.category.eq_ignore_ascii_case(cat))
                .unwrap_or(true)
        })
        .cloned()
        .collect();

    match query.sort {
        SortOrder::Newest => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Name => {
            matches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortOrder::PriceLowToHigh => matches.sort_by(|a, b| compare_price(a.price, b.price)),
        SortOrder::PriceHighToLow => matches.sort_by(|a, b| match (a.price, b.price) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            _ => compare_price(a.price, b.price),
        }),
    }
    matches
}

/// Distinct categories, sorted.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen: Vec<String> = products.iter().map(|p| p.category.clone()).collect();
    seen.sort_by_key(|cat| cat.to_lowercase());
    seen.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    seen
}

// Unpriced products sort after priced ones.
fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Language the pricing service answers in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Bengali,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Bengali,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Bengali => "bn",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Tamil => "தமிழ்",
            Language::Bengali => "বাংলা",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }
}
