//! Raw storefront feed types.
//!
//! ## Observed shapes
//!
//! The storefront exposes three machine-readable endpoints alongside each
//! product's HTML page:
//!
//! - `GET /products/{handle}.js` — the per-product variant feed. Prices here
//!   are **integer minor units** (cents), unlike the catalog listing which
//!   serves decimal strings. `compare_at_price` is `null` (not `0`) when the
//!   product is not on sale. Variant `options` is an array of up to three
//!   values; `weight` is grams.
//! - `GET /products.json?limit=N&page=P` — the paged catalog listing, up to
//!   250 items per page. A short page (fewer than `limit` items) signals the
//!   end of the catalog; there is no explicit total count.
//! - `GET /search/suggest.json?q=...` — phrase suggestion lookup, returning
//!   a small ranked set of product handle/title pairs nested under
//!   `resources.results.products`.
//!
//! Optional fields carry `#[serde(default)]` throughout: older themes omit
//! them rather than sending `null`.

use serde::Deserialize;

/// Per-product variant feed from `GET /products/{handle}.js`.
#[derive(Debug, Deserialize)]
pub struct ProductFeed {
    pub id: i64,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub vendor: Option<String>,
    /// Lowest variant price in cents, as served by the feed.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub variants: Vec<FeedVariant>,
}

/// One variant from the per-product feed. Prices in integer cents.
#[derive(Debug, Deserialize)]
pub struct FeedVariant {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    /// Defaults to `true` when absent (optimistic assumption).
    #[serde(default = "default_available")]
    pub available: bool,
    pub price: i64,
    #[serde(default)]
    pub compare_at_price: Option<i64>,
    /// Up to three option values (e.g. size, wood type).
    #[serde(default)]
    pub options: Vec<String>,
    /// Weight in grams.
    #[serde(default)]
    pub weight: Option<i64>,
}

/// Top-level response from the paged catalog listing `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub products: Vec<CatalogProduct>,
}

/// One catalog listing entry. Only identity fields are used for search
/// scans; full product data comes from the page + variant feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub vendor: Option<String>,
}

/// Top-level response from `GET /search/suggest.json`.
#[derive(Debug, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub resources: SuggestResources,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestResources {
    #[serde(default)]
    pub results: SuggestResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestResults {
    #[serde(default)]
    pub products: Vec<Suggestion>,
}

/// One ranked suggestion from the phrase lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Default value for `FeedVariant::available` when the field is absent.
/// serde's `default = "..."` attribute expects a function path, not a const.
fn default_available() -> bool {
    true
}
