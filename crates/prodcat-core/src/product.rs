//! Normalized product record types.
//!
//! A [`ProductRecord`] is the fully-normalized view of one storefront
//! product: identity fields from the variant feed, an ordered list of
//! [`Variant`]s, and the [`Sections`] mined from the product page HTML.
//! Records are keyed by their catalog `handle`, created on first successful
//! fetch, and fully replaced (never merged) on re-ingestion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully-normalized storefront product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Stable catalog identifier; cache key and URL path segment.
    pub handle: String,
    pub title: String,
    /// Canonical product page URL (`{store}/products/{handle}`).
    pub url: String,
    pub vendor: Option<String>,
    /// Lowest variant price in major currency units, when any variant exists.
    pub price_from: Option<Decimal>,
    /// Display-formatted lowest price, e.g. `"$3,499.00"`.
    pub price_display: Option<String>,
    /// Variants in feed order.
    pub variants: Vec<Variant>,
    pub sections: Sections,
    /// Lowercase concatenation of title, vendor, and all section text,
    /// derived at construction. Used for keyword matching and facet
    /// inference, never displayed.
    pub search_blob: String,
}

impl ProductRecord {
    /// Assembles a record, deriving `price_from`/`price_display` from the
    /// cheapest variant and the `search_blob` from all textual content.
    #[must_use]
    pub fn new(
        handle: String,
        title: String,
        url: String,
        vendor: Option<String>,
        variants: Vec<Variant>,
        sections: Sections,
    ) -> Self {
        let min_cents = variants.iter().map(|v| v.price_cents).min();
        let price_from = min_cents.map(|c| Decimal::new(c, 2));
        let price_display = min_cents.map(format_cents);
        let search_blob = sections.search_blob(&title, vendor.as_deref());
        Self {
            handle,
            title,
            url,
            vendor,
            price_from,
            price_display,
            variants,
            sections,
            search_blob,
        }
    }
}

/// Formats integer minor units as a display price with thousands separators,
/// e.g. `349900` → `"$3,499.00"`.
#[must_use]
pub fn format_cents(cents: i64) -> String {
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let major = cents / 100;
    let minor = cents % 100;

    let digits = major.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{minor:02}")
}

/// One purchasable variant of a [`ProductRecord`]. Prices are integer minor
/// units (cents), as served by the per-handle variant feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub available: bool,
    pub price_cents: i64,
    pub compare_at_cents: Option<i64>,
    /// Up to three option values (size, color, ...).
    pub options: Vec<String>,
    pub weight_grams: Option<i64>,
}

/// One key/value specification entry. Both sides are non-empty after
/// extraction filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub key: String,
    pub value: String,
}

impl SpecEntry {
    /// Case-folded dedup signature for this entry.
    #[must_use]
    pub fn signature(&self) -> (String, String) {
        (self.key.to_lowercase(), self.value.to_lowercase())
    }
}

/// Named content sections mined from a product page.
///
/// Every collection is ordered (document order of its sources) and deduped:
/// `specifications` by case-folded `(key, value)` signature, string sections
/// by exact trimmed content. Empty sections are a normal outcome of
/// best-effort extraction, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    /// At most 3 short overview paragraphs.
    pub product_info: Vec<String>,
    pub specifications: Vec<SpecEntry>,
    pub features: Vec<String>,
    pub whats_included: Vec<String>,
    pub warranty: Vec<String>,
    pub shipping: Vec<String>,
    pub returns: Vec<String>,
    /// Manual/guide link URLs or labels.
    pub manuals: Vec<String>,
}

impl Sections {
    /// True when no section holds any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.product_info.is_empty()
            && self.specifications.is_empty()
            && self.features.is_empty()
            && self.whats_included.is_empty()
            && self.warranty.is_empty()
            && self.shipping.is_empty()
            && self.returns.is_empty()
            && self.manuals.is_empty()
    }

    /// Builds the lowercase keyword-matching blob from the title, vendor,
    /// and all section content, in a fixed section order so the result is
    /// deterministic for a given record.
    #[must_use]
    pub fn search_blob(&self, title: &str, vendor: Option<&str>) -> String {
        let mut blob = String::new();
        let mut push = |s: &str| {
            if !s.is_empty() {
                if !blob.is_empty() {
                    blob.push(' ');
                }
                blob.push_str(&s.to_lowercase());
            }
        };

        push(title);
        if let Some(v) = vendor {
            push(v);
        }
        for p in &self.product_info {
            push(p);
        }
        for spec in &self.specifications {
            push(&spec.key);
            push(&spec.value);
        }
        for list in [
            &self.features,
            &self.whats_included,
            &self.warranty,
            &self.shipping,
            &self.returns,
            &self.manuals,
        ] {
            for item in list {
                push(item);
            }
        }
        blob
    }
}
