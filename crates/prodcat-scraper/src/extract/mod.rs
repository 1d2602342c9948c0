//! Section extraction: heterogeneous product-page HTML in, ordered
//! [`Sections`] out.
//!
//! The pipeline runs four passes over a parsed document:
//!
//! 1. classify every heading-like node ([`classify`]) and mine each
//!    classified block ([`mine`]) — lists, tables, definition lists, prose;
//! 2. a strict product-information pass over overview paragraphs ([`info`]);
//! 3. an embedded-JSON pass over structured-data scripts ([`jsonld`]);
//! 4. noise filtering and deduplication happen on the way in, inside
//!    [`SectionsBuilder`].
//!
//! Extraction is deterministic: all traversal is document order, and the
//! dedup sets are membership-only (never iterated).

pub mod classify;
pub mod noise;

mod dom;
mod info;
mod jsonld;
mod mine;

use std::collections::HashSet;

use scraper::Html;

use prodcat_core::{Sections, SpecEntry};

pub use classify::{classify_heading, SectionKind};

/// Maximum overview paragraphs kept in `product_info`.
const MAX_PRODUCT_INFO: usize = 3;

/// Extracts all named sections from a product page.
///
/// Best-effort by design: a section that yields nothing is simply empty,
/// never an error. Repeated runs over the same input produce identical
/// output.
#[must_use]
pub fn extract_sections(html: &str) -> Sections {
    let doc = Html::parse_document(html);
    let mut builder = SectionsBuilder::default();

    let headings = dom::classified_headings(&doc);
    for (heading, kind) in &headings {
        // FAQ content is recognized so it can be discarded; overview
        // headings feed the dedicated strict pass below.
        if matches!(kind, SectionKind::Faq | SectionKind::ProductInfo) {
            continue;
        }
        let block = dom::locate_block(&doc, *heading);
        mine::mine_block(&block, *kind, &mut builder);
    }

    info::mine_product_info(&doc, &headings, &mut builder);
    jsonld::mine_embedded_json(&doc, &mut builder);

    builder.finish()
}

/// Pulls a display title out of a product page, preferring `og:title` over
/// `<title>`. Used as a fallback when the variant feed is unavailable.
#[must_use]
pub fn extract_page_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    let og_sel = scraper::Selector::parse(r#"meta[property="og:title"]"#)
        .expect("valid og:title selector");
    if let Some(meta) = doc.select(&og_sel).next() {
        if let Some(content) = meta.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_owned());
            }
        }
    }

    let title_sel = scraper::Selector::parse("title").expect("valid title selector");
    doc.select(&title_sel)
        .next()
        .map(|t| dom::collapse_text(t))
        .filter(|t| !t.is_empty())
}

/// Accumulates mined entries with noise filtering and deduplication.
///
/// Specification pairs dedup on their case-folded `(key, value)` signature
/// and pass through the CSS-noise detector; string sections dedup on exact
/// trimmed content. Insertion order is preserved everywhere.
#[derive(Default)]
pub(crate) struct SectionsBuilder {
    sections: Sections,
    spec_seen: HashSet<(String, String)>,
    string_seen: HashSet<(SectionKind, String)>,
}

impl SectionsBuilder {
    pub(crate) fn push_spec(&mut self, key: &str, value: &str) {
        let key = key.trim().trim_end_matches(':').trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return;
        }
        if noise::is_css_noise(key, value) {
            return;
        }
        let signature = (key.to_lowercase(), value.to_lowercase());
        if self.spec_seen.insert(signature) {
            self.sections.specifications.push(SpecEntry {
                key: key.to_owned(),
                value: value.to_owned(),
            });
        }
    }

    pub(crate) fn push_string(&mut self, kind: SectionKind, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if kind == SectionKind::ProductInfo && self.product_info_full() {
            return;
        }
        if !self.string_seen.insert((kind, text.to_owned())) {
            return;
        }
        let list = match kind {
            SectionKind::ProductInfo => &mut self.sections.product_info,
            SectionKind::Features => &mut self.sections.features,
            SectionKind::WhatsIncluded => &mut self.sections.whats_included,
            SectionKind::Warranty => &mut self.sections.warranty,
            SectionKind::Shipping => &mut self.sections.shipping,
            SectionKind::Returns => &mut self.sections.returns,
            SectionKind::Manuals => &mut self.sections.manuals,
            // Pairs and discards never land here.
            SectionKind::Specifications | SectionKind::Faq => return,
        };
        list.push(text.to_owned());
    }

    pub(crate) fn product_info_full(&self) -> bool {
        self.sections.product_info.len() >= MAX_PRODUCT_INFO
    }

    pub(crate) fn finish(self) -> Sections {
        self.sections
    }
}

#[cfg(test)]
#[path = "../extract_test.rs"]
mod tests;
