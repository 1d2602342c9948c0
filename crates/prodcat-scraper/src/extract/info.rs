//! Strict product-information mining.
//!
//! Unlike the section blocks, overview paragraphs are mined defensively:
//! only paragraphs adjacent to a recognized overview/description heading
//! qualify, they must carry at least [`MIN_INFO_WORDS`] words, and both the
//! marketing-boilerplate and non-product (legal/contact) classes are
//! rejected. At most three paragraphs are kept.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::classify::SectionKind;
use super::dom::{collapse_text, locate_block};
use super::SectionsBuilder;

/// Minimum word count for an overview paragraph. Shorter fragments are
/// captions, labels, or price lines.
const MIN_INFO_WORDS: usize = 8;

static P_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid p selector"));

/// Marketing boilerplate that reads like a description but says nothing
/// about the product.
static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
            free\s+shipping|ships\s+(within|in|from)
            |sign\s+up|subscribe|newsletter|mailing\s+list
            |discount|coupon|promo\s+code|%\s*off
            |add\s+to\s+cart|buy\s+now|checkout|order\s+today
            |in\s+stock|out\s+of\s+stock|limited\s+time|sale\s+ends
            |price\s+match|lowest\s+price|best\s+price|financing
        ",
    )
    .expect("valid boilerplate regex")
});

/// Copyright, legal, and contact text that is never product content.
static NON_PRODUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
            ©|copyright|all\s+rights\s+reserved
            |terms\s+of\s+(service|use)|privacy\s+policy
            |contact\s+us|customer\s+(service|support)
            |follow\s+us|facebook|instagram|twitter|youtube
        ",
    )
    .expect("valid non-product regex")
});

/// True when a paragraph qualifies as product information.
pub(super) fn is_product_info_paragraph(text: &str) -> bool {
    text.split_whitespace().count() >= MIN_INFO_WORDS
        && !BOILERPLATE_RE.is_match(text)
        && !NON_PRODUCT_RE.is_match(text)
}

/// Mines overview paragraphs adjacent to `ProductInfo`-classified headings.
pub(super) fn mine_product_info(
    doc: &Html,
    headings: &[(ElementRef<'_>, SectionKind)],
    out: &mut SectionsBuilder,
) {
    for (heading, kind) in headings {
        if *kind != SectionKind::ProductInfo {
            continue;
        }
        for root in locate_block(doc, *heading) {
            let paragraphs = if root.value().name() == "p" {
                vec![root]
            } else {
                root.select(&P_SEL).collect()
            };
            for p in paragraphs {
                if out.product_info_full() {
                    return;
                }
                let text = collapse_text(p);
                if is_product_info_paragraph(&text) {
                    out.push_string(SectionKind::ProductInfo, &text);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_substantial_product_paragraph() {
        assert!(is_product_info_paragraph(
            "This traditional barrel sauna is crafted from Canadian hemlock and seats four adults comfortably."
        ));
    }

    #[test]
    fn rejects_short_fragment() {
        assert!(!is_product_info_paragraph("Crafted from Canadian hemlock."));
    }

    #[test]
    fn rejects_marketing_boilerplate() {
        assert!(!is_product_info_paragraph(
            "Sign up for our newsletter today and enjoy free shipping on every order over fifty dollars."
        ));
    }

    #[test]
    fn rejects_legal_text() {
        assert!(!is_product_info_paragraph(
            "Copyright 2024 Example Store, all rights reserved, see our privacy policy for details."
        ));
    }
}
