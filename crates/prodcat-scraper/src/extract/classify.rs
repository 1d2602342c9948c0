//! Pure heading classification.
//!
//! Storefront themes never agree on how a section is labeled: the same
//! content shows up under "Specs", "Technical Details", "SPECIFICATIONS",
//! or "Product Specifications" depending on the theme. Classification is a
//! pure function over the label text and an ordered pattern table, so it is
//! unit-testable with no HTML parser in sight.

use std::sync::LazyLock;

use regex::Regex;

/// The named section a heading introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Specifications,
    WhatsIncluded,
    Features,
    Warranty,
    Shipping,
    Returns,
    /// Classified so its content can be *discarded*, not collected.
    Faq,
    Manuals,
    /// Overview/description headings; feeds the product-info mining pass.
    ProductInfo,
}

/// Ordered classification table. Order matters: "What's Included" must win
/// before the looser "include" shapes, and FAQ labels that mention shipping
/// ("Shipping FAQ") are still FAQs, so FAQ outranks Shipping and Returns.
static SECTION_PATTERNS: LazyLock<Vec<(Regex, SectionKind)>> = LazyLock::new(|| {
    let table: &[(&str, SectionKind)] = &[
        (r"\bfaqs?\b|frequently\s+asked", SectionKind::Faq),
        (
            r"\b(specs?|specifications?|technical\s+(details|data|specs)|tech\s+specs|dimensions?)\b",
            SectionKind::Specifications,
        ),
        (
            r"(what'?s|what\s+is)\s+(included|in\s+the\s+box)|\bin\s+the\s+box\b|box\s+contents|package\s+contents|\bincluded\s+items?\b|\bincludes\b",
            SectionKind::WhatsIncluded,
        ),
        (
            r"\b(features?|highlights|benefits)\b",
            SectionKind::Features,
        ),
        (r"\bwarrant(y|ies)\b|\bguarantee\b", SectionKind::Warranty),
        (
            r"\b(shipping|delivery|dispatch|lead\s+time|freight)\b",
            SectionKind::Shipping,
        ),
        (
            r"\breturns?\b|\brefunds?\b|\bexchanges?\b",
            SectionKind::Returns,
        ),
        (
            r"\bmanuals?\b|\buser\s+guides?\b|\binstructions?\b|\binstallation\s+guide\b|\bdownloads?\b|\bdocuments?\b",
            SectionKind::Manuals,
        ),
        (
            r"\boverview\b|\bdescription\b|\babout\s+(this\s+|the\s+)?(product|item|sauna)\b|\bproduct\s+(details|info(rmation)?)\b",
            SectionKind::ProductInfo,
        ),
    ];
    table
        .iter()
        .map(|(pattern, kind)| {
            (
                Regex::new(&format!("(?i){pattern}")).expect("valid section pattern"),
                *kind,
            )
        })
        .collect()
});

/// Longest label still plausibly a section heading. Anything longer is
/// body text that happens to sit in a heading-like node.
const MAX_LABEL_LEN: usize = 80;

/// Classifies a heading label into a [`SectionKind`].
///
/// The label is whitespace-collapsed before matching; the first pattern in
/// the ordered table wins. Returns `None` for empty labels, labels longer
/// than [`MAX_LABEL_LEN`], and labels matching nothing.
#[must_use]
pub fn classify_heading(label: &str) -> Option<SectionKind> {
    let collapsed = label.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || collapsed.chars().count() > MAX_LABEL_LEN {
        return None;
    }
    SECTION_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(&collapsed))
        .map(|(_, kind)| *kind)
}
