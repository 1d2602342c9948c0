//! DOM walking helpers for the section extractor.
//!
//! Heading detection and panel location are where theme diversity bites:
//! the same logical section may be an `<h3>` over sibling paragraphs, a
//! `<summary>` inside `<details>`, or a button wired to a panel via
//! `aria-controls`. Classification of the heading *label* stays in
//! [`super::classify`]; this module only finds the nodes.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use super::classify::{classify_heading, SectionKind};

static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p>|</li>|</div>").expect("valid break regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Collapses an element's text content to single-space-separated words.
pub(super) fn collapse_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattens an HTML fragment to plain text, turning line-break elements
/// (`<br>`, closing block tags) into newlines and stripping every other
/// tag. Keeps `<br>`-separated `Key: Value` lines on separate lines, which
/// plain text-node concatenation would merge.
pub(super) fn strip_html_to_lines(html: &str) -> String {
    let with_breaks = BR_RE.replace_all(html, "\n");
    TAG_RE.replace_all(&with_breaks, " ").into_owned()
}

/// True for nodes that can introduce a section: `h1`–`h6`, `summary`,
/// `[role="tab"]`, and anything carrying an `aria-controls` or
/// `data-target` panel reference.
pub(super) fn is_heading_like(el: ElementRef<'_>) -> bool {
    let e = el.value();
    matches!(
        e.name(),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "summary"
    ) || e.attr("role") == Some("tab")
        || e.attr("aria-controls").is_some()
        || e.attr("data-target").is_some()
}

/// True when the element sits inside chrome (navigation, header, footer)
/// rather than the page's content region.
fn in_page_chrome(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| matches!(a.value().name(), "nav" | "header" | "footer"))
}

/// All classified heading-like nodes in document order, skipping page
/// chrome.
pub(super) fn classified_headings(doc: &Html) -> Vec<(ElementRef<'_>, SectionKind)> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| is_heading_like(*el) && !in_page_chrome(*el))
        .filter_map(|el| classify_heading(&collapse_text(el)).map(|kind| (el, kind)))
        .collect()
}

/// The panel id an explicitly-linked heading points at, via
/// `aria-controls`, `data-target="#id"`, or `href="#id"`.
fn linked_panel_id<'a>(el: ElementRef<'a>) -> Option<&'a str> {
    let e = el.value();
    if let Some(id) = e.attr("aria-controls") {
        return Some(id);
    }
    if let Some(target) = e.attr("data-target") {
        return Some(target.trim_start_matches('#'));
    }
    if let Some(href) = e.attr("href") {
        if let Some(id) = href.strip_prefix('#') {
            if !id.is_empty() {
                return Some(id);
            }
        }
    }
    None
}

fn element_by_html_id<'a>(doc: &'a Html, id: &str) -> Option<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr("id") == Some(id))
}

fn has_class_containing(el: ElementRef<'_>, needles: &[&str]) -> bool {
    el.value()
        .classes()
        .any(|c| needles.iter().any(|n| c.to_lowercase().contains(n)))
}

/// Locates the content block for a classified heading, in priority order:
///
/// 1. an explicitly linked panel (`aria-controls`/`data-target`/`href="#id"`),
/// 2. the structurally-related panel: the enclosing `<details>` for a
///    `<summary>`, or a panel/content child of a nearby accordion/tab
///    container,
/// 3. a plain walk of following siblings until the next heading-like node.
///
/// The returned vector holds the block's root elements; sibling walks yield
/// several, panel hits yield one.
pub(super) fn locate_block<'a>(doc: &'a Html, heading: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    // (1) explicit id link.
    if let Some(panel) = linked_panel_id(heading).and_then(|id| element_by_html_id(doc, id)) {
        if panel.id() != heading.id() {
            return vec![panel];
        }
    }

    // (2a) <summary> inside <details>: the details children minus the summary.
    if heading.value().name() == "summary" {
        if let Some(details) = heading.parent().and_then(ElementRef::wrap) {
            return details
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|c| c.id() != heading.id())
                .collect();
        }
    }

    // (2b) accordion/tab container: nearest such ancestor's panel child.
    for ancestor in heading
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(3)
        .filter(|a| has_class_containing(*a, &["accordion", "tab", "collaps", "toggle"]))
    {
        let panel = ancestor.descendants().filter_map(ElementRef::wrap).find(|el| {
            has_class_containing(*el, &["panel", "content", "body"])
                && el.id() != heading.id()
                && !el.descendants().any(|n| n.id() == heading.id())
        });
        if let Some(panel) = panel {
            return vec![panel];
        }
    }

    // (3) following siblings until the next heading.
    let mut block = Vec::new();
    for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
        if is_heading_like(sibling) {
            break;
        }
        block.push(sibling);
    }
    block
}
