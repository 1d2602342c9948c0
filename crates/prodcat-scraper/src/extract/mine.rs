//! Content-block mining: turning a located block's nodes into section
//! entries.
//!
//! Specification blocks yield key/value pairs; every other section yields
//! plain strings. Tables and definition lists feed the specifications
//! regardless of which section block they sit in — a dimensions table under
//! a "Features" heading is still a dimensions table. Free-text `Key: Value`
//! prose is admitted into specifications only through the vocabulary gate
//! in [`super::noise`].

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use super::classify::SectionKind;
use super::dom::{collapse_text, strip_html_to_lines};
use super::noise::{is_spec_vocab_key, split_kv};
use super::SectionsBuilder;

static TR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid tr selector"));
static CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("valid cell selector"));
static STRONG_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong, b").expect("valid strong selector"));
static SPAN_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("valid span selector"));
static ANCHOR_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Mines every root of a located block into `out` under `kind`.
pub(super) fn mine_block(block: &[ElementRef<'_>], kind: SectionKind, out: &mut SectionsBuilder) {
    for root in block {
        for el in root.descendants().filter_map(ElementRef::wrap) {
            match el.value().name() {
                "table" => mine_table(el, out),
                "dl" => mine_definition_list(el, out),
                "li" if !has_container_ancestor(el, *root) => mine_list_item(el, kind, out),
                "p" if !has_container_ancestor(el, *root) => mine_paragraph(el, kind, out),
                "a" if kind == SectionKind::Manuals => mine_manual_anchor(el, out),
                _ => {}
            }
        }
    }
}

/// True when `el` sits under a `table`, `dl`, or another `li` within the
/// block — those subtrees are mined by their container, and mining the
/// leaves again would double-count their text.
fn has_container_ancestor(el: ElementRef<'_>, root: ElementRef<'_>) -> bool {
    for ancestor in el.ancestors().filter_map(ElementRef::wrap) {
        if ancestor.id() == root.id() {
            return false;
        }
        if matches!(ancestor.value().name(), "table" | "dl" | "li") {
            return true;
        }
    }
    false
}

/// Table rows become specification pairs: first cell key, second cell value.
fn mine_table(table: ElementRef<'_>, out: &mut SectionsBuilder) {
    for row in table.select(&TR_SEL) {
        let cells: Vec<String> = row.select(&CELL_SEL).map(collapse_text).collect();
        if cells.len() >= 2 {
            out.push_spec(&cells[0], &cells[1]);
        }
    }
}

/// `dt`/`dd` pairs become specification pairs, in document order. A `dt`
/// with no following `dd` before the next `dt` is dropped.
fn mine_definition_list(dl: ElementRef<'_>, out: &mut SectionsBuilder) {
    let mut term: Option<String> = None;
    for child in dl.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "dt" => term = Some(collapse_text(child)),
            "dd" => {
                if let Some(t) = term.take() {
                    out.push_spec(&t, &collapse_text(child));
                }
            }
            _ => {}
        }
    }
}

fn mine_list_item(li: ElementRef<'_>, kind: SectionKind, out: &mut SectionsBuilder) {
    match kind {
        SectionKind::Specifications => {
            if let Some((key, value)) = list_item_kv(li) {
                out.push_spec(&key, &value);
            }
        }
        SectionKind::Manuals => {
            // Anchors inside the item are collected by the anchor arm; only
            // a link-free item contributes its text.
            if li.select(&ANCHOR_SEL).next().is_none() {
                out.push_string(kind, &collapse_text(li));
            }
        }
        _ => out.push_string(kind, &collapse_text(li)),
    }
}

/// Splits a specification list item into a key/value pair.
///
/// Heuristics, in order:
/// 1. a leading `<strong>`/`<b>` holds the key, the remaining text is the
///    value;
/// 2. the text has a trailing `"Key: Value"` shape;
/// 3. the first two `<span>`s are key and value.
fn list_item_kv(li: ElementRef<'_>) -> Option<(String, String)> {
    let full = collapse_text(li);

    if let Some(strong) = li.select(&STRONG_SEL).next() {
        let key = collapse_text(strong);
        if !key.is_empty() {
            if let Some(rest) = full.strip_prefix(&key) {
                let value = rest.trim().trim_start_matches([':', '-', '–', '—']).trim();
                if !value.is_empty() {
                    return Some((key.trim_end_matches(':').trim().to_owned(), value.to_owned()));
                }
            }
        }
    }

    if let Some(kv) = split_kv(&full) {
        return Some(kv);
    }

    let spans: Vec<String> = li.select(&SPAN_SEL).map(collapse_text).take(2).collect();
    if spans.len() == 2 && !spans[0].is_empty() && !spans[1].is_empty() {
        return Some((
            spans[0].trim_end_matches(':').trim().to_owned(),
            spans[1].clone(),
        ));
    }

    None
}

fn mine_paragraph(p: ElementRef<'_>, kind: SectionKind, out: &mut SectionsBuilder) {
    // Vocabulary-gated prose mining feeds specifications from any block.
    // The fragment goes through the break-aware flattener so lines split by
    // <br> stay separate while inline markup stays on its line.
    let raw = strip_html_to_lines(&p.inner_html());
    for line in raw.lines() {
        if let Some((key, value)) = split_kv(line.trim()) {
            if is_spec_vocab_key(&key) {
                out.push_spec(&key, &value);
            }
        }
    }

    // String sections also keep the paragraph itself as an entry.
    match kind {
        SectionKind::Features
        | SectionKind::WhatsIncluded
        | SectionKind::Warranty
        | SectionKind::Shipping
        | SectionKind::Returns => {
            out.push_string(kind, &collapse_text(p));
        }
        _ => {}
    }
}

fn mine_manual_anchor(a: ElementRef<'_>, out: &mut SectionsBuilder) {
    if let Some(href) = a.value().attr("href") {
        if !href.starts_with('#') && !href.starts_with("javascript:") {
            out.push_string(SectionKind::Manuals, href);
        }
    }
}
