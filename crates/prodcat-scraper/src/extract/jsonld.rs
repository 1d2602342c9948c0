//! Embedded structured-data pass.
//!
//! Themes frequently serialize the full product description into
//! `<script type="application/ld+json">` (or theme-private JSON) blocks.
//! Those descriptions often carry `Key: Value` lines that never made it
//! into the visible markup, so they get one more vocabulary-gated scan.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::dom::strip_html_to_lines;
use super::noise::{is_spec_vocab_key, split_kv};
use super::SectionsBuilder;

static SCRIPT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid script selector"));

/// Scans JSON script blocks for `description` strings and mines their
/// `Key: Value` lines into the specifications, under the vocabulary gate.
pub(super) fn mine_embedded_json(doc: &Html, out: &mut SectionsBuilder) {
    for script in doc.select(&SCRIPT_SEL) {
        let is_json = script
            .value()
            .attr("type")
            .is_some_and(|t| t.to_ascii_lowercase().contains("json"));
        if !is_json {
            continue;
        }

        let raw: String = script.text().collect();
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };

        let mut descriptions = Vec::new();
        collect_descriptions(&value, &mut descriptions);
        for description in descriptions {
            mine_description_text(&description, out);
        }
    }
}

/// Recursively collects every string found under a `"description"` key.
/// serde_json objects iterate in sorted key order, so collection order is
/// deterministic for a fixed document.
fn collect_descriptions(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if key == "description" {
                    if let Value::String(s) = nested {
                        out.push(s.clone());
                        continue;
                    }
                }
                collect_descriptions(nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_descriptions(item, out);
            }
        }
        _ => {}
    }
}

fn mine_description_text(description: &str, out: &mut SectionsBuilder) {
    // HTML inside JSON descriptions: breaks become line boundaries, all
    // other tags are stripped.
    let stripped = strip_html_to_lines(description);

    for line in stripped.lines() {
        if let Some((key, value)) = split_kv(line.trim()) {
            if is_spec_vocab_key(&key) {
                out.push_spec(&key, &value);
            }
        }
    }
}
