use super::*;
use prodcat_core::SpecEntry;

fn spec(key: &str, value: &str) -> SpecEntry {
    SpecEntry {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Flat heading + list: the canonical specifications shape
// ---------------------------------------------------------------------------

#[test]
fn flat_heading_with_spec_list_yields_pairs_and_nothing_else() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <ul>
                <li>Capacity: 2</li>
                <li>Voltage: 240V</li>
            </ul>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(
        sections.specifications,
        vec![spec("Capacity", "2"), spec("Voltage", "240V")]
    );
    assert!(sections.features.is_empty());
    assert!(sections.whats_included.is_empty());
    assert!(sections.warranty.is_empty());
    assert!(sections.shipping.is_empty());
    assert!(sections.returns.is_empty());
    assert!(sections.manuals.is_empty());
    assert!(sections.product_info.is_empty());
}

#[test]
fn extraction_is_deterministic_across_runs() {
    let html = r#"
        <html><body>
            <h2>Specifications</h2>
            <ul>
                <li><strong>Heater</strong>: 6kW Harvia</li>
                <li>Capacity: 4 Person</li>
            </ul>
            <h2>Features</h2>
            <ul>
                <li>Chromotherapy lighting</li>
                <li>Tempered glass door</li>
            </ul>
            <h2>Warranty</h2>
            <p>Seven year limited warranty covering the heater and all structural components.</p>
            <script type="application/ld+json">
                {"@type": "Product", "description": "Material: Canadian Hemlock"}
            </script>
        </body></html>"#;

    let first = extract_sections(html);
    let second = extract_sections(html);
    assert_eq!(first, second);
    assert!(!first.specifications.is_empty());
    assert!(!first.features.is_empty());
    assert!(!first.warranty.is_empty());
}

// ---------------------------------------------------------------------------
// Heading shapes: strong-split items, accordions, details/summary, tabs
// ---------------------------------------------------------------------------

#[test]
fn strong_prefixed_list_items_split_into_pairs() {
    let html = r"
        <html><body>
            <h3>Technical Details</h3>
            <ul>
                <li><strong>Material</strong> Canadian Hemlock</li>
                <li><b>Power:</b> 1750W</li>
            </ul>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(
        sections.specifications,
        vec![
            spec("Material", "Canadian Hemlock"),
            spec("Power", "1750W"),
        ]
    );
}

#[test]
fn aria_controls_links_heading_to_panel() {
    let html = r#"
        <html><body>
            <button aria-controls="panel-specs" role="tab">Specifications</button>
            <div class="unrelated"><p>Marketing copy that should not be mined.</p></div>
            <div id="panel-specs">
                <ul><li>Bench Width: 48 in</li></ul>
            </div>
        </body></html>"#;

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("Bench Width", "48 in")]);
}

#[test]
fn details_summary_block_feeds_its_section() {
    let html = r"
        <html><body>
            <details>
                <summary>Shipping &amp; Delivery</summary>
                <p>Ships curbside on a pallet. Allow two to four weeks for production and transit.</p>
            </details>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.shipping.len(), 1);
    assert!(sections.shipping[0].starts_with("Ships curbside"));
}

#[test]
fn sibling_walk_stops_at_next_heading() {
    let html = r"
        <html><body>
            <h2>Features</h2>
            <ul><li>Digital control panel</li></ul>
            <h2>Returns</h2>
            <ul><li>Returns accepted within 30 days</li></ul>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.features, vec!["Digital control panel".to_owned()]);
    assert_eq!(
        sections.returns,
        vec!["Returns accepted within 30 days".to_owned()]
    );
}

// ---------------------------------------------------------------------------
// Tables and definition lists feed specifications from any section
// ---------------------------------------------------------------------------

#[test]
fn table_rows_become_spec_pairs_even_under_features() {
    let html = r"
        <html><body>
            <h2>Features</h2>
            <table>
                <tr><th>Exterior Width</th><td>72 in</td></tr>
                <tr><th>Exterior Depth</th><td>66 in</td></tr>
            </table>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(
        sections.specifications,
        vec![
            spec("Exterior Width", "72 in"),
            spec("Exterior Depth", "66 in"),
        ]
    );
}

#[test]
fn definition_list_terms_become_spec_pairs() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <dl>
                <dt>Heater Type</dt><dd>Electric</dd>
                <dt>Dangling term without definition</dt>
            </dl>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("Heater Type", "Electric")]);
}

// ---------------------------------------------------------------------------
// Prose mining and the vocabulary gate
// ---------------------------------------------------------------------------

#[test]
fn prose_kv_lines_pass_only_through_vocabulary() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <p>Voltage: 240V
Our promise: you will love it</p>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("Voltage", "240V")]);
}

#[test]
fn br_separated_prose_lines_mine_as_separate_pairs() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <p>Voltage: 240V<br>Power: 6kW</p>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(
        sections.specifications,
        vec![spec("Voltage", "240V"), spec("Power", "6kW")]
    );
}

#[test]
fn inline_markup_inside_prose_keeps_the_pair_whole() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <p>Voltage: <strong>240V</strong></p>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("Voltage", "240V")]);
}

#[test]
fn embedded_json_description_is_mined_under_vocabulary() {
    let html = r#"
        <html><body>
            <script type="application/ld+json">
                {
                    "@type": "Product",
                    "description": "Heater: 6kW<br>Capacity: 4 person<br>A note with no separator"
                }
            </script>
        </body></html>"#;

    let sections = extract_sections(html);
    assert_eq!(
        sections.specifications,
        vec![spec("Heater", "6kW"), spec("Capacity", "4 person")]
    );
}

// ---------------------------------------------------------------------------
// Noise filtering and dedup through the full pipeline
// ---------------------------------------------------------------------------

#[test]
fn css_styling_pairs_are_rejected_but_physical_measurements_survive() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <ul>
                <li>margin: 12px</li>
                <li>width: 24 in</li>
            </ul>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("width", "24 in")]);
}

#[test]
fn spec_pairs_dedup_case_insensitively_keeping_first() {
    let html = r"
        <html><body>
            <h2>Specifications</h2>
            <ul><li>Capacity: 2 Person</li></ul>
            <h2>Specs</h2>
            <table><tr><td>capacity</td><td>2 person</td></tr></table>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.specifications, vec![spec("Capacity", "2 Person")]);
}

#[test]
fn string_sections_dedup_exact_content() {
    let html = r"
        <html><body>
            <h2>Features</h2>
            <ul>
                <li>Tempered glass door</li>
                <li>Tempered glass door</li>
            </ul>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.features, vec!["Tempered glass door".to_owned()]);
}

// ---------------------------------------------------------------------------
// Discards: FAQ content and page chrome
// ---------------------------------------------------------------------------

#[test]
fn faq_blocks_are_recognized_and_discarded() {
    let html = r"
        <html><body>
            <h2>Shipping FAQ</h2>
            <ul><li>How long does delivery take?</li></ul>
        </body></html>";

    let sections = extract_sections(html);
    assert!(sections.is_empty(), "FAQ content must not be collected: {sections:?}");
}

#[test]
fn headings_inside_nav_and_footer_are_ignored() {
    let html = r"
        <html><body>
            <nav><h3>Shipping</h3><ul><li>Free shipping banner</li></ul></nav>
            <footer><h3>Returns</h3><p>Footer returns text</p></footer>
        </body></html>";

    let sections = extract_sections(html);
    assert!(sections.shipping.is_empty());
    assert!(sections.returns.is_empty());
}

// ---------------------------------------------------------------------------
// Product info mining
// ---------------------------------------------------------------------------

#[test]
fn product_info_takes_adjacent_qualifying_paragraphs_capped_at_three() {
    let html = r"
        <html><body>
            <h2>Product Description</h2>
            <div>
                <p>This traditional barrel sauna is handcrafted from clear Canadian hemlock staves.</p>
                <p>Too short to qualify.</p>
                <p>Sign up for our newsletter to get free shipping on your first order today.</p>
                <p>The six kilowatt heater reaches operating temperature in roughly forty five minutes.</p>
                <p>Stainless steel bands and a reinforced door frame keep the structure weather tight.</p>
                <p>A fourth qualifying paragraph that must be dropped by the three paragraph cap.</p>
            </div>
        </body></html>";

    let sections = extract_sections(html);
    assert_eq!(sections.product_info.len(), 3);
    assert!(sections.product_info[0].starts_with("This traditional barrel sauna"));
    assert!(sections.product_info[1].starts_with("The six kilowatt heater"));
    assert!(sections.product_info[2].starts_with("Stainless steel bands"));
}

#[test]
fn product_info_empty_without_overview_heading() {
    let html = r"
        <html><body>
            <p>This qualifying paragraph has plenty of words but no overview heading above it.</p>
        </body></html>";

    let sections = extract_sections(html);
    assert!(sections.product_info.is_empty());
}

// ---------------------------------------------------------------------------
// Manuals
// ---------------------------------------------------------------------------

#[test]
fn manuals_collect_anchor_hrefs_and_linkless_item_text() {
    let html = r#"
        <html><body>
            <h3>Manuals</h3>
            <ul>
                <li><a href="/files/owners-manual.pdf">Owner's Manual</a></li>
                <li>Printed quick start guide (in the box)</li>
            </ul>
        </body></html>"#;

    let sections = extract_sections(html);
    assert_eq!(
        sections.manuals,
        vec![
            "/files/owners-manual.pdf".to_owned(),
            "Printed quick start guide (in the box)".to_owned(),
        ]
    );
}

// ---------------------------------------------------------------------------
// Page title fallback
// ---------------------------------------------------------------------------

#[test]
fn page_title_prefers_og_title() {
    let html = r#"
        <html><head>
            <title>Cedar Sauna | Example Store</title>
            <meta property="og:title" content="Cedar Barrel Sauna">
        </head><body></body></html>"#;

    assert_eq!(
        extract_page_title(html).as_deref(),
        Some("Cedar Barrel Sauna")
    );
}

#[test]
fn page_title_falls_back_to_title_tag() {
    let html = "<html><head><title>Cedar Sauna</title></head><body></body></html>";
    assert_eq!(extract_page_title(html).as_deref(), Some("Cedar Sauna"));
}

#[test]
fn page_title_none_when_absent() {
    assert!(extract_page_title("<html><body></body></html>").is_none());
}
