//! Facet inference over a normalized record's text.
//!
//! Pure keyword classification against the record's `search_blob`. Every
//! detection is best-effort: a facet the page never mentions stays `None`,
//! and downstream scoring treats that as "unknown", never as a mismatch.

use std::sync::LazyLock;

use regex::Regex;

use prodcat_core::{Facets, FuelType, HeatingStyle, Placement, ProductRecord, Voltage};

static CAPACITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})\s*[-\s]?\s*(person|people|seater)").expect("valid capacity regex")
});

static V240_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b2[234]0\s*v(olts?)?\b").expect("valid 240V regex"));
static V120_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b1[12]0\s*v(olts?)?\b").expect("valid 120V regex"));

static KW_RATING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\s*kw\b").expect("valid kW rating regex"));

/// Largest believable seating capacity; bigger numbers in a "person"
/// pattern are square footage or model numbers.
const MAX_CAPACITY: u32 = 20;

/// Infers all typed facets from a record. The blob is already lowercase.
#[must_use]
pub fn infer_facets(record: &ProductRecord) -> Facets {
    let text = &record.search_blob;
    Facets {
        heating: infer_heating(text),
        fuel: infer_fuel(text),
        voltage: infer_voltage(text),
        placement: infer_placement(text),
        capacity: infer_capacity(text),
        price: record.price_from,
    }
}

/// Heating style by keyword, in strict priority order: hybrid beats
/// infrared beats everything else, so a page advertising a hybrid
/// infrared/traditional unit classifies as hybrid.
fn infer_heating(text: &str) -> Option<HeatingStyle> {
    if text.contains("hybrid") {
        return Some(HeatingStyle::Hybrid);
    }
    if text.contains("infrared") || text.contains("full spectrum") {
        return Some(HeatingStyle::Infrared);
    }
    if text.contains("traditional") {
        return Some(HeatingStyle::Traditional);
    }
    if text.contains("wood-fired") || text.contains("wood fired") || text.contains("wood burning")
        || text.contains("wood-burning")
    {
        return Some(HeatingStyle::Wood);
    }
    if text.contains("steam") {
        return Some(HeatingStyle::Steam);
    }
    if text.contains("electric heater") || text.contains("electric stove") {
        return Some(HeatingStyle::Electric);
    }
    None
}

fn infer_fuel(text: &str) -> Option<FuelType> {
    if text.contains("wood-fired")
        || text.contains("wood fired")
        || text.contains("wood burning")
        || text.contains("wood-burning")
        || text.contains("wood stove")
    {
        return Some(FuelType::Wood);
    }
    if text.contains("electric heater") || text.contains("electric stove") || KW_RATING_RE.is_match(text)
    {
        return Some(FuelType::Electric);
    }
    None
}

fn infer_voltage(text: &str) -> Option<Voltage> {
    if V240_RE.is_match(text) {
        return Some(Voltage::V240);
    }
    if V120_RE.is_match(text) {
        return Some(Voltage::V120);
    }
    None
}

/// Placement by keyword; "barrel" implies outdoor even when the page never
/// says so.
fn infer_placement(text: &str) -> Option<Placement> {
    if text.contains("outdoor") || text.contains("barrel") {
        return Some(Placement::Outdoor);
    }
    if text.contains("indoor") {
        return Some(Placement::Indoor);
    }
    None
}

fn infer_capacity(text: &str) -> Option<u32> {
    CAPACITY_RE
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<u32>().ok())
        .find(|&n| (1..=MAX_CAPACITY).contains(&n))
}
