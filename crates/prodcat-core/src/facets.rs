//! Typed facets derived from a product record's text.
//!
//! Every facet is optional: absence means the page never said, and
//! downstream scoring must treat it as "unknown", never as a confirmed
//! mismatch. Inference itself lives in `prodcat-scraper::facets`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Heating technology, in detection-priority order: a page mentioning both
/// hybrid and infrared is classified hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingStyle {
    Hybrid,
    Infrared,
    Traditional,
    Electric,
    Wood,
    Steam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Wood,
    Electric,
}

/// Nominal electrical family. 110/120V map to [`Voltage::V120`];
/// 220/230/240V map to [`Voltage::V240`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voltage {
    V120,
    V240,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Indoor,
    Outdoor,
}

/// Best-effort derived attributes for downstream matching and ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub heating: Option<HeatingStyle>,
    pub fuel: Option<FuelType>,
    pub voltage: Option<Voltage>,
    pub placement: Option<Placement>,
    /// Seating capacity in persons.
    pub capacity: Option<u32>,
    /// Passed through from the record's `price_from`.
    pub price: Option<Decimal>,
}
