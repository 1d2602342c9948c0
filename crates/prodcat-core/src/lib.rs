//! Shared domain types and configuration for the prodcat workspace.
//!
//! This crate is deliberately I/O-free: it defines the normalized product
//! record, its extracted sections, inferred facets, bulk-job status
//! snapshots, and the environment-driven [`AppConfig`]. The scraper and
//! service crates build on these types.

pub mod app_config;
pub mod config;
pub mod facets;
pub mod job;
pub mod product;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{Facets, FuelType, HeatingStyle, Placement, Voltage};
pub use job::{IngestFailure, JobParams, JobStatus};
pub use product::{ProductRecord, Sections, SpecEntry, Variant};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
