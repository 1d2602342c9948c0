pub mod client;
pub mod error;
pub mod extract;
pub mod facets;
pub mod types;

pub use client::StoreClient;
pub use error::ScraperError;
pub use extract::extract_sections;
pub use facets::infer_facets;
pub use types::{CatalogProduct, ProductFeed, Suggestion};
