mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prodcat")]
#[command(about = "Storefront product catalog normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and normalize one product, printing the record as JSON.
    Fetch { handle: String },
    /// Resolve free text to ranked product handles.
    Search {
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Bulk-ingest a set of handles (or the full catalog).
    Ingest {
        /// Comma-separated handles to ingest.
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        handles: Vec<String>,
        /// Ingest every handle from the catalog listing.
        #[arg(long)]
        all: bool,
        /// Cap the number of handles taken from the catalog listing.
        #[arg(long, requires = "all")]
        max: Option<usize>,
        /// Worker pool size override.
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Print inferred facets for one product.
    Facets { handle: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = prodcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch { handle } => commands::run_fetch(config, &handle).await,
        Commands::Search { query, limit } => commands::run_search(config, &query, limit).await,
        Commands::Ingest {
            handles,
            all,
            max,
            concurrency,
        } => commands::run_ingest(config, handles, all, max, concurrency).await,
        Commands::Facets { handle } => commands::run_facets(config, &handle).await,
    }
}
