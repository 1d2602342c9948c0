use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let store_url = require("PRODCAT_STORE_URL")?;
    let log_level = or_default("PRODCAT_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("PRODCAT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRODCAT_USER_AGENT", "prodcat/0.1 (catalog-normalizer)");
    let catalog_page_limit = parse_u32("PRODCAT_CATALOG_PAGE_LIMIT", "250")?;
    let inter_page_delay_ms = parse_u64("PRODCAT_INTER_PAGE_DELAY_MS", "250")?;

    let cache_capacity = parse_usize("PRODCAT_CACHE_CAPACITY", "200")?;

    let ingest_concurrency = parse_usize("PRODCAT_INGEST_CONCURRENCY", "3")?;
    let ingest_task_timeout_secs = parse_u64("PRODCAT_INGEST_TASK_TIMEOUT_SECS", "25")?;
    let ingest_max_retries = parse_u32("PRODCAT_INGEST_MAX_RETRIES", "2")?;
    let ingest_retry_backoff_ms = parse_u64("PRODCAT_INGEST_RETRY_BACKOFF_MS", "1000")?;
    let ingest_pacing_delay_ms = parse_u64("PRODCAT_INGEST_PACING_DELAY_MS", "150")?;

    Ok(AppConfig {
        store_url,
        log_level,
        request_timeout_secs,
        user_agent,
        catalog_page_limit,
        inter_page_delay_ms,
        cache_capacity,
        ingest_concurrency,
        ingest_task_timeout_secs,
        ingest_max_retries,
        ingest_retry_backoff_ms,
        ingest_pacing_delay_ms,
    })
}
