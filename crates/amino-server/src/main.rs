//! Amino Server - Main entry point

use amino_common::logging::{init_logging, LogConfig};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use amino_server::{aggregation::Aggregator, api, config::Config, db};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let log_config = LogConfig::builder()
        .log_file_prefix("amino-server")
        .filter_directives("amino_server=debug,tower_http=debug,sqlx=warn")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    let _guard = init_logging(&log_config)?;

    info!("Starting Amino Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_lazy_pool(&config.database)?;

    // Lookups work without the history store
    match db::run_migrations(&pool).await {
        Ok(()) => info!("Search history store ready"),
        Err(e) => tracing::warn!(error = %e, "Database unavailable, searches will not be recorded"),
    }

    let aggregator =
        Aggregator::from_config(&config.sources).context("Failed to build source connectors")?;
    info!(
        sources = ?aggregator.sources().map(|s| s.as_str()).collect::<Vec<_>>(),
        timeout_secs = config.sources.timeout_secs,
        "Source connectors configured"
    );

    let state = api::AppState {
        db: pool,
        aggregator: Arc::new(aggregator),
    };

    api::serve(&config, state).await
}
