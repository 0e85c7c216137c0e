//! classify-catalog - book catalog service
//!
//! Searches a classification service by title, stores chosen works with
//! their recommended classification in SQLite, and serves a catalog page
//! plus a small JSON API.

use anyhow::Result;
use clap::Parser;
use classify_catalog::classify::ClassifyClient;
use classify_catalog::config::{CatalogConfig, Cli};
use classify_catalog::db::SqliteBookRepository;
use classify_catalog::{build_router, AppState, CatalogService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CatalogConfig::load(&cli)?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "Starting classify-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Database: {}", config.database_path.display());
    info!(
        "Classify endpoint: {} (lookup timeout {:?})",
        config.classify_url, config.lookup_timeout
    );

    let pool = classify_common::db::init_database(&config.database_path).await?;
    let books = SqliteBookRepository::new(pool);
    let lookup = ClassifyClient::new(config.classify_url.clone())?;

    let catalog = CatalogService::new(Arc::new(lookup), Arc::new(books));
    let state = AppState::new(catalog, config.lookup_timeout);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("classify-catalog stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
