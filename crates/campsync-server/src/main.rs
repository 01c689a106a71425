//! CampSync - Campaign synchronization service entry point

use anyhow::Result;
use campsync_common::config::Config;
use campsync_core::{SyncOrchestrator, ZohoClient};
use campsync_storage::{create_record_store, db::DatabasePool};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    info!("Starting CampSync...");

    // Load configuration
    let config = Config::load()?;

    // Initialize the record store
    let db_pool = if config.database.backend == "postgres" {
        let pool = DatabasePool::new(&config.database).await?;
        info!("Database connection established");

        // Run migrations
        pool.migrate().await?;
        info!("Database migrations completed");

        Some(pool)
    } else {
        info!("Using the {} record store backend", config.database.backend);
        None
    };
    let store = create_record_store(&config.database, db_pool.as_ref())?;

    // Initialize the Zoho client and the sync pipeline
    let zoho = Arc::new(ZohoClient::new(&config.zoho)?);
    let orchestrator = Arc::new(SyncOrchestrator::new(zoho, store.clone(), &config.sync));

    // Start the sync scheduler if enabled
    let scheduler_handle = if config.sync.enabled {
        let orchestrator = orchestrator.clone();
        // tokio panics on a zero-length interval
        let interval_minutes = config.sync.interval_minutes.max(1);
        info!("Starting sync scheduler, running every {} minutes", interval_minutes);

        Some(tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(interval_minutes * 60));

            loop {
                ticker.tick().await;

                match orchestrator.sync_all().await {
                    Ok(summary) => info!(
                        "Scheduled sync finished: {}/{} campaigns synced",
                        summary.synced_count, summary.total_campaigns
                    ),
                    Err(e) => tracing::error!("Scheduled sync failed: {}", e),
                }
            }
        }))
    } else {
        info!("Sync scheduler disabled");
        None
    };

    // Start API server
    let api_handle = {
        let store = store.clone();
        let orchestrator = orchestrator.clone();
        let api_config = config.api.clone();
        let bind_address = format!("{}:{}", config.server.bind_address, config.api.port);
        tokio::spawn(async move {
            let app = campsync_api::create_router(store, orchestrator, &api_config);
            let listener = tokio::net::TcpListener::bind(&bind_address)
                .await
                .expect("Failed to bind API server");
            info!("Starting API server on {}", bind_address);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {}", e);
            }
        })
    };

    info!("CampSync started successfully");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    // Cleanup
    api_handle.abort();
    if let Some(handle) = scheduler_handle {
        handle.abort();
    }

    info!("CampSync shutdown complete");

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,campsync=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .init();
}
