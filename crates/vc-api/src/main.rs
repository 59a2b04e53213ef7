//! # Vehicle Check Service
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults plus `VC_*` environment overrides)
//! 2. Open the vehicle store and seed it with sample plates if empty
//! 3. Build and publish the first filter, retrying transient store errors
//! 4. Start the periodic rebuild task (if configured)
//! 5. Serve HTTP until Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use vc_api::{create_router, ApiConfig, AppState};
use vc_bloom_filter::{BloomFilterService, FilterLifecycle, Metrics};
use vc_vehicle_store::{seed_if_empty, FileVehicleStore, VehicleRecordSource, VehicleStore};

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set tracing subscriber")?;

    let config = ApiConfig::from_env();
    config.validate().context("Invalid filter configuration")?;

    info!(
        addr = %config.listen_addr(),
        store = %config.store_path.display(),
        capacity = config.lifecycle.parameters.capacity,
        target_error_rate = config.lifecycle.parameters.target_error_rate,
        "Starting vehicle check service"
    );

    let store: Arc<dyn VehicleStore> = Arc::new(FileVehicleStore::new(&config.store_path));
    let mut rng = StdRng::from_entropy();
    seed_if_empty(store.as_ref(), config.seed_count, &mut rng)
        .await
        .context("Failed to seed vehicle store")?;

    let metrics = Arc::new(Metrics::new());
    let service = BloomFilterService::new()
        .with_metrics(metrics.clone())
        .with_build_timeout(config.build_timeout);
    let filter = Arc::new(FilterLifecycle::new(
        service,
        Arc::new(VehicleRecordSource::new(store.clone())),
        config.lifecycle.clone(),
    ));

    filter
        .initialize()
        .await
        .context("Failed to build the initial vehicle filter")?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let rebuild_task = config
        .rebuild_interval
        .map(|interval| filter.clone().spawn_periodic_rebuild(interval, shutdown_rx));

    let router = create_router(AppState::new(filter, store, metrics), &config.cors);
    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    info!(addr = %config.listen_addr(), "Vehicle API is running");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    let _ = shutdown_tx.send(true);
    if let Some(task) = rebuild_task {
        if let Err(e) = task.await {
            warn!(error = %e, "Periodic rebuild task ended abnormally");
        }
    }

    info!("Vehicle check service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
