//! HTTP server initialization and runtime setup.
//!
//! Opens the configured store, builds tracking clients, spawns the backup
//! worker and runs the Axum server until Ctrl+C / SIGTERM.

use crate::application::services::run_backup_worker;
use crate::config::{Config, PROVIDER_17TRACK, PROVIDER_AFTERSHIP, StorageBackend};
use crate::infrastructure::store::{FileStore, KvStore, MemoryStore, RedisStore};
use crate::infrastructure::tracking::{AfterShipProvider, SeventeenTrackProvider, TrackingProvider};
use crate::routes::app_router;
use crate::state::{AppState, TrackingOptions};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the key-value store selected by `STORAGE_BACKEND`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or Redis is unreachable.
pub async fn open_store(config: &Config) -> Result<Arc<dyn KvStore>> {
    let store: Arc<dyn KvStore> = match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::File => Arc::new(
            FileStore::open(&config.data_dir)
                .await
                .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?,
        ),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set for the redis backend")?;
            Arc::new(
                RedisStore::connect(url, &config.redis_key_prefix)
                    .await
                    .context("Failed to connect to Redis")?,
            )
        }
    };

    tracing::info!(backend = store.backend(), "Storage ready");
    Ok(store)
}

/// Builds the tracking clients named in `TRACKING_PROVIDERS`, in order.
pub fn build_tracking_providers(config: &Config) -> Result<Vec<Arc<dyn TrackingProvider>>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.tracking_timeout_seconds))
        .user_agent(concat!("parcel-depot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let mut providers: Vec<Arc<dyn TrackingProvider>> = Vec::new();
    for name in &config.tracking_providers {
        match name.as_str() {
            PROVIDER_17TRACK => {
                let key = config
                    .seventeen_track_api_key
                    .clone()
                    .context("SEVENTEEN_TRACK_API_KEY must be set")?;
                providers.push(Arc::new(SeventeenTrackProvider::new(
                    http_client.clone(),
                    config.seventeen_track_base_url.clone(),
                    key,
                )));
            }
            PROVIDER_AFTERSHIP => {
                let key = config
                    .aftership_api_key
                    .clone()
                    .context("AFTERSHIP_API_KEY must be set")?;
                providers.push(Arc::new(AfterShipProvider::new(
                    http_client.clone(),
                    config.aftership_base_url.clone(),
                    key,
                )));
            }
            other => anyhow::bail!("Unknown tracking provider '{}'", other),
        }
    }
    Ok(providers)
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;
    if !store.health_check().await {
        tracing::warn!(backend = store.backend(), "Storage health check failed at startup");
    }

    let tracking = TrackingOptions {
        providers: build_tracking_providers(&config)?,
        demo_fallback: config.tracking_demo_fallback,
        max_retries: config.tracking_max_retries,
    };
    let state = AppState::new(store, config.token_signing_secret.clone(), tracking);

    if let Some(dir) = &config.backup_dir {
        tokio::spawn(run_backup_worker(
            state.backup_service.clone(),
            dir.clone(),
            Duration::from_secs(config.backup_check_interval_seconds),
        ));
    }

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
