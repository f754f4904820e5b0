use crate::adapters::{InMemoryPlanetStore, SwapiCounter};
use crate::api::router::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::core::retriever::PlanetRetriever;
use crate::domain::ports::{AppearanceCounter, PlanetFinder, PlanetRepository};
use crate::utils::error::{Result, StarsError};
use std::sync::Arc;
use tokio::net::TcpListener;

/// 依設定組出 store、counter 與 retriever
pub async fn build_state(config: &AppConfig) -> Result<AppState> {
    let store = match &config.store_path {
        Some(path) => InMemoryPlanetStore::open(path).await?,
        None => {
            tracing::warn!("No store path configured, planets are kept in memory only");
            InMemoryPlanetStore::new()
        }
    };
    let store = Arc::new(store);

    let counter: Arc<dyn AppearanceCounter> = Arc::new(SwapiCounter::with_timeout(
        config.swapi_url.clone(),
        config.counter_timeout(),
    )?);

    let finder: Arc<dyn PlanetFinder> = store.clone();
    let repository: Arc<dyn PlanetRepository> = store;
    let retriever = PlanetRetriever::new(finder, counter).with_max_workers(config.max_workers);

    Ok(AppState::new(retriever, repository, config.request_timeout()))
}

pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| StarsError::ConfigError {
            message: format!("cannot bind {}: {}", addr, e),
        })?;

    tracing::info!("🚀 Listening on {}", addr);
    tracing::info!(
        "SWAPI: {} | max workers: {} | request timeout: {:?}",
        config.swapi_url,
        config.max_workers,
        config.request_timeout()
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StarsError::Internal {
            message: format!("server error: {}", e),
        })?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
