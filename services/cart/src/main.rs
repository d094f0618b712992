use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod credentials;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod session;
mod state;
mod validation;

use common::{Documents, JsonFileStore};
use tokio::net::TcpListener;

use crate::{config::ServerConfig, repositories::cart::CARTS_COLLECTION, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cart service");

    let config = ServerConfig::from_env()?;

    // Initialize the document store
    let store = JsonFileStore::open(&config.data_dir).await?;
    store.ensure_collection(CARTS_COLLECTION).await?;
    let documents = Documents::new(Arc::new(store));

    let credentials = credentials::for_scheme(config.password_scheme);
    info!("Using {:?} password storage", config.password_scheme);

    let app_state = AppState::new(
        documents,
        credentials,
        config.public_dir.clone(),
        config.pages_dir.clone(),
    );

    info!("Cart service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Cart service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Cart service stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
