/// Server setup and initialization
///
/// Wires together all components: tenant directory, tenant databases,
/// sessions, the session sweeper and the HTTP routes.

use crate::{
    api::{create_api_routes, AppState},
    auth::{SessionStore, SessionSweeper},
    config::Config,
    tenant::{TenantDatabaseManager, TenantRegistry, TenantStorage},
};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Build the shared application state
///
/// Opens the tenant directory, loads every known tenant and creates an empty
/// session store. Tenant databases open lazily on first use.
pub async fn create_state(config: Config) -> Result<AppState> {
    tracing::info!("🏗️ Initializing tenant database manager");
    let databases = Arc::new(TenantDatabaseManager::new(&config.database.data_dir));

    let master = databases
        .master_pool()
        .await
        .context("failed to open tenant directory")?;
    let storage = TenantStorage::new(master.clone());
    storage
        .init_schema()
        .await
        .context("failed to initialize tenant directory schema")?;

    tracing::info!("📥 Loading tenants from storage");
    let tenants = Arc::new(TenantRegistry::new(storage));
    tenants
        .init_from_storage()
        .await
        .context("failed to load tenants")?;

    let sessions = Arc::new(SessionStore::new(config.session_ttl()));

    Ok(AppState {
        config: Arc::new(config),
        master,
        tenants,
        databases,
        sessions,
    })
}

/// Create the Axum application around an existing state
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .merge(create_api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with the given configuration
///
/// Runs until ctrl-c, then stops the session sweeper and drains connections.
pub async fn start_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting leadline server...");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = create_state(config).await?;

    tracing::info!("⏰ Starting session sweeper");
    let sweeper = SessionSweeper::new(Arc::clone(&state.sessions))
        .await
        .context("failed to create session sweeper")?;
    sweeper.start().await.context("failed to start session sweeper")?;

    let app = create_app(state);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.stop().await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

async fn health_check() -> &'static str {
    "ok"
}
