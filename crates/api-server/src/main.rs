//! Todo list API server
//!
//! Serves the REST API on `TODO_BIND_ADDR` (default port 8081).

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::config::AppConfig;
use todo_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=debug,todo_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        store = config.store.as_str(),
        data_dir = %config.data_dir.display(),
        "Using {} store",
        config.store.as_str()
    );

    let state = AppState::new(&config)
        .await
        .context("failed to open the todo item store")?;
    let shutdown = state.shutdown_token().clone();
    let app = todo_api::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("REST API listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("failed to listen for shutdown signal: {}", err);
            }
            tracing::info!("Shutting down");
            shutdown.cancel();
        })
        .await
        .context("server error")?;

    Ok(())
}
