//! relay-gateway server entry point.
//!
//! Starts the Axum HTTP server with the WebSocket relay endpoint.

use tracing_subscriber::EnvFilter;

use relay_gateway::api;
use relay_gateway::app_state::AppState;
use relay_gateway::config::{LogFormat, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = RelayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        delivery_mode = %config.delivery_mode,
        "starting relay-gateway"
    );

    // Build application state and router
    let app_state = AppState::new(config.delivery_mode);
    let app = api::build_app(app_state, config.cors_allow_any);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
