use std::sync::Arc;

use mcp_joke_server::{
    build_app,
    config::Config,
    domain::tools::build_registry,
    joke_client::{ChuckNorrisClient, DEFAULT_CHUCK_API_BASE_URL},
    logging, AppState,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;

    let provider = Arc::new(ChuckNorrisClient::new(DEFAULT_CHUCK_API_BASE_URL)?);
    let registry = build_registry(provider)?;
    info!(tools = registry.len(), "tool registry ready");

    let bind_socket = config.bind_socket()?;
    let state = AppState::new(registry);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        "server starting"
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
