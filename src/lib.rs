use std::sync::Arc;

use axum::{middleware, routing::post, Router};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod joke_client;
pub mod logging;
pub mod mcp;

use domain::registry::ToolRegistry;
use http::handlers::{MCP_PATH, MCP_PATH_TRAILING_SLASH};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
}

impl AppState {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    let mcp_routes = post(http::handlers::mcp_endpoint)
        .get(http::handlers::method_not_allowed)
        .delete(http::handlers::method_not_allowed);

    Router::new()
        .route(MCP_PATH, mcp_routes.clone())
        .route(MCP_PATH_TRAILING_SLASH, mcp_routes)
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
