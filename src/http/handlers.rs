//! Axum HTTP handlers for the web server

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::errors::McpError;
use crate::mcp::rpc::JsonRpcResponse;
use crate::mcp::server::handle_json_rpc_body;
use crate::AppState;

pub const MCP_PATH: &str = "/mcp";
pub const MCP_PATH_TRAILING_SLASH: &str = "/mcp/";

pub async fn mcp_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    match handle_json_rpc_body(&state, &body).await {
        Some(response) => response.into_response(),
        None => StatusCode::OK.into_response(),
    }
}

pub async fn method_not_allowed() -> JsonRpcResponse {
    JsonRpcResponse::failure(Value::Null, &McpError::MethodNotAllowed)
}
