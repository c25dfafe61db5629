//! The central Model Context Protocol engine
//!
//! Decodes the JSON-RPC envelope, routes by `method` (`initialize`,
//! `notifications/initialized`, `tools/list`, `tools/call`) and folds every handler
//! outcome into a result or error envelope. Nothing raised by a tool escapes this
//! boundary.

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::{content::ToolResult, registry::ToolDefinition};
use crate::errors::{McpError, ToolError};
use crate::mcp::rpc::{
    CapabilityFlag, InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, MethodResult, ServerCapabilities, ServerInfo,
};
use crate::AppState;

pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dispatches a raw HTTP body. `None` means the request was a notification.
pub async fn handle_json_rpc_body(state: &AppState, body: &[u8]) -> Option<JsonRpcResponse> {
    match serde_json::from_slice::<Value>(body) {
        Ok(payload) => handle_json_rpc_value(state, payload).await,
        Err(_) => Some(JsonRpcResponse::failure(Value::Null, &McpError::Parse)),
    }
}

pub async fn handle_json_rpc_value(state: &AppState, payload: Value) -> Option<JsonRpcResponse> {
    if !payload.is_object() {
        return Some(JsonRpcResponse::failure(
            Value::Null,
            &McpError::InvalidRequest,
        ));
    }

    let request_id = payload.get("id").cloned().unwrap_or(Value::Null);
    let request = match serde_json::from_value::<JsonRpcRequest>(payload) {
        Ok(request) if !request.method.is_empty() => request,
        _ => {
            return Some(JsonRpcResponse::failure(
                request_id,
                &McpError::InvalidRequest,
            ))
        }
    };

    let method = request.method;
    let outcome = match method.as_str() {
        "initialize" => handle_initialize(request.params).map(MethodResult::Initialize),
        "notifications/initialized" => {
            info!(method = %method, outcome = "notification", "mcp request handled");
            return None;
        }
        "tools/list" => Ok(MethodResult::ListTools(ListToolsResult {
            tools: state.registry.list(),
        })),
        "tools/call" => handle_tools_call(state, request.params)
            .await
            .map(MethodResult::CallTool),
        _ => Err(McpError::MethodNotFound(method.clone())),
    };

    let response = JsonRpcResponse::from_outcome(request.id, outcome);
    info!(
        method = %method,
        outcome = if response.is_error() { "failure" } else { "success" },
        "mcp request handled"
    );

    Some(response)
}

pub fn handle_initialize(params: Option<Value>) -> Result<InitializeResult, McpError> {
    let params: InitializeParams =
        serde_json::from_value(params.unwrap_or_else(|| Value::Object(Map::new())))
            .map_err(|err| McpError::invalid_params(err.to_string()))?;

    info!(
        client = ?params.client_info,
        protocol_version = %params.protocol_version,
        "initializing session"
    );

    Ok(InitializeResult {
        protocol_version: params.protocol_version,
        server_info: ServerInfo {
            name: SERVER_NAME,
            version: SERVER_VERSION,
        },
        capabilities: ServerCapabilities {
            tool: CapabilityFlag { enabled: true },
            list_tools: CapabilityFlag { enabled: true },
            execute_tool: CapabilityFlag { enabled: true },
        },
    })
}

pub async fn handle_tools_call(
    state: &AppState,
    params: Option<Value>,
) -> Result<ToolResult, McpError> {
    let params = match params {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(McpError::invalid_params("'params' must be an object")),
    };

    // A missing or non-string name can never match a registered tool.
    let tool = match params.get("name") {
        Some(Value::String(name)) => state
            .registry
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.clone()))?,
        other => {
            return Err(McpError::ToolNotFound(
                other.cloned().unwrap_or(Value::Null).to_string(),
            ))
        }
    };

    let arguments = match params.get("arguments") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Err(McpError::invalid_params("'arguments' must be an object")),
    };

    tool.parameters.validate(&arguments)?;
    invoke_tool(tool, arguments).await
}

/// Aborts the spawned tool task when the request future is dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn invoke_tool(
    tool: &ToolDefinition,
    arguments: Map<String, Value>,
) -> Result<ToolResult, McpError> {
    let handler = Arc::clone(&tool.handler);
    let mut task = AbortOnDrop(tokio::spawn(
        async move { handler.invoke(arguments).await },
    ));

    match (&mut task.0).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(err)) => {
            if !matches!(err, ToolError::InvalidArguments(_)) {
                error!(tool = %tool.name, error = %err, "tool execution failed");
            }
            Err(err.into())
        }
        Err(join_err) => {
            error!(tool = %tool.name, error = %join_err, "tool task did not complete");
            Err(McpError::internal(format!("tool '{}' panicked", tool.name)))
        }
    }
}
