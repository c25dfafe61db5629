//! JSON-RPC protocol representations and formatting utilities
//!
//! Provides the request/response envelopes, the typed method results and the fixed
//! mapping of JSON-RPC error codes onto HTTP status codes.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{content::ToolResult, registry::ToolDescriptor};
use crate::errors::McpError;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Accepted as-is; the version marker is not enforced.
    #[serde(default)]
    pub jsonrpc: Value,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    #[serde(default)]
    pub id: Value,
}

#[derive(Debug, Deserialize)]
pub struct InitializeParams {
    pub capabilities: Map<String, Value>,
    #[serde(rename = "clientInfo")]
    pub client_info: HashMap<String, String>,
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    #[serde(rename = "sessionContext")]
    pub session_context: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityFlag {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCapabilities {
    pub tool: CapabilityFlag,
    pub list_tools: CapabilityFlag,
    pub execute_tool: CapabilityFlag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub server_info: ServerInfo,
    pub capabilities: ServerCapabilities,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListToolsResult {
    pub tools: Vec<ToolDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MethodResult {
    Initialize(InitializeResult),
    ListTools(ListToolsResult),
    CallTool(ToolResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcResponse {
    Result {
        jsonrpc: &'static str,
        result: MethodResult,
        id: Value,
    },
    Error {
        jsonrpc: &'static str,
        error: ErrorObject,
        id: Value,
    },
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: MethodResult) -> Self {
        Self::Result {
            jsonrpc: JSONRPC_VERSION,
            result,
            id,
        }
    }

    pub fn failure(id: Value, err: &McpError) -> Self {
        Self::Error {
            jsonrpc: JSONRPC_VERSION,
            error: ErrorObject {
                code: err.code(),
                message: err.to_string(),
            },
            id,
        }
    }

    pub fn from_outcome(id: Value, outcome: Result<MethodResult, McpError>) -> Self {
        match outcome {
            Ok(result) => Self::success(id, result),
            Err(err) => Self::failure(id, &err),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Result { .. } => StatusCode::OK,
            Self::Error { error, .. } => http_status(error.code),
        }
    }
}

impl IntoResponse for JsonRpcResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Fixed JSON-RPC error code to HTTP status table. Unlisted codes are server errors.
pub fn http_status(code: i32) -> StatusCode {
    match code {
        McpError::PARSE_ERROR | McpError::INVALID_REQUEST | McpError::INVALID_PARAMS => {
            StatusCode::BAD_REQUEST
        }
        McpError::METHOD_NOT_FOUND => StatusCode::NOT_FOUND,
        McpError::METHOD_NOT_ALLOWED => StatusCode::METHOD_NOT_ALLOWED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
