use thiserror::Error;

/// Typed outcome of every JSON-RPC handler.
///
/// `Display` renders the exact `error.message` sent on the wire.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: Invalid JSON")]
    Parse,
    #[error("Invalid Request: 'method' is required")]
    InvalidRequest,
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Method not allowed.")]
    MethodNotAllowed,
}

impl McpError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const METHOD_NOT_ALLOWED: i32 = -32000;

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::InvalidParams(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Parse => Self::PARSE_ERROR,
            Self::InvalidRequest => Self::INVALID_REQUEST,
            Self::MethodNotFound(_) | Self::ToolNotFound(_) => Self::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => Self::INVALID_PARAMS,
            Self::Internal(_) => Self::INTERNAL_ERROR,
            Self::MethodNotAllowed => Self::METHOD_NOT_ALLOWED,
        }
    }
}

/// Failure raised by a tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("joke API request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("{0}")]
    Failed(String),
}

impl ToolError {
    pub fn invalid_arguments(detail: impl Into<String>) -> Self {
        Self::InvalidArguments(detail.into())
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed(detail.into())
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::InvalidArguments(detail) => McpError::InvalidParams(detail),
            other => McpError::Internal(other.to_string()),
        }
    }
}
