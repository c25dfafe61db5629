//! Model Context Protocol (MCP) dispatching over JSON-RPC
//!
//! `rpc` holds the envelopes and the error-code to HTTP-status table; `server` routes
//! requests to the initialize, list-tools and call-tool handlers.

pub mod rpc;
pub mod server;
