//! HTTP Transport layer for the Model Context Protocol
//!
//! Binds the JSON-RPC dispatcher to `POST /mcp` and rejects other verbs on that path.

pub mod handlers;
