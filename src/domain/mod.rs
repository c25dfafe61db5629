//! Tool registry, content model and the jokes exposed over the MCP protocol

pub mod content;
pub mod registry;
pub mod tools;
