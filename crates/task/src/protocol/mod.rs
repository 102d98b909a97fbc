//! Model Context Protocol server
//!
//! Line-delimited JSON-RPC 2.0 on stdio: one request per line in, one
//! response per line out. Requests are handled strictly one at a time.
//! Supported methods are `initialize`, `notifications/initialized`,
//! `ping`, `tools/list` and `tools/call`.

// Core protocol types
mod types;
pub use types::{error_codes, JsonRpcError};

// Tool definitions
mod mcp;
pub use mcp::{get_mcp_tools, list_tool_category};

// Tool call dispatch
mod handlers;
pub use handlers::{call_tool, ToolCallError, ToolOutput};

// Server loop and request routing
mod provider;
mod provider_handlers;
pub use provider::McpServer;

#[cfg(test)]
mod tests;
