//! Operations on Things for thingsctl
//!
//! This crate turns tool requests into script invocations. It holds the
//! batch orchestrator for compound requests, the operations service that
//! owns the executor and the response cache, and the MCP server that
//! exposes the operations as tools over stdio.

pub mod args;
pub mod batch;
pub mod params;
pub mod protocol;
pub mod responses;
pub mod service;

pub use batch::{
    run_batch, BatchReport, BatchResult, BatchSummary, ItemOutcome, HEADING_SKIP_REASON,
};
pub use protocol::{call_tool, get_mcp_tools, McpServer, ToolCallError, ToolOutput};
pub use service::ThingsService;
