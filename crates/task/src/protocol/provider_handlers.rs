//! JSON-RPC request routing

use super::handlers::{call_tool, ToolCallError};
use super::mcp::get_mcp_tools;
use super::provider::McpServer;
use super::types::{error_codes, success_response, JsonRpcError};
use serde_json::{json, Value};

const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "thingsctl";

impl McpServer {
    /// Handle a JSON-RPC request. Notifications get no response.
    pub async fn handle_request(&mut self, request: Value) -> Option<Value> {
        let id = request.get("id").cloned();

        let Some(method) = request.get("method").and_then(|m| m.as_str()) else {
            return Some(
                JsonRpcError::new(error_codes::INVALID_REQUEST, "Request has no method")
                    .into_response(id.unwrap_or(Value::Null)),
            );
        };

        let params = request.get("params").cloned().unwrap_or(Value::Null);

        let Some(id) = id else {
            tracing::debug!(method = %method, "notification received");
            return None;
        };

        tracing::debug!(method = %method, "request received");

        let response = match method {
            "initialize" => {
                let protocol_version = params
                    .get("protocolVersion")
                    .and_then(|v| v.as_str())
                    .unwrap_or(DEFAULT_PROTOCOL_VERSION);

                success_response(
                    id,
                    json!({
                        "protocolVersion": protocol_version,
                        "capabilities": { "tools": {} },
                        "serverInfo": {
                            "name": SERVER_NAME,
                            "version": env!("CARGO_PKG_VERSION")
                        }
                    }),
                )
            }
            "ping" => success_response(id, json!({})),
            "tools/list" => success_response(id, json!({ "tools": get_mcp_tools() })),
            "tools/call" => {
                let tool_name = params
                    .get("name")
                    .and_then(|n| n.as_str())
                    .unwrap_or_default()
                    .to_string();
                let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

                match call_tool(&mut self.service, &tool_name, arguments).await {
                    Ok(output) => success_response(id, output.to_json()),
                    Err(e @ ToolCallError::UnknownTool(_)) => {
                        JsonRpcError::new(error_codes::METHOD_NOT_FOUND, e.to_string())
                            .into_response(id)
                    }
                    Err(e @ ToolCallError::InvalidParams { .. }) => {
                        JsonRpcError::new(error_codes::INVALID_PARAMS, e.to_string())
                            .into_response(id)
                    }
                }
            }
            _ => JsonRpcError::new(
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {method}"),
            )
            .into_response(id),
        };

        Some(response)
    }
}
