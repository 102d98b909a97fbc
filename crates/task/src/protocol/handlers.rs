//! MCP tool call handlers

use super::mcp::list_tool_category;
use crate::params::{
    AddItemsToProjectParams, AddProjectParams, AddTodoParams, BulkUpdateParams, DeleteParams,
    ItemIdParams, ListParams, SearchParams, UpdateProjectParams, UpdateTodoParams,
};
use crate::responses;
use crate::service::ThingsService;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt;
use thingsctl_core::Result;

/// Text content of a tool result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn from_result(tool: &str, result: Result<Value>) -> Self {
        match result {
            Ok(Value::String(text)) => Self {
                text,
                is_error: false,
            },
            Ok(value) => Self {
                text: serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
                is_error: false,
            },
            Err(e) => {
                tracing::warn!(tool = %tool, error = %e, "tool call failed");
                Self {
                    text: format!("Error: {e}"),
                    is_error: true,
                }
            }
        }
    }

    /// MCP `tools/call` result body
    pub fn to_json(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.text }],
            "isError": self.is_error
        })
    }
}

/// A call that could not be dispatched to an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallError {
    UnknownTool(String),
    InvalidParams { tool: String, message: String },
}

impl fmt::Display for ToolCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolCallError::UnknownTool(name) => write!(f, "Tool not found: {name}"),
            ToolCallError::InvalidParams { tool, message } => {
                write!(f, "Invalid arguments for {tool}: {message}")
            }
        }
    }
}

fn parse<T: DeserializeOwned>(
    tool: &str,
    arguments: Value,
) -> std::result::Result<T, ToolCallError> {
    serde_json::from_value(arguments).map_err(|e| ToolCallError::InvalidParams {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Run one tool against the service.
///
/// Operation failures come back as an error result; only unknown tools
/// and undecodable arguments are call errors.
pub async fn call_tool(
    service: &mut ThingsService,
    name: &str,
    arguments: Value,
) -> std::result::Result<ToolOutput, ToolCallError> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };

    let result: Result<Value> = match name {
        "things_add_todo" => {
            let params: AddTodoParams = parse(name, arguments)?;
            service
                .add_todo(&params)
                .await
                .map(|todo| json!({ "success": true, "todo": todo }))
        }
        "things_add_project" => {
            let params: AddProjectParams = parse(name, arguments)?;
            service
                .add_project(&params)
                .await
                .map(|creation| creation.to_json())
        }
        "things_update_todo" => {
            let params: UpdateTodoParams = parse(name, arguments)?;
            service.update_todo(&params).await.map(Value::String)
        }
        "things_update_project" => {
            let params: UpdateProjectParams = parse(name, arguments)?;
            service.update_project(&params).await.map(Value::String)
        }
        "things_add_items_to_project" => {
            let params: AddItemsToProjectParams = parse(name, arguments)?;
            service
                .add_items_to_project(&params)
                .await
                .map(|batch| responses::items_added(&params.id, &batch))
        }
        "things_delete_todo" => {
            let params: DeleteParams = parse(name, arguments)?;
            service.delete_todo(&params).await.map(|a| a.to_json())
        }
        "things_delete_project" => {
            let params: DeleteParams = parse(name, arguments)?;
            service.delete_project(&params).await.map(|a| a.to_json())
        }
        "things_complete_todo" => {
            let params: ItemIdParams = parse(name, arguments)?;
            service.complete_todo(&params).await.map(|a| a.to_json())
        }
        "things_cancel_todo" => {
            let params: ItemIdParams = parse(name, arguments)?;
            service.cancel_todo(&params).await.map(|a| a.to_json())
        }
        "things_search" => {
            let params: SearchParams = parse(name, arguments)?;
            service
                .search(&params)
                .await
                .map(|todos| responses::search_results(&params, &todos))
        }
        "things_bulk_update" => {
            let params: BulkUpdateParams = parse(name, arguments)?;
            service
                .bulk_update(&params)
                .await
                .map(|report| responses::bulk_result(params.ids.len(), &report))
        }
        "things_get_stats" => service.get_stats().await.map(|s| responses::stats(&s)),
        "things_check_availability" => Ok(responses::availability(
            service.check_availability().await,
        )),
        other => match list_tool_category(other) {
            Some(category) => {
                let params: ListParams = parse(name, arguments)?;
                service
                    .get_list(category, params.max_results)
                    .await
                    .map(|items| responses::list(category, &items))
            }
            None => return Err(ToolCallError::UnknownTool(other.to_string())),
        },
    };

    Ok(ToolOutput::from_result(name, result))
}
