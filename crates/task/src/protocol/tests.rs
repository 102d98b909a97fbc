//! Tests for the protocol module

#[cfg(test)]
mod protocol_tests {
    use super::super::*;
    use crate::service::ThingsService;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use thingsctl_cache::ResponseCache;
    use thingsctl_config::ProbeSettings;
    use thingsctl_script::testing::ScriptedRunner;
    use thingsctl_script::{AttemptOutcome, ExecuteOptions, ScriptCatalog, ScriptExecutor};
    use thingsctl_utils::resilience::NoDelay;

    const TODO_ID: &str = "AbCdEfGhIj0123456789";

    fn server(scripts: &[&str]) -> (TempDir, ScriptedRunner, McpServer) {
        let dir = TempDir::new().unwrap();
        for script in scripts {
            std::fs::write(dir.path().join(format!("{script}.applescript")), "").unwrap();
        }
        let runner = ScriptedRunner::new();
        let executor = ScriptExecutor::new(
            ScriptCatalog::new(dir.path(), "applescript", "osascript"),
            Arc::new(runner.clone()),
        )
        .with_delay(Arc::new(NoDelay))
        .with_defaults(ExecuteOptions::default().with_retry_count(0));
        let service = ThingsService::new(
            executor,
            ResponseCache::new(100, Duration::from_secs(60)),
            ProbeSettings::default(),
        );
        (dir, runner, McpServer::new(service))
    }

    fn call(id: u64, tool: &str, arguments: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": tool, "arguments": arguments }
        })
    }

    #[tokio::test]
    async fn test_initialize_advertises_tools() {
        let (_dir, _runner, mut server) = server(&[]);
        let response = server
            .handle_request(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": { "protocolVersion": "2025-03-26" }
            }))
            .await
            .unwrap();

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "thingsctl");
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let (_dir, _runner, mut server) = server(&[]);
        let response = server
            .handle_request(json!({
                "jsonrpc": "2.0",
                "method": "notifications/initialized"
            }))
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_tools_list() {
        let (_dir, _runner, mut server) = server(&[]);
        let response = server
            .handle_request(json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}))
            .await
            .unwrap();
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), get_mcp_tools().len());
        assert_eq!(response["id"], "a");
    }

    #[tokio::test]
    async fn test_unknown_tool_and_method_are_method_not_found() {
        let (_dir, _runner, mut server) = server(&[]);

        let response = server
            .handle_request(call(2, "things_fly", json!({})))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], error_codes::METHOD_NOT_FOUND);

        let response = server
            .handle_request(json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], error_codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_undecodable_arguments_are_invalid_params() {
        let (_dir, runner, mut server) = server(&["create-todo"]);
        let response = server
            .handle_request(call(4, "things_add_todo", json!({"notes": "no title"})))
            .await
            .unwrap();
        assert_eq!(response["error"]["code"], error_codes::INVALID_PARAMS);
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_operation_errors_are_error_results() {
        let (_dir, runner, mut server) = server(&["delete-todo"]);
        let response = server
            .handle_request(call(5, "things_delete_todo", json!({"id": TODO_ID})))
            .await
            .unwrap();

        let result = &response["result"];
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("confirm"));
        assert_eq!(runner.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_call_returns_text_content() {
        let (_dir, runner, mut server) = server(&["complete-todo"]);
        runner.reply("complete-todo", &format!("completed|{TODO_ID}|Buy milk"));

        let response = server
            .handle_request(call(6, "things_complete_todo", json!({"id": TODO_ID})))
            .await
            .unwrap();

        let result = &response["result"];
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["type"], "text");
        let body: Value =
            serde_json::from_str(result["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(body["todo"]["name"], "Buy milk");
    }

    #[tokio::test]
    async fn test_list_tool_reads_category() {
        let (_dir, runner, mut server) = server(&["get-inbox"]);
        runner.reply("get-inbox", &format!("{TODO_ID}|Inbox item|||Inbox"));

        let response = server
            .handle_request(call(7, "things_get_inbox", Value::Null))
            .await
            .unwrap();
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        let body: Value = serde_json::from_str(text).unwrap();
        assert_eq!(body["list"], "inbox");
        assert_eq!(body["count"], 1);
    }

    #[tokio::test]
    async fn test_availability_tool() {
        let (_dir, runner, mut server) = server(&[]);
        runner.on_matching("System Events", AttemptOutcome::completed("Finder"));

        let response = server
            .handle_request(call(8, "things_check_availability", json!({})))
            .await
            .unwrap();
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("\"available\": false"));
    }

    #[tokio::test]
    async fn test_serve_loop_handles_lines_in_order() {
        let (_dir, _runner, mut server) = server(&[]);
        let input = concat!(
            "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n",
            "\n",
            "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
            "not json\n",
            "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n",
        );
        let mut output = Vec::new();

        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["error"]["code"], error_codes::PARSE_ERROR);
        assert_eq!(responses[1]["id"], Value::Null);
        assert_eq!(responses[2]["id"], 2);
    }
}
