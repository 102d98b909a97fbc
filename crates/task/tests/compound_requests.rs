//! Compound requests driven through the MCP server

use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use thingsctl_cache::ResponseCache;
use thingsctl_config::ProbeSettings;
use thingsctl_core::{BatchItem, Error};
use thingsctl_script::testing::ScriptedRunner;
use thingsctl_script::{AttemptOutcome, ExecuteOptions, ScriptCatalog, ScriptExecutor};
use thingsctl_task::{run_batch, McpServer, ThingsService, HEADING_SKIP_REASON};
use thingsctl_utils::resilience::NoDelay;

const PROJECT_ID: &str = "LaUnCh0123456789abcd";
const TODO_ID: &str = "ToDo0123456789abcdef";

fn server() -> (TempDir, ScriptedRunner, McpServer) {
    let dir = TempDir::new().unwrap();
    for script in ["create-project", "create-todo", "get-projects", "get-areas"] {
        std::fs::write(dir.path().join(format!("{script}.applescript")), "").unwrap();
    }
    let runner = ScriptedRunner::new();
    let executor = ScriptExecutor::new(
        ScriptCatalog::new(dir.path(), "applescript", "osascript"),
        Arc::new(runner.clone()),
    )
    .with_delay(Arc::new(NoDelay))
    .with_defaults(ExecuteOptions::default().with_retry_delay(Duration::ZERO));
    let service = ThingsService::new(
        executor,
        ResponseCache::new(100, Duration::from_secs(60)),
        ProbeSettings::default(),
    );
    (dir, runner, McpServer::new(service))
}

async fn call_tool(server: &mut McpServer, tool: &str, arguments: Value) -> Value {
    let response = server
        .handle_request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": tool, "arguments": arguments }
        }))
        .await
        .unwrap();
    assert_eq!(response["result"]["isError"], false, "{response}");
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn launch_project_creates_project_then_two_todos() {
    let (_dir, runner, mut server) = server();
    runner
        .reply("create-project", PROJECT_ID)
        .reply("create-todo", TODO_ID);

    let body = call_tool(
        &mut server,
        "things_add_project",
        json!({
            "title": "Launch",
            "items": [
                {"type": "heading", "title": "Setup"},
                {"type": "todo", "title": "Buy domain"},
                {"type": "todo", "title": "Write copy"}
            ]
        }),
    )
    .await;

    assert_eq!(runner.calls_to("create-project"), 1);
    assert_eq!(runner.calls_to("create-todo"), 2);
    assert!(runner.calls()[0].command_line.contains("/create-project."));

    assert_eq!(body["success"], true);
    assert_eq!(body["project"], json!({"id": PROJECT_ID, "title": "Launch"}));
    assert_eq!(
        body["items"],
        json!({"total": 3, "succeeded": 2, "failed": 0, "skipped": 1})
    );
    assert_eq!(body["created"], json!(["Buy domain", "Write copy"]));
    assert_eq!(
        body["skipped"],
        json!([{"title": "Setup", "reason": HEADING_SKIP_REASON}])
    );
}

#[tokio::test]
async fn partial_failure_still_reports_every_item_and_invalidates_projects() {
    let (_dir, runner, mut server) = server();
    runner
        .reply("create-project", PROJECT_ID)
        .reply("get-projects", &format!("{PROJECT_ID}|Launch|||"))
        .reply("get-areas", "")
        .on("create-todo", AttemptOutcome::completed(TODO_ID))
        .on("create-todo", AttemptOutcome::completed("error: Invalid deadline"))
        .on("create-todo", AttemptOutcome::completed(TODO_ID));

    call_tool(&mut server, "things_get_projects", json!({})).await;
    call_tool(&mut server, "things_get_areas", json!({})).await;

    let body = call_tool(
        &mut server,
        "things_add_items_to_project",
        json!({
            "id": PROJECT_ID,
            "items": [
                {"type": "todo", "title": "A"},
                {"type": "todo", "title": "B", "deadline": "soon"},
                {"type": "heading", "title": "Later"},
                {"type": "todo", "title": "C"}
            ]
        }),
    )
    .await;

    assert_eq!(body["projectId"], PROJECT_ID);
    assert_eq!(
        body["summary"],
        json!({"total": 4, "succeeded": 2, "failed": 1, "skipped": 1})
    );
    assert_eq!(body["success"], json!(["A", "C"]));
    assert_eq!(
        body["failed"],
        json!([{"title": "B", "type": "todo", "reason": "Invalid deadline"}])
    );
    assert_eq!(body["skipped"][0]["type"], "heading");

    // The sentinel answer was not retried
    assert_eq!(runner.calls_to("create-todo"), 3);

    // Projects were re-read after the structural change, areas were not
    call_tool(&mut server, "things_get_projects", json!({})).await;
    call_tool(&mut server, "things_get_areas", json!({})).await;
    assert_eq!(runner.calls_to("get-projects"), 2);
    assert_eq!(runner.calls_to("get-areas"), 1);
}

#[tokio::test]
async fn batch_example_classifies_each_item_once() {
    let items = vec![
        BatchItem::heading("Phase 1"),
        BatchItem::todo("A"),
        BatchItem::todo("B"),
    ];

    let result = run_batch("example", &items, |todo| {
        let fail = todo.title == "B";
        async move {
            if fail {
                Err(Error::script("create-todo", "boom"))
            } else {
                Ok(())
            }
        }
    })
    .await;

    let report = serde_json::to_value(result.report()).unwrap();
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["success"], json!(["A"]));
    assert_eq!(
        report["failed"],
        json!([{"title": "B", "type": "todo", "reason": "boom"}])
    );
    assert_eq!(
        report["skipped"],
        json!([{"title": "Phase 1", "type": "heading", "reason": HEADING_SKIP_REASON}])
    );
}
