//! MCP tool definitions

use serde_json::{json, Value};
use thingsctl_cache::CacheCategory;

const LIST_TOOL_PREFIX: &str = "things_get_";

fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn strings(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

fn id(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
        "minLength": 20,
        "maxLength": 24
    })
}

fn when() -> Value {
    string("today, tomorrow, evening, anytime, someday, or a YYYY-MM-DD date")
}

fn deadline() -> Value {
    string("Deadline as YYYY-MM-DD")
}

fn batch_items() -> Value {
    json!({
        "type": "array",
        "description": "Flat list of items. Headings only separate the to-dos that follow them and are reported as skipped.",
        "items": {
            "type": "object",
            "properties": {
                "type": { "type": "string", "enum": ["todo", "heading"] },
                "title": { "type": "string" },
                "notes": { "type": "string" },
                "when": when(),
                "deadline": deadline(),
                "tags": strings("Tag names"),
                "checklist": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "completed": { "type": "boolean" }
                        },
                        "required": ["title"]
                    }
                },
                "completed": { "type": "boolean" },
                "canceled": { "type": "boolean" }
            },
            "required": ["type", "title"]
        }
    })
}

fn tool(name: &str, description: &str, properties: Value, required: &[&str]) -> Value {
    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

/// Category served by a `things_get_<category>` tool name
pub fn list_tool_category(name: &str) -> Option<CacheCategory> {
    name.strip_prefix(LIST_TOOL_PREFIX)
        .and_then(CacheCategory::parse)
}

/// Returns the MCP tool definitions
pub fn get_mcp_tools() -> Vec<Value> {
    let mut tools = vec![
        tool(
            "things_add_todo",
            "Add a new to-do to Things. Use checklist_items to break a task into steps that do not warrant a project.",
            json!({
                "title": string("To-do title"),
                "notes": string("Notes"),
                "when": when(),
                "deadline": deadline(),
                "tags": strings("Tag names"),
                "checklist_items": strings("Checklist entries in order"),
                "list": string("Project or area name"),
                "list_id": id("Project or area id, preferred over list"),
                "heading": string("Heading inside the target project"),
                "completed": boolean("Create as completed"),
                "canceled": boolean("Create as canceled")
            }),
            &["title"],
        ),
        tool(
            "things_add_project",
            "Create a project, optionally with to-dos and headings. Item failures are reported per item and do not undo the project.",
            json!({
                "title": string("Project title"),
                "notes": string("Notes"),
                "when": when(),
                "deadline": deadline(),
                "tags": strings("Tag names"),
                "area_id": id("Area id"),
                "area": string("Area name"),
                "items": batch_items(),
                "completed": boolean("Create as completed"),
                "canceled": boolean("Create as canceled")
            }),
            &["title"],
        ),
        tool(
            "things_update_todo",
            "Update an existing to-do. Omitted fields are left unchanged.",
            json!({
                "id": id("To-do id"),
                "title": string("New title"),
                "notes": string("New notes"),
                "when": when(),
                "deadline": deadline(),
                "tags": strings("Replacement tag names"),
                "list": string("Move to project or area by name"),
                "list_id": id("Move to project or area by id"),
                "completed": boolean("Mark completed or open"),
                "canceled": boolean("Mark canceled or open")
            }),
            &["id"],
        ),
        tool(
            "things_update_project",
            "Update an existing project. Omitted fields are left unchanged.",
            json!({
                "id": id("Project id"),
                "title": string("New title"),
                "notes": string("New notes"),
                "when": when(),
                "deadline": deadline(),
                "tags": strings("Replacement tag names"),
                "area_id": id("Move to area by id"),
                "area": string("Move to area by name"),
                "completed": boolean("Mark completed or open"),
                "canceled": boolean("Mark canceled or open")
            }),
            &["id"],
        ),
        tool(
            "things_add_items_to_project",
            "Add to-dos to an existing project. Headings cannot be added to existing projects and are reported as skipped.",
            json!({
                "id": id("Project id"),
                "items": batch_items()
            }),
            &["id", "items"],
        ),
        tool(
            "things_delete_todo",
            "Delete a to-do (moves it to the Trash). Requires confirm: true.",
            json!({
                "id": id("To-do id"),
                "confirm": boolean("Must be true")
            }),
            &["id", "confirm"],
        ),
        tool(
            "things_delete_project",
            "Delete a project and its to-dos (moves them to the Trash). Requires confirm: true.",
            json!({
                "id": id("Project id"),
                "confirm": boolean("Must be true")
            }),
            &["id", "confirm"],
        ),
        tool(
            "things_complete_todo",
            "Mark a to-do as completed.",
            json!({ "id": id("To-do id") }),
            &["id"],
        ),
        tool(
            "things_cancel_todo",
            "Mark a to-do as canceled.",
            json!({ "id": id("To-do id") }),
            &["id"],
        ),
        tool(
            "things_search",
            "Search to-dos across all lists by keyword, tag, or URL presence.",
            json!({
                "query": string("Keyword, * for everything"),
                "list": string("Restrict to a list"),
                "tag": string("Restrict to a tag"),
                "has_url": boolean("Only to-dos whose notes contain a URL"),
                "max_results": { "type": "integer", "minimum": 1, "description": "Defaults to 100" }
            }),
            &[],
        ),
        tool(
            "things_bulk_update",
            "Apply the same changes to up to 100 to-dos.",
            json!({
                "ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 1,
                    "maxItems": 100,
                    "description": "To-do ids"
                },
                "updates": {
                    "type": "object",
                    "properties": {
                        "when": when(),
                        "deadline": deadline(),
                        "tags_add": strings("Tags to add"),
                        "tags_remove": strings("Tags to remove"),
                        "list_id": id("Move to project or area by id"),
                        "list": string("Move to project or area by name")
                    }
                }
            }),
            &["ids", "updates"],
        ),
        tool(
            "things_get_stats",
            "Count to-dos per list plus projects and areas.",
            json!({}),
            &[],
        ),
    ];

    for category in CacheCategory::ALL {
        tools.push(tool(
            &format!("{LIST_TOOL_PREFIX}{category}"),
            &format!("List the contents of {category}. Results are cached briefly."),
            json!({
                "max_results": { "type": "integer", "minimum": 1, "description": "Limit the number of items" }
            }),
            &[],
        ));
    }

    tools.push(tool(
        "things_check_availability",
        "Check whether Things 3 is running and reachable.",
        json!({}),
        &[],
    ));

    tools
}
