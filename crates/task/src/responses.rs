//! Operation results and their JSON renderings

use crate::batch::BatchResult;
use crate::params::SearchParams;
use serde::Serialize;
use serde_json::{json, Value};
use thingsctl_cache::CacheCategory;
use thingsctl_script::{ActionRecord, BulkUpdateReport, TaskStats, TodoRecord};

/// An item the application just created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedItem {
    pub id: String,
    pub title: String,
}

/// A new project and, when items were given, the batch that filled it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCreation {
    pub project: CreatedItem,
    pub batch: Option<BatchResult>,
}

impl ProjectCreation {
    pub fn to_json(&self) -> Value {
        let Some(batch) = &self.batch else {
            return json!({ "success": true, "project": self.project });
        };

        let report = batch.report();
        let reasons = |issues: &[crate::batch::ItemIssue]| -> Vec<Value> {
            issues
                .iter()
                .map(|issue| json!({ "title": issue.title, "reason": issue.reason }))
                .collect()
        };

        json!({
            "success": true,
            "project": self.project,
            "items": report.summary,
            "created": report.success,
            "failed": reasons(&report.failed),
            "skipped": reasons(&report.skipped),
        })
    }
}

/// Items added to an existing project
pub fn items_added(project_id: &str, batch: &BatchResult) -> Value {
    let report = batch.report();
    json!({
        "projectId": project_id,
        "summary": report.summary,
        "success": report.success,
        "failed": report.failed,
        "skipped": report.skipped,
    })
}

/// Result of a single-item action (delete, complete, cancel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemAction {
    /// `todo` or `project`
    pub kind: &'static str,
    pub action: String,
    pub id: String,
    /// Absent when the script answered in an unexpected format
    pub name: Option<String>,
}

impl ItemAction {
    /// Interpret `<action>|<id>|<name>`, falling back to the requested id
    pub fn from_output(kind: &'static str, action: &str, requested_id: &str, output: &str) -> Self {
        match ActionRecord::parse(output) {
            Some(record) => Self {
                kind,
                action: record.action,
                id: record.id,
                name: Some(record.name),
            },
            None => Self {
                kind,
                action: action.to_string(),
                id: requested_id.to_string(),
                name: None,
            },
        }
    }

    pub fn to_json(&self) -> Value {
        match &self.name {
            Some(name) => {
                let mut value = json!({ "success": true, "action": self.action });
                value[self.kind] = json!({ "id": self.id, "name": name });
                value
            }
            None => json!({ "success": true, "action": self.action, "id": self.id }),
        }
    }
}

pub fn search_results(params: &SearchParams, todos: &[TodoRecord]) -> Value {
    let query = params
        .query
        .as_deref()
        .filter(|query| !query.is_empty() && *query != "*");
    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

    json!({
        "todos": todos,
        "count": todos.len(),
        "query": query,
        "filters": {
            "list": non_empty(&params.list),
            "tag": non_empty(&params.tag),
            "has_url": params.has_url.then_some(true),
        }
    })
}

pub fn bulk_result(total: usize, report: &BulkUpdateReport) -> Value {
    let mut value = json!({
        "success": report.failed.is_empty(),
        "updated": report.updated,
        "total": total,
    });
    if !report.failed.is_empty() {
        value["failed"] = json!(report.failed);
        value["failedCount"] = json!(report.failed.len());
    }
    value
}

pub fn stats(stats: &TaskStats) -> Value {
    let mut counts = json!(stats);
    counts["totalActive"] = json!(stats.total_active());
    json!({
        "stats": counts,
        "summary": {
            "activeTasksNeedingAttention": stats.needing_attention(),
            "deferredTasks": stats.deferred(),
            "completedTasks": stats.logbook,
        }
    })
}

pub fn list(category: CacheCategory, items: &[TodoRecord]) -> Value {
    json!({
        "list": category.as_str(),
        "items": items,
        "count": items.len(),
    })
}

pub fn availability(available: bool) -> Value {
    if available {
        json!({ "available": true })
    } else {
        json!({
            "available": false,
            "message": "Things 3 is not running or cannot be reached. Start Things and allow automation access."
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::run_batch;
    use thingsctl_core::{BatchItem, Error};

    #[test]
    fn test_project_without_items_is_minimal() {
        let creation = ProjectCreation {
            project: CreatedItem {
                id: "P1".to_string(),
                title: "Launch".to_string(),
            },
            batch: None,
        };
        assert_eq!(
            creation.to_json(),
            json!({"success": true, "project": {"id": "P1", "title": "Launch"}})
        );
    }

    #[tokio::test]
    async fn test_project_with_items_shape() {
        let items = vec![
            BatchItem::heading("Prep"),
            BatchItem::todo("Buy domain"),
            BatchItem::todo("Write copy"),
        ];
        let batch = run_batch("test", &items, |todo| {
            let fail = todo.title == "Write copy";
            async move {
                if fail {
                    Err(Error::script("create-todo", "boom"))
                } else {
                    Ok(())
                }
            }
        })
        .await;
        let creation = ProjectCreation {
            project: CreatedItem {
                id: "P1".to_string(),
                title: "Launch".to_string(),
            },
            batch: Some(batch),
        };

        let value = creation.to_json();
        assert_eq!(
            value["items"],
            json!({"total": 3, "succeeded": 1, "failed": 1, "skipped": 1})
        );
        assert_eq!(value["created"], json!(["Buy domain"]));
        assert_eq!(value["failed"][0]["title"], "Write copy");
        assert!(value["failed"][0].get("type").is_none());
        assert_eq!(value["skipped"][0]["title"], "Prep");
    }

    #[test]
    fn test_item_action_shapes() {
        let parsed = ItemAction::from_output("todo", "deleted", "X", "deleted|ID1|Buy milk");
        assert_eq!(
            parsed.to_json(),
            json!({"success": true, "action": "deleted", "todo": {"id": "ID1", "name": "Buy milk"}})
        );

        let fallback = ItemAction::from_output("project", "deleted", "X", "ok");
        assert_eq!(
            fallback.to_json(),
            json!({"success": true, "action": "deleted", "id": "X"})
        );
    }

    #[test]
    fn test_bulk_result_reports_failures() {
        let clean = bulk_result(
            2,
            &BulkUpdateReport {
                updated: 2,
                failed: vec![],
            },
        );
        assert_eq!(clean, json!({"success": true, "updated": 2, "total": 2}));

        let partial = bulk_result(
            3,
            &BulkUpdateReport {
                updated: 1,
                failed: vec!["a".to_string(), "b".to_string()],
            },
        );
        assert_eq!(partial["success"], false);
        assert_eq!(partial["failedCount"], 2);
    }

    #[test]
    fn test_stats_summary() {
        let value = stats(&TaskStats {
            inbox: 1,
            today: 2,
            upcoming: 3,
            anytime: 4,
            someday: 5,
            logbook: 6,
            projects: 7,
            areas: 8,
        });
        assert_eq!(value["stats"]["totalActive"], 15);
        assert_eq!(value["summary"]["activeTasksNeedingAttention"], 3);
        assert_eq!(value["summary"]["deferredTasks"], 12);
        assert_eq!(value["summary"]["completedTasks"], 6);
    }
}
