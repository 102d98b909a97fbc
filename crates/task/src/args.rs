//! Positional argument layouts of the automation scripts
//!
//! Scripts read their arguments by position, so every builder emits every
//! slot, with an empty string for anything absent.

use crate::params::{
    AddProjectParams, AddTodoParams, BulkUpdateParams, SearchParams, UpdateProjectParams,
    UpdateTodoParams,
};
use thingsctl_core::{ScriptArguments, DEFAULT_SEARCH_RESULTS};

const TAG_SEPARATOR: &str = ",";
const CHECKLIST_SEPARATOR: &str = "\n";
const ID_SEPARATOR: &str = ",";

/// `create-todo`: title, notes, when, deadline, tags, list, list_id,
/// heading, completed, canceled, checklist
pub fn create_todo(params: &AddTodoParams) -> ScriptArguments {
    let mut args = ScriptArguments::new();
    args.push(params.title.as_str());
    args.push_opt(params.notes.as_deref());
    args.push_opt(params.when.as_deref());
    args.push_opt(params.deadline.as_deref());
    args.push_joined(params.tags.as_deref(), TAG_SEPARATOR);
    args.push_opt(params.list.as_deref());
    args.push_opt(params.list_id.as_deref());
    args.push_opt(params.heading.as_deref());
    args.push_flag(params.completed);
    args.push_flag(params.canceled);
    args.push_joined(params.checklist_items.as_deref(), CHECKLIST_SEPARATOR);
    args
}

/// `update-todo`: id, title, notes, when, deadline, tags, list, list_id,
/// completed, canceled
pub fn update_todo(params: &UpdateTodoParams) -> ScriptArguments {
    let mut args = ScriptArguments::new();
    args.push(params.id.as_str());
    args.push_opt(params.title.as_deref());
    args.push_opt(params.notes.as_deref());
    args.push_opt(params.when.as_deref());
    args.push_opt(params.deadline.as_deref());
    args.push_joined(params.tags.as_deref(), TAG_SEPARATOR);
    args.push_opt(params.list.as_deref());
    args.push_opt(params.list_id.as_deref());
    args.push_opt_flag(params.completed);
    args.push_opt_flag(params.canceled);
    args
}

/// `create-project`: title, notes, when, deadline, tags, area_id, area,
/// completed, canceled
pub fn create_project(params: &AddProjectParams) -> ScriptArguments {
    let mut args = ScriptArguments::new();
    args.push(params.title.as_str());
    args.push_opt(params.notes.as_deref());
    args.push_opt(params.when.as_deref());
    args.push_opt(params.deadline.as_deref());
    args.push_joined(params.tags.as_deref(), TAG_SEPARATOR);
    args.push_opt(params.area_id.as_deref());
    args.push_opt(params.area.as_deref());
    args.push_flag(params.completed);
    args.push_flag(params.canceled);
    args
}

/// `update-project`: id followed by the `create-project` slots
pub fn update_project(params: &UpdateProjectParams) -> ScriptArguments {
    let mut args = ScriptArguments::new();
    args.push(params.id.as_str());
    args.push_opt(params.title.as_deref());
    args.push_opt(params.notes.as_deref());
    args.push_opt(params.when.as_deref());
    args.push_opt(params.deadline.as_deref());
    args.push_joined(params.tags.as_deref(), TAG_SEPARATOR);
    args.push_opt(params.area_id.as_deref());
    args.push_opt(params.area.as_deref());
    args.push_opt_flag(params.completed);
    args.push_opt_flag(params.canceled);
    args
}

/// `search-todos`: query, list, tag, has_url, max_results
pub fn search_todos(params: &SearchParams) -> ScriptArguments {
    let mut args = ScriptArguments::new();
    args.push(params.query.as_deref().filter(|q| !q.is_empty()).unwrap_or("*"));
    args.push_opt(params.list.as_deref());
    args.push_opt(params.tag.as_deref());
    args.push(if params.has_url { "true" } else { "" });
    args.push(
        params
            .max_results
            .unwrap_or(DEFAULT_SEARCH_RESULTS)
            .to_string(),
    );
    args
}

/// `bulk-update`: ids, when, deadline, tags_add, tags_remove, list_id, list
pub fn bulk_update(params: &BulkUpdateParams) -> ScriptArguments {
    let updates = &params.updates;
    let mut args = ScriptArguments::new();
    args.push(params.ids.join(ID_SEPARATOR));
    args.push_opt(updates.when.as_deref());
    args.push_opt(updates.deadline.as_deref());
    args.push_joined(updates.tags_add.as_deref(), TAG_SEPARATOR);
    args.push_joined(updates.tags_remove.as_deref(), TAG_SEPARATOR);
    args.push_opt(updates.list_id.as_deref());
    args.push_opt(updates.list.as_deref());
    args
}

/// Single-id scripts: delete, complete, cancel
pub fn item_id(id: &str) -> ScriptArguments {
    ScriptArguments::from([id])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BulkUpdates;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_create_todo_layout() {
        let params = AddTodoParams {
            title: "Pack".to_string(),
            tags: Some(strings(&["travel", "home"])),
            list_id: Some("L".to_string()),
            checklist_items: Some(strings(&["socks", "charger"])),
            completed: true,
            ..Default::default()
        };

        assert_eq!(
            create_todo(&params).into_inner(),
            strings(&[
                "Pack",
                "",
                "",
                "",
                "travel,home",
                "",
                "L",
                "",
                "true",
                "false",
                "socks\ncharger"
            ])
        );
    }

    #[test]
    fn test_update_todo_leaves_absent_flags_empty() {
        let params = UpdateTodoParams {
            id: "ID".to_string(),
            title: Some("New".to_string()),
            canceled: Some(false),
            ..Default::default()
        };
        let args = update_todo(&params).into_inner();
        assert_eq!(args.len(), 10);
        assert_eq!(args[0], "ID");
        assert_eq!(args[1], "New");
        assert_eq!(args[8], "");
        assert_eq!(args[9], "false");
    }

    #[test]
    fn test_project_layouts() {
        let create = AddProjectParams {
            title: "Launch".to_string(),
            area: Some("Work".to_string()),
            ..Default::default()
        };
        assert_eq!(
            create_project(&create).into_inner(),
            strings(&["Launch", "", "", "", "", "", "Work", "false", "false"])
        );

        let update = UpdateProjectParams {
            id: "P".to_string(),
            completed: Some(true),
            ..Default::default()
        };
        let args = update_project(&update).into_inner();
        assert_eq!(args.len(), 10);
        assert_eq!(args[8], "true");
        assert_eq!(args[9], "");
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(
            search_todos(&SearchParams::default()).into_inner(),
            strings(&["*", "", "", "", "100"])
        );

        let params = SearchParams {
            query: Some("milk".to_string()),
            tag: Some("errand".to_string()),
            has_url: true,
            max_results: Some(5),
            ..Default::default()
        };
        assert_eq!(
            search_todos(&params).into_inner(),
            strings(&["milk", "", "errand", "true", "5"])
        );
    }

    #[test]
    fn test_bulk_update_layout() {
        let params = BulkUpdateParams {
            ids: strings(&["a", "b"]),
            updates: BulkUpdates {
                when: Some("today".to_string()),
                tags_remove: Some(strings(&["old"])),
                ..Default::default()
            },
        };
        assert_eq!(
            bulk_update(&params).into_inner(),
            strings(&["a,b", "today", "", "", "old", "", ""])
        );
    }
}
