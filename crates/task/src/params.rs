//! Tool input parameters
//!
//! Field names follow the tool schemas advertised over MCP.

use serde::{Deserialize, Serialize};
use thingsctl_core::{BatchItem, TodoSpec};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTodoParams {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub checklist_items: Option<Vec<String>>,
    /// Target list or project by name
    #[serde(default)]
    pub list: Option<String>,
    /// Target list or project by id, wins over `list`
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub canceled: bool,
}

impl AddTodoParams {
    /// A batch to-do placed into the given project
    pub fn from_spec(spec: &TodoSpec, list_id: &str) -> Self {
        Self {
            title: spec.title.clone(),
            notes: spec.notes.clone(),
            when: spec.when.clone(),
            deadline: spec.deadline.clone(),
            tags: spec.tags.clone(),
            checklist_items: spec.checklist_titles(),
            list: None,
            list_id: Some(list_id.to_string()),
            heading: None,
            completed: spec.completed,
            canceled: spec.canceled,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProjectParams {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub area_id: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<BatchItem>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub canceled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTodoParams {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub list_id: Option<String>,
    /// Left untouched when absent
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub canceled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProjectParams {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub area_id: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub canceled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemsToProjectParams {
    /// Project id
    pub id: String,
    pub items: Vec<BatchItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteParams {
    pub id: String,
    /// Must be `true` for the deletion to run
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdParams {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// `*` matches everything
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    /// Only to-dos whose notes contain a URL
    #[serde(default)]
    pub has_url: bool,
    #[serde(default)]
    pub max_results: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdates {
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub tags_add: Option<Vec<String>>,
    #[serde(default)]
    pub tags_remove: Option<Vec<String>>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
}

impl BulkUpdates {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateParams {
    pub ids: Vec<String>,
    pub updates: BulkUpdates,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub max_results: Option<u32>,
}
