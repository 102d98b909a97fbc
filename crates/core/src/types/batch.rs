//! Line items of compound requests
//!
//! A compound request (creating a project with items, adding items to an
//! existing project) carries a flat list of items. Headings only act as
//! visual separators for the to-dos that follow them and cannot be created
//! through the scripting interface.

use serde::{Deserialize, Serialize};

/// One line item of a compound request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatchItem {
    Todo(TodoSpec),
    Heading { title: String },
}

impl BatchItem {
    /// Title of the item regardless of kind
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            BatchItem::Todo(todo) => &todo.title,
            BatchItem::Heading { title } => title,
        }
    }

    /// Kind discriminator as it appears on the wire
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            BatchItem::Todo(_) => "todo",
            BatchItem::Heading { .. } => "heading",
        }
    }

    /// Convenience constructor for a to-do with only a title
    #[must_use]
    pub fn todo(title: impl Into<String>) -> Self {
        BatchItem::Todo(TodoSpec::new(title))
    }

    #[must_use]
    pub fn heading(title: impl Into<String>) -> Self {
        BatchItem::Heading {
            title: title.into(),
        }
    }
}

/// Fields of a to-do created as part of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// today/tomorrow/evening/anytime/someday or YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub canceled: bool,
}

impl TodoSpec {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Checklist entry titles in order
    #[must_use]
    pub fn checklist_titles(&self) -> Option<Vec<String>> {
        self.checklist
            .as_ref()
            .map(|items| items.iter().map(|item| item.title.clone()).collect())
    }
}

/// A checklist entry inside a to-do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_deserialize_by_type_tag() {
        let items: Vec<BatchItem> = serde_json::from_str(
            r#"[
                {"type": "heading", "title": "Phase 1"},
                {"type": "todo", "title": "Buy domain", "tags": ["web"],
                 "checklist": [{"title": "compare registrars"}]}
            ]"#,
        )
        .unwrap();

        assert_eq!(items[0], BatchItem::heading("Phase 1"));
        assert_eq!(items[0].kind(), "heading");
        match &items[1] {
            BatchItem::Todo(todo) => {
                assert_eq!(todo.title, "Buy domain");
                assert_eq!(todo.tags.as_deref(), Some(&["web".to_string()][..]));
                assert_eq!(
                    todo.checklist_titles(),
                    Some(vec!["compare registrars".to_string()])
                );
                assert!(!todo.completed);
            }
            other => panic!("expected todo, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let result: Result<BatchItem, _> =
            serde_json::from_str(r#"{"type": "area", "title": "Work"}"#);
        assert!(result.is_err());
    }
}
