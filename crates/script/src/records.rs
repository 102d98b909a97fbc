//! Parsers for the pipe-delimited answers scripts print

use serde::Serialize;
use thingsctl_core::{Error, Result};

const FIELD_SEPARATOR: char = '|';

/// Split newline-separated records into their fields, skipping blank lines
pub fn parse_records(output: &str) -> Vec<Vec<&str>> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.split(FIELD_SEPARATOR).collect())
        .collect()
}

/// A to-do as listed by search and list reads: `id|name|area|tags|list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoRecord {
    pub id: String,
    pub name: String,
    pub area: String,
    /// Comma-separated, as the application reports them
    pub tags: String,
    pub list: String,
}

impl TodoRecord {
    /// Parse one record; records without an id or a name are dropped
    pub fn parse(fields: &[&str]) -> Option<Self> {
        let field = |index: usize| fields.get(index).copied().unwrap_or_default().to_string();
        let record = Self {
            id: field(0),
            name: field(1),
            area: field(2),
            tags: field(3),
            list: field(4),
        };
        (!record.id.is_empty() && !record.name.is_empty()).then_some(record)
    }

    /// Parse every record in a script answer
    pub fn parse_all(output: &str) -> Vec<Self> {
        parse_records(output)
            .iter()
            .filter_map(|fields| Self::parse(fields))
            .collect()
    }
}

/// Counts per list: `inbox|today|upcoming|anytime|someday|logbook|projects|areas`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub inbox: u64,
    pub today: u64,
    pub upcoming: u64,
    pub anytime: u64,
    pub someday: u64,
    pub logbook: u64,
    pub projects: u64,
    pub areas: u64,
}

impl TaskStats {
    const FIELDS: usize = 8;

    /// Unparseable counts read as zero; fewer than eight fields is an error
    pub fn parse(output: &str) -> Result<Self> {
        let fields: Vec<&str> = output.trim().split(FIELD_SEPARATOR).collect();
        if fields.len() < Self::FIELDS {
            return Err(Error::script(
                thingsctl_core::scripts::GET_STATS,
                format!("unexpected output format: '{}'", output.trim()),
            ));
        }
        let count = |index: usize| fields[index].trim().parse::<u64>().unwrap_or(0);
        Ok(Self {
            inbox: count(0),
            today: count(1),
            upcoming: count(2),
            anytime: count(3),
            someday: count(4),
            logbook: count(5),
            projects: count(6),
            areas: count(7),
        })
    }

    /// Open to-dos across every active list
    pub fn total_active(&self) -> u64 {
        self.inbox + self.today + self.upcoming + self.anytime + self.someday
    }

    pub fn needing_attention(&self) -> u64 {
        self.inbox + self.today
    }

    pub fn deferred(&self) -> u64 {
        self.upcoming + self.anytime + self.someday
    }
}

/// Answer of `bulk-update`: `success|<count>[|failed:<id>,<id>]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkUpdateReport {
    pub updated: u64,
    pub failed: Vec<String>,
}

impl BulkUpdateReport {
    pub fn parse(output: &str) -> Self {
        let fields: Vec<&str> = output.trim().split(FIELD_SEPARATOR).collect();
        let updated = fields
            .get(1)
            .and_then(|count| count.trim().parse().ok())
            .unwrap_or(0);
        let failed = fields
            .get(2)
            .and_then(|field| field.strip_prefix("failed:"))
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self { updated, failed }
    }
}

/// Answer of single-item actions: `<action>|<id>|<name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    pub action: String,
    pub id: String,
    pub name: String,
}

impl ActionRecord {
    /// `None` when the answer does not have all three fields
    pub fn parse(output: &str) -> Option<Self> {
        let mut fields = output.trim().splitn(3, FIELD_SEPARATOR);
        let action = fields.next()?;
        let id = fields.next()?;
        let name = fields.next()?;
        Some(Self {
            action: action.to_string(),
            id: id.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_records_drop_incomplete_lines() {
        let output = "\
aaaaaaaaaaaaaaaaaaaa|Buy milk|Home|errand,shop|Today

|No id here
bbbbbbbbbbbbbbbbbbbb|Call mom
cccccccccccccccccccc||Work||Anytime";

        let todos = TodoRecord::parse_all(output);
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].tags, "errand,shop");
        assert_eq!(todos[0].list, "Today");
        assert_eq!(todos[1].name, "Call mom");
        assert_eq!(todos[1].area, "");
    }

    #[test]
    fn test_empty_output_has_no_records() {
        assert!(TodoRecord::parse_all("").is_empty());
        assert!(parse_records("\n  \n").is_empty());
    }

    #[test]
    fn test_stats_and_derived_counts() {
        let stats = TaskStats::parse("3|5|2|10|7|120|4|2").unwrap();
        assert_eq!(stats.logbook, 120);
        assert_eq!(stats.total_active(), 27);
        assert_eq!(stats.needing_attention(), 8);
        assert_eq!(stats.deferred(), 19);
    }

    #[test]
    fn test_stats_non_numeric_reads_zero_but_short_output_fails() {
        let stats = TaskStats::parse("x|1|1|1|1|1|1|1").unwrap();
        assert_eq!(stats.inbox, 0);
        assert!(TaskStats::parse("1|2|3").is_err());
    }

    #[test]
    fn test_bulk_report() {
        assert_eq!(
            BulkUpdateReport::parse("success|3"),
            BulkUpdateReport {
                updated: 3,
                failed: vec![]
            }
        );
        let partial = BulkUpdateReport::parse("success|1|failed:id1,id2");
        assert_eq!(partial.updated, 1);
        assert_eq!(partial.failed, vec!["id1", "id2"]);
    }

    #[test]
    fn test_action_record_keeps_pipes_in_name() {
        let record = ActionRecord::parse("deleted|abc|Plan | review").unwrap();
        assert_eq!(record.action, "deleted");
        assert_eq!(record.id, "abc");
        assert_eq!(record.name, "Plan | review");
        assert!(ActionRecord::parse("deleted").is_none());
    }
}
