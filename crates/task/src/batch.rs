//! Sequential execution of compound requests
//!
//! A batch runs every item in input order and classifies each exactly
//! once. Item failures never abort the batch; the caller gets one
//! [`BatchResult`] from which every view is derived.

use serde::Serialize;
use std::fmt::Write as _;
use std::future::Future;
use thingsctl_core::{BatchItem, Error, Result, TodoSpec};
use thingsctl_utils::tracing::{batch_completed, batch_span};
use tracing::Instrument;

/// Reason attached to every skipped heading
pub const HEADING_SKIP_REASON: &str = "Headings cannot be created through the scripting interface";

/// Classification of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Succeeded,
    Failed { reason: String },
    Skipped { reason: String },
}

/// One classified item, in input position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub title: String,
    /// `todo` or `heading`
    pub kind: &'static str,
    pub outcome: ItemOutcome,
}

/// Item that did not succeed, as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemIssue {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reason: String,
}

/// Counts per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Structured view of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub success: Vec<String>,
    pub failed: Vec<ItemIssue>,
    pub skipped: Vec<ItemIssue>,
}

/// Ordered classification of every item of a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    items: Vec<ItemReport>,
}

impl BatchResult {
    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &ItemReport> {
        self.items
            .iter()
            .filter(|item| item.outcome == ItemOutcome::Succeeded)
    }

    /// Failed items with their reasons
    pub fn failed(&self) -> impl Iterator<Item = (&ItemReport, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            ItemOutcome::Failed { reason } => Some((item, reason.as_str())),
            _ => None,
        })
    }

    /// Skipped items with their reasons
    pub fn skipped(&self) -> impl Iterator<Item = (&ItemReport, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            ItemOutcome::Skipped { reason } => Some((item, reason.as_str())),
            _ => None,
        })
    }

    pub fn counts(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.items.len(),
            ..Default::default()
        };
        for item in &self.items {
            match item.outcome {
                ItemOutcome::Succeeded => summary.succeeded += 1,
                ItemOutcome::Failed { .. } => summary.failed += 1,
                ItemOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    /// Titles of the items that succeeded, in input order
    pub fn succeeded_titles(&self) -> Vec<String> {
        self.succeeded().map(|item| item.title.clone()).collect()
    }

    pub fn report(&self) -> BatchReport {
        let issue = |(item, reason): (&ItemReport, &str)| ItemIssue {
            title: item.title.clone(),
            kind: item.kind.to_string(),
            reason: reason.to_string(),
        };
        BatchReport {
            summary: self.counts(),
            success: self.succeeded_titles(),
            failed: self.failed().map(issue).collect(),
            skipped: self.skipped().map(issue).collect(),
        }
    }

    /// Human-readable summary, one line per non-empty classification
    pub fn summary(&self) -> String {
        let counts = self.counts();
        if counts.total == 0 {
            return "No items".to_string();
        }

        let mut out = String::new();
        if counts.succeeded > 0 {
            let titles: Vec<&str> = self.succeeded().map(|item| item.title.as_str()).collect();
            let _ = writeln!(out, "Succeeded ({}): {}", counts.succeeded, titles.join(", "));
        }
        if counts.failed > 0 {
            let entries: Vec<String> = self
                .failed()
                .map(|(item, reason)| format!("{} ({reason})", item.title))
                .collect();
            let _ = writeln!(out, "Failed ({}): {}", counts.failed, entries.join(", "));
        }
        if counts.skipped > 0 {
            let entries: Vec<String> = self
                .skipped()
                .map(|(item, reason)| format!("{} ({reason})", item.title))
                .collect();
            let _ = writeln!(out, "Skipped ({}): {}", counts.skipped, entries.join(", "));
        }
        out.trim_end().to_string()
    }
}

/// Script failures are reported by their message; every item of a batch
/// runs the same script
fn failure_reason(error: &Error) -> String {
    match error {
        Error::Script { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Run every item in order through `executor`.
///
/// Headings are skipped without calling the executor. A to-do whose
/// executor call fails is recorded with the error message and the batch
/// moves on.
pub async fn run_batch<F, Fut>(operation: &str, items: &[BatchItem], mut executor: F) -> BatchResult
where
    F: FnMut(&TodoSpec) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let span = batch_span(operation, items.len());
    async move {
        let mut reports = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let outcome = match item {
                BatchItem::Heading { .. } => ItemOutcome::Skipped {
                    reason: HEADING_SKIP_REASON.to_string(),
                },
                BatchItem::Todo(todo) => match executor(todo).await {
                    Ok(()) => ItemOutcome::Succeeded,
                    Err(e) => {
                        tracing::warn!(index, title = %todo.title, error = %e, "batch item failed");
                        ItemOutcome::Failed {
                            reason: failure_reason(&e),
                        }
                    }
                },
            };
            reports.push(ItemReport {
                title: item.title().to_string(),
                kind: item.kind(),
                outcome,
            });
        }

        let result = BatchResult { items: reports };
        let counts = result.counts();
        batch_completed(operation, counts.succeeded, counts.failed, counts.skipped);
        result
    }
    .instrument(span)
    .await
}
