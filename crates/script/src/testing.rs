//! Deterministic runner for tests
//!
//! [`ScriptedRunner`] never spawns a process. It answers each call from
//! outcomes queued per script and records every command line it sees.

use crate::runner::{AttemptOutcome, ScriptRunner};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// One call seen by a [`ScriptedRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command_line: String,
    pub timeout: Duration,
}

#[derive(Debug)]
struct Rule {
    pattern: String,
    queue: VecDeque<AttemptOutcome>,
    last: Option<AttemptOutcome>,
}

#[derive(Debug, Default)]
struct State {
    rules: Vec<Rule>,
    calls: Vec<RecordedCall>,
}

/// Replays queued outcomes. Clones share state, so a test can keep one
/// handle for assertions after moving another into an executor.
///
/// Outcomes queued for a script are returned in order; once the queue is
/// drained the last outcome repeats. Calls matching no rule fail.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    state: Arc<Mutex<State>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue an outcome for the script file `<name>.<ext>`
    pub fn on(&self, script: &str, outcome: AttemptOutcome) -> &Self {
        self.on_matching(&format!("/{script}."), outcome)
    }

    /// Queue an outcome for any command line containing `pattern`
    pub fn on_matching(&self, pattern: &str, outcome: AttemptOutcome) -> &Self {
        let mut state = self.lock();
        match state.rules.iter().position(|rule| rule.pattern == pattern) {
            Some(index) => state.rules[index].queue.push_back(outcome),
            None => state.rules.push(Rule {
                pattern: pattern.to_string(),
                queue: VecDeque::from([outcome]),
                last: None,
            }),
        }
        self
    }

    /// Shorthand for a successful answer
    pub fn reply(&self, script: &str, stdout: &str) -> &Self {
        self.on(script, AttemptOutcome::completed(stdout))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Number of calls that ran the given script
    pub fn calls_to(&self, script: &str) -> usize {
        let pattern = format!("/{script}.");
        self.lock()
            .calls
            .iter()
            .filter(|call| call.command_line.contains(&pattern))
            .count()
    }

    /// Command lines of calls that ran the given script
    pub fn command_lines_for(&self, script: &str) -> Vec<String> {
        let pattern = format!("/{script}.");
        self.lock()
            .calls
            .iter()
            .filter(|call| call.command_line.contains(&pattern))
            .map(|call| call.command_line.clone())
            .collect()
    }
}

#[async_trait]
impl ScriptRunner for ScriptedRunner {
    async fn run(&self, command_line: &str, timeout: Duration) -> AttemptOutcome {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            command_line: command_line.to_string(),
            timeout,
        });

        let rule = state
            .rules
            .iter_mut()
            .find(|rule| command_line.contains(&rule.pattern));

        match rule {
            Some(rule) => match rule.queue.pop_front() {
                Some(outcome) => {
                    rule.last = Some(outcome.clone());
                    outcome
                }
                None => rule
                    .last
                    .clone()
                    .unwrap_or_else(|| AttemptOutcome::failed("no scripted outcome left")),
            },
            None => AttemptOutcome::failed(format!("no scripted outcome for: {command_line}")),
        }
    }
}
