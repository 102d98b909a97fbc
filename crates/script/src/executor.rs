//! Script executor with timeout and bounded retry

use crate::catalog::ScriptCatalog;
use crate::quoting::build_command_line;
use crate::runner::{AttemptOutcome, ScriptRunner, SystemScriptRunner};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thingsctl_config::{Config, ExecutionSettings};
use thingsctl_core::{
    Error, Result, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY, DEFAULT_SCRIPT_TIMEOUT,
    ERROR_SENTINEL,
};
use thingsctl_security::SecurityValidator;
use thingsctl_utils::resilience::{Delay, RetryPolicy, TokioDelay};
use thingsctl_utils::tracing::script_span;
use tracing::Instrument;

/// Per-call execution options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub timeout: Duration,
    pub retry_count: u32,
    pub retry_delay: Duration,
    /// Appended as the final positional argument when present
    pub max_result_count: Option<u32>,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_SCRIPT_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
            max_result_count: None,
        }
    }
}

impl From<&ExecutionSettings> for ExecuteOptions {
    fn from(settings: &ExecutionSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            retry_count: settings.retry_count,
            retry_delay: settings.retry_delay(),
            max_result_count: None,
        }
    }
}

impl ExecuteOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    #[must_use]
    pub fn with_max_result_count(mut self, max_result_count: Option<u32>) -> Self {
        self.max_result_count = max_result_count;
        self
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_count, self.retry_delay)
    }
}

/// Runs catalog scripts and classifies their outcome.
///
/// Every argument is sanitized before anything is spawned. Only failed
/// attempts are retried; a timeout, a missing script, an invalid argument
/// or an `error:` answer end the call at once.
pub struct ScriptExecutor {
    catalog: ScriptCatalog,
    runner: Arc<dyn ScriptRunner>,
    delay: Arc<dyn Delay>,
    defaults: ExecuteOptions,
}

impl ScriptExecutor {
    pub fn new(catalog: ScriptCatalog, runner: Arc<dyn ScriptRunner>) -> Self {
        Self {
            catalog,
            runner,
            delay: Arc::new(TokioDelay),
            defaults: ExecuteOptions::default(),
        }
    }

    /// Production executor for a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ScriptCatalog::from_settings(&config.scripts),
            Arc::new(SystemScriptRunner::new(config.execution.max_output_bytes)),
        )
        .with_defaults(ExecuteOptions::from(&config.execution))
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: ExecuteOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Options used by [`Self::execute_default`]
    pub fn defaults(&self) -> ExecuteOptions {
        self.defaults
    }

    pub fn runner(&self) -> Arc<dyn ScriptRunner> {
        Arc::clone(&self.runner)
    }

    pub fn catalog(&self) -> &ScriptCatalog {
        &self.catalog
    }

    /// Execute with the configured default options
    pub async fn execute_default(&self, script: &str, arguments: &[String]) -> Result<String> {
        self.execute(script, arguments, &self.defaults).await
    }

    /// Execute a script and return its trimmed stdout
    pub async fn execute(
        &self,
        script: &str,
        arguments: &[String],
        options: &ExecuteOptions,
    ) -> Result<String> {
        let path = self.catalog.resolve(script)?;

        let mut arguments = SecurityValidator::sanitize_arguments(arguments)?;
        if let Some(max) = options.max_result_count {
            arguments.push(max.to_string());
        }

        let command_line = build_command_line(self.catalog.interpreter(), &path, &arguments);

        self.run_with_retry(script, &command_line, options)
            .instrument(script_span(script))
            .await
    }

    async fn run_with_retry(
        &self,
        script: &str,
        command_line: &str,
        options: &ExecuteOptions,
    ) -> Result<String> {
        let policy = options.retry_policy();
        let mut attempt = 1;

        loop {
            let started = Instant::now();
            let outcome = self.runner.run(command_line, options.timeout).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let error = match outcome {
                AttemptOutcome::Completed { stdout, stderr } => {
                    tracing::debug!(attempt, duration_ms, "script completed");
                    return classify_output(script, &stdout, &stderr);
                }
                AttemptOutcome::TimedOut => {
                    tracing::warn!(attempt, duration_ms, "script timed out");
                    return Err(Error::timeout(script, options.timeout));
                }
                AttemptOutcome::Failed {
                    diagnostic,
                    exit_code,
                } => {
                    tracing::debug!(attempt, duration_ms, ?exit_code, "script attempt failed");
                    Error::script(script, diagnostic)
                }
            };

            if !policy.allows_retry_after(attempt) {
                return Err(error);
            }

            tracing::warn!(
                attempt,
                retry_delay_ms = policy.retry_delay.as_millis() as u64,
                error = %error,
                "retrying script"
            );
            self.delay.wait(policy.retry_delay).await;
            attempt += 1;
        }
    }
}

/// Turn a completed attempt into the call result
fn classify_output(script: &str, stdout: &str, stderr: &str) -> Result<String> {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        tracing::warn!(stderr = %stderr, "script wrote to stderr");
    }

    let stdout = stdout.trim();
    match stdout.strip_prefix(ERROR_SENTINEL) {
        Some(message) => Err(Error::script(script, message.trim())),
        None => Ok(stdout.to_string()),
    }
}
