//! One attempt of a script invocation

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thingsctl_core::DEFAULT_MAX_OUTPUT_BYTES;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

/// What happened to a single attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The process exited successfully
    Completed { stdout: String, stderr: String },
    /// The process could not be spawned, exited non-zero, or overflowed
    /// the output limit
    Failed {
        diagnostic: String,
        exit_code: Option<i32>,
    },
    /// The time limit elapsed and the process was killed
    TimedOut,
}

impl AttemptOutcome {
    pub fn completed(stdout: impl Into<String>) -> Self {
        AttemptOutcome::Completed {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        AttemptOutcome::Failed {
            diagnostic: diagnostic.into(),
            exit_code: Some(1),
        }
    }
}

/// Trait for running a shell command line once.
///
/// Implementations must enforce `timeout` themselves and must not leave
/// the process running after returning [`AttemptOutcome::TimedOut`].
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run(&self, command_line: &str, timeout: Duration) -> AttemptOutcome;
}

/// Production runner: `sh -c <command line>` under a tokio timeout
#[derive(Debug, Clone)]
pub struct SystemScriptRunner {
    max_output_bytes: usize,
}

impl Default for SystemScriptRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_OUTPUT_BYTES)
    }
}

impl SystemScriptRunner {
    pub fn new(max_output_bytes: usize) -> Self {
        Self { max_output_bytes }
    }

    fn spawn(&self, command_line: &str) -> std::io::Result<Child> {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // The interpreter runs as a grandchild, so a timeout has to reach the
        // whole group rather than just the shell
        #[cfg(unix)]
        command.process_group(0);

        command.spawn()
    }

    async fn run_to_completion(&self, mut child: Child) -> AttemptOutcome {
        let limit = self.max_output_bytes as u64 + 1;
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout, stderr) =
            tokio::join!(read_limited(stdout, limit), read_limited(stderr, limit));

        let status = match child.wait().await {
            Ok(status) => status,
            Err(e) => {
                return AttemptOutcome::Failed {
                    diagnostic: format!("failed to wait for script: {e}"),
                    exit_code: None,
                }
            }
        };

        if stdout.len() > self.max_output_bytes {
            return AttemptOutcome::Failed {
                diagnostic: format!("output exceeded {} bytes", self.max_output_bytes),
                exit_code: status.code(),
            };
        }

        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();

        if status.success() {
            AttemptOutcome::Completed { stdout, stderr }
        } else {
            let stderr = stderr.trim();
            let diagnostic = if stderr.is_empty() {
                format!("script exited with {status}")
            } else {
                stderr.to_string()
            };
            AttemptOutcome::Failed {
                diagnostic,
                exit_code: status.code(),
            }
        }
    }
}

/// SIGKILL every process in the group led by `pgid`
#[cfg(unix)]
fn kill_process_group(pgid: Option<u32>) {
    let Some(pgid) = pgid else {
        return;
    };
    // Safety: kill(2) touches no memory; a negative pid addresses the group
    let rc = unsafe { libc::kill(-(pgid as libc::pid_t), libc::SIGKILL) };
    if rc != 0 {
        let e = std::io::Error::last_os_error();
        if e.raw_os_error() != Some(libc::ESRCH) {
            tracing::warn!(pgid, error = %e, "failed to kill script process group");
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pgid: Option<u32>) {}

/// Read at most `limit` bytes; read errors end the stream
async fn read_limited<R>(reader: Option<R>, limit: u64) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();
    if let Some(reader) = reader {
        if let Err(e) = reader.take(limit).read_to_end(&mut buffer).await {
            tracing::debug!(error = %e, "script output stream closed early");
        }
    }
    buffer
}

#[async_trait]
impl ScriptRunner for SystemScriptRunner {
    async fn run(&self, command_line: &str, timeout: Duration) -> AttemptOutcome {
        let child = match self.spawn(command_line) {
            Ok(child) => child,
            Err(e) => {
                return AttemptOutcome::Failed {
                    diagnostic: format!("failed to spawn shell: {e}"),
                    exit_code: None,
                }
            }
        };
        let pgid = child.id();

        // Dropping the in-flight future drops the shell; the rest of its
        // group is killed explicitly
        match tokio::time::timeout(timeout, self.run_to_completion(child)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                kill_process_group(pgid);
                AttemptOutcome::TimedOut
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const GENEROUS: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn test_completed_captures_both_streams() {
        let runner = SystemScriptRunner::default();
        let outcome = runner
            .run("printf 'abc|def\\n'; printf 'warn' >&2", GENEROUS)
            .await;
        assert_eq!(
            outcome,
            AttemptOutcome::Completed {
                stdout: "abc|def\n".to_string(),
                stderr: "warn".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failed_with_stderr() {
        let runner = SystemScriptRunner::default();
        let outcome = runner.run("echo 'boom' >&2; exit 3", GENEROUS).await;
        assert_eq!(
            outcome,
            AttemptOutcome::Failed {
                diagnostic: "boom".to_string(),
                exit_code: Some(3),
            }
        );
    }

    #[tokio::test]
    async fn test_slow_command_times_out() {
        let runner = SystemScriptRunner::default();
        let outcome = runner.run("sleep 5", Duration::from_millis(100)).await;
        assert_eq!(outcome, AttemptOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_output_over_limit_fails() {
        let runner = SystemScriptRunner::new(8);
        let outcome = runner.run("printf '0123456789'", GENEROUS).await;
        assert!(matches!(
            outcome,
            AttemptOutcome::Failed { ref diagnostic, .. } if diagnostic.contains("8 bytes")
        ));
    }

    #[tokio::test]
    async fn test_timeout_kills_grandchildren() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let line = format!("sh -c 'sleep 1; touch \"{}\"'", marker.display());

        let runner = SystemScriptRunner::default();
        let outcome = runner.run(&line, Duration::from_millis(100)).await;
        assert_eq!(outcome, AttemptOutcome::TimedOut);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }
}
