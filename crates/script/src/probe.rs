//! Availability probe

use crate::runner::{AttemptOutcome, ScriptRunner};
use thingsctl_config::ProbeSettings;

/// Whether the automated application is running.
///
/// Runs the process-listing command and looks for the process name in its
/// output. Any failure, including a timeout, reads as unavailable.
pub async fn probe_availability(runner: &dyn ScriptRunner, settings: &ProbeSettings) -> bool {
    match runner.run(&settings.command, settings.timeout()).await {
        AttemptOutcome::Completed { stdout, .. } => stdout.contains(&settings.process_name),
        AttemptOutcome::Failed { diagnostic, .. } => {
            tracing::debug!(diagnostic = %diagnostic, "availability probe failed");
            false
        }
        AttemptOutcome::TimedOut => {
            tracing::debug!("availability probe timed out");
            false
        }
    }
}
