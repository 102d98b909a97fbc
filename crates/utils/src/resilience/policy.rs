//! Retry policy for script invocations.

use std::time::Duration;
use thingsctl_core::{DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY};

/// Fixed-delay retry policy.
///
/// `retry_count` counts re-attempts after the first one, so a call makes at
/// most `retry_count + 1` attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(retry_count: u32, retry_delay: Duration) -> Self {
        Self {
            retry_count,
            retry_delay,
        }
    }

    /// Total number of attempts allowed
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    /// Whether another attempt may follow attempt number `attempt` (1-based)
    #[must_use]
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts()
    }
}
