//! Configuration structs for thingsctl
//!
//! The configuration is immutable after loading and is handed to the
//! components that need it at construction time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thingsctl_core::{
    Error, Result, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, DEFAULT_INTERPRETER,
    DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_PROBE_COMMAND, DEFAULT_PROBE_TIMEOUT, DEFAULT_PROCESS_NAME,
    DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY, DEFAULT_SCRIPT_EXTENSION, DEFAULT_SCRIPT_TIMEOUT,
};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scripts: ScriptSettings,
    pub execution: ExecutionSettings,
    pub cache: CacheSettings,
    pub probe: ProbeSettings,
}

/// Where automation scripts live and how they are run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Directory holding `<name>.<extension>` script files
    pub directory: PathBuf,
    pub extension: String,
    /// Program that runs a script file
    pub interpreter: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            directory: default_scripts_dir(),
            extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
        }
    }
}

/// `<data dir>/thingsctl/scripts`, falling back to `./scripts`
fn default_scripts_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("thingsctl").join("scripts"))
        .unwrap_or_else(|| PathBuf::from("scripts"))
}

/// Per-call execution defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSettings {
    pub timeout_ms: u64,
    pub retry_count: u32,
    pub retry_delay_ms: u64,
    pub max_output_bytes: usize,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_SCRIPT_TIMEOUT.as_millis() as u64,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay_ms: DEFAULT_RETRY_DELAY.as_millis() as u64,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }
}

impl ExecutionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Response cache sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub capacity: usize,
    pub ttl_ms: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl_ms: DEFAULT_CACHE_TTL.as_millis() as u64,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

/// Availability probe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Shell command listing running application processes
    pub command: String,
    /// Substring identifying the automated application in that listing
    pub process_name: String,
    pub timeout_ms: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_PROBE_COMMAND.to_string(),
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Reject settings no component can work with
    pub fn validate(&self) -> Result<()> {
        if self.execution.timeout_ms == 0 {
            return Err(Error::configuration("execution.timeout_ms must be positive"));
        }
        if self.cache.capacity == 0 {
            return Err(Error::configuration("cache.capacity must be positive"));
        }
        if self.probe.timeout_ms == 0 {
            return Err(Error::configuration("probe.timeout_ms must be positive"));
        }
        if self.scripts.interpreter.trim().is_empty() {
            return Err(Error::configuration("scripts.interpreter cannot be empty"));
        }
        if self.scripts.extension.is_empty() || self.scripts.extension.contains('/') {
            return Err(Error::configuration(format!(
                "scripts.extension '{}' is not a file extension",
                self.scripts.extension
            )));
        }
        Ok(())
    }
}
