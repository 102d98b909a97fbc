//! Configuration loader for thingsctl
//!
//! Precedence, lowest first: built-in defaults, the JSON config file
//! (explicit path or `THINGSCTL_CONFIG`), `THINGSCTL_*` variables.

use crate::config::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thingsctl_core::{
    Error, Result, ResultExt, THINGSCTL_CACHE_CAPACITY_VAR, THINGSCTL_CACHE_TTL_MS_VAR,
    THINGSCTL_CONFIG_VAR, THINGSCTL_INTERPRETER_VAR, THINGSCTL_RETRY_COUNT_VAR,
    THINGSCTL_RETRY_DELAY_MS_VAR, THINGSCTL_SCRIPTS_DIR_VAR, THINGSCTL_TIMEOUT_MS_VAR,
};

/// Configuration loader that handles all startup configuration
pub struct ConfigLoader {
    /// Explicit config file, takes precedence over `THINGSCTL_CONFIG`
    file: Option<PathBuf>,
    /// Snapshot of the environment to read overrides from
    env: HashMap<String, String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader reading overrides from the process environment
    pub fn new() -> Self {
        Self {
            file: None,
            env: std::env::vars().collect(),
        }
    }

    /// Set the config file to load
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Replace the environment snapshot
    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Load and validate the configuration
    pub fn load(self) -> Result<Config> {
        let file = self
            .file
            .clone()
            .or_else(|| self.env.get(THINGSCTL_CONFIG_VAR).map(PathBuf::from));

        let mut config = match file {
            Some(path) => Self::read_file(&path)?,
            None => Config::default(),
        };

        self.apply_env(&mut config)?;
        config.validate()?;

        tracing::debug!(
            scripts_dir = %config.scripts.directory.display(),
            timeout_ms = config.execution.timeout_ms,
            retry_count = config.execution.retry_count,
            cache_capacity = config.cache.capacity,
            "configuration loaded"
        );

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system(path, "read config file", e))?;
        serde_json::from_str(&content)
            .context(format!("invalid config file '{}'", path.display()))
    }

    fn apply_env(&self, config: &mut Config) -> Result<()> {
        if let Some(dir) = self.var(THINGSCTL_SCRIPTS_DIR_VAR) {
            config.scripts.directory = PathBuf::from(dir);
        }
        if let Some(interpreter) = self.var(THINGSCTL_INTERPRETER_VAR) {
            config.scripts.interpreter = interpreter.to_string();
        }
        if let Some(timeout) = self.parsed(THINGSCTL_TIMEOUT_MS_VAR)? {
            config.execution.timeout_ms = timeout;
        }
        if let Some(count) = self.parsed(THINGSCTL_RETRY_COUNT_VAR)? {
            config.execution.retry_count = count;
        }
        if let Some(delay) = self.parsed(THINGSCTL_RETRY_DELAY_MS_VAR)? {
            config.execution.retry_delay_ms = delay;
        }
        if let Some(capacity) = self.parsed(THINGSCTL_CACHE_CAPACITY_VAR)? {
            config.cache.capacity = capacity;
        }
        if let Some(ttl) = self.parsed(THINGSCTL_CACHE_TTL_MS_VAR)? {
            config.cache.ttl_ms = ttl;
        }
        Ok(())
    }

    /// Non-empty value of a variable
    fn var(&self, name: &str) -> Option<&str> {
        self.env
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn parsed<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.var(name)
            .map(|value| {
                value
                    .parse::<T>()
                    .context(format!("{name}='{value}' is not a valid number"))
            })
            .transpose()
    }
}
