/// Constants used throughout the thingsctl codebase
use std::time::Duration;

// Script execution defaults
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

// Argument limits
pub const MAX_ARGUMENT_LENGTH: usize = 10_000;
pub const MAX_BULK_IDS: usize = 100;
pub const DEFAULT_SEARCH_RESULTS: u32 = 100;

// Script files
pub const DEFAULT_SCRIPT_EXTENSION: &str = "applescript";
pub const DEFAULT_INTERPRETER: &str = "osascript";

// Sentinel written by scripts on stdout when the application rejects a call
pub const ERROR_SENTINEL: &str = "error:";

// Availability probe
pub const DEFAULT_PROBE_COMMAND: &str =
    "osascript -e 'tell application \"System Events\" to name of application processes'";
pub const DEFAULT_PROCESS_NAME: &str = "Things3";
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5_000);

// Cache defaults
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(60_000);

// Script names
pub mod scripts {
    pub const CREATE_TODO: &str = "create-todo";
    pub const UPDATE_TODO: &str = "update-todo";
    pub const CREATE_PROJECT: &str = "create-project";
    pub const UPDATE_PROJECT: &str = "update-project";
    pub const DELETE_TODO: &str = "delete-todo";
    pub const DELETE_PROJECT: &str = "delete-project";
    pub const COMPLETE_TODO: &str = "complete-todo";
    pub const CANCEL_TODO: &str = "cancel-todo";
    pub const SEARCH_TODOS: &str = "search-todos";
    pub const BULK_UPDATE: &str = "bulk-update";
    pub const GET_STATS: &str = "get-stats";
}

// Environment variable names
pub const THINGSCTL_CONFIG_VAR: &str = "THINGSCTL_CONFIG";
pub const THINGSCTL_SCRIPTS_DIR_VAR: &str = "THINGSCTL_SCRIPTS_DIR";
pub const THINGSCTL_INTERPRETER_VAR: &str = "THINGSCTL_INTERPRETER";
pub const THINGSCTL_TIMEOUT_MS_VAR: &str = "THINGSCTL_TIMEOUT_MS";
pub const THINGSCTL_RETRY_COUNT_VAR: &str = "THINGSCTL_RETRY_COUNT";
pub const THINGSCTL_RETRY_DELAY_MS_VAR: &str = "THINGSCTL_RETRY_DELAY_MS";
pub const THINGSCTL_CACHE_CAPACITY_VAR: &str = "THINGSCTL_CACHE_CAPACITY";
pub const THINGSCTL_CACHE_TTL_MS_VAR: &str = "THINGSCTL_CACHE_TTL_MS";
