//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for thingsctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for thingsctl operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input failed a safety or format precondition before any subprocess ran
    Validation { field: String, message: String },

    /// The named automation script does not exist
    ScriptNotFound { script: String, path: PathBuf },

    /// A single attempt exceeded its wall-clock budget
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// The script exited abnormally or answered with the error sentinel
    Script { script: String, message: String },

    /// Configuration errors
    Configuration { message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },
}
