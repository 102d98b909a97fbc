//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation { field, message } => {
                write!(f, "invalid {field}: {message}")
            }
            Error::ScriptNotFound { script, path } => {
                write!(
                    f,
                    "script '{script}' not found at '{}'",
                    path.display()
                )
            }
            Error::Timeout {
                operation,
                duration,
            } => {
                write!(f, "script '{operation}' timed out after {duration:?}")
            }
            Error::Script { script, message } => {
                write!(f, "script '{script}' failed: {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
        }
    }
}
