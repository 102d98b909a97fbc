//! Extension traits for error handling

use super::types::{Error, Result};

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Wrap the error as a configuration error prefixed with `message`
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Configuration {
            message: format!("{}: {}", message.into(), e),
        })
    }
}
