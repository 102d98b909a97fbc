//! Script lookup

use std::path::PathBuf;
use thingsctl_config::ScriptSettings;
use thingsctl_core::{Error, Result};
use thingsctl_security::SecurityValidator;

/// A directory of `<name>.<extension>` script files and the interpreter
/// that runs them
#[derive(Debug, Clone)]
pub struct ScriptCatalog {
    directory: PathBuf,
    extension: String,
    interpreter: String,
}

impl ScriptCatalog {
    pub fn new(
        directory: impl Into<PathBuf>,
        extension: impl Into<String>,
        interpreter: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
            interpreter: interpreter.into(),
        }
    }

    pub fn from_settings(settings: &ScriptSettings) -> Self {
        Self::new(
            &settings.directory,
            &settings.extension,
            &settings.interpreter,
        )
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Path a script would live at, without checking that it exists
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        SecurityValidator::validate_script_name(name)?;
        Ok(self.directory.join(format!("{name}.{}", self.extension)))
    }

    /// Resolve a script to an existing file
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::script_not_found(name, path))
        }
    }
}
