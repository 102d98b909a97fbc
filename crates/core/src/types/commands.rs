//! Script invocation types

use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Ordered, position-significant arguments for one script invocation.
///
/// Scripts have no named parameters, so an empty string is the only way to
/// say "no value" for a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptArguments(Vec<String>);

impl ScriptArguments {
    /// Create new empty arguments
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Create from a vector of strings
    #[must_use]
    pub fn from_vec(args: Vec<String>) -> Self {
        Self(args)
    }

    /// Add an argument
    pub fn push(&mut self, arg: impl Into<String>) {
        self.0.push(arg.into());
    }

    /// Add an optional argument, using an empty slot when absent
    pub fn push_opt(&mut self, arg: Option<&str>) {
        self.0.push(arg.unwrap_or_default().to_string());
    }

    /// Add a list argument joined with `separator`
    pub fn push_joined(&mut self, items: Option<&[String]>, separator: &str) {
        self.0
            .push(items.map(|items| items.join(separator)).unwrap_or_default());
    }

    /// Add a flag rendered as `"true"` / `"false"`
    pub fn push_flag(&mut self, flag: bool) {
        self.0.push(flag.to_string());
    }

    /// Add a tri-state flag: `"true"`, `"false"`, or empty when unchanged
    pub fn push_opt_flag(&mut self, flag: Option<bool>) {
        self.0.push(flag.map(|f| f.to_string()).unwrap_or_default());
    }

    /// Convert to inner Vec
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Get a slice of the arguments
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for ScriptArguments {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for ScriptArguments {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl<const N: usize> From<[&str; N]> for ScriptArguments {
    fn from(args: [&str; N]) -> Self {
        Self(args.iter().map(|s| s.to_string()).collect())
    }
}

impl IntoIterator for ScriptArguments {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
