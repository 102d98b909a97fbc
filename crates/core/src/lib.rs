//! Core domain types, errors, and constants for `thingsctl`.
//!
//! ## Key Components
//!
//! - **`errors`**: The `Error` enum and `Result` alias shared by every crate.
//!   Each variant maps to one failure kind of the script boundary
//!   (validation, missing script, timeout, script failure) or to ambient
//!   concerns (configuration, JSON, file system).
//! - **`types`**: Script invocation newtypes and the batch item model.
//! - **`constants`**: Script names, defaults and limits.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    types::*,
};
