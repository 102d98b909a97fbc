//! Core domain types for `thingsctl`.
//!
//! - **`commands`**: Positional argument vectors for scripts
//! - **`batch`**: Line items of compound requests (to-dos and headings)

pub mod batch;
pub mod commands;

pub use batch::*;
pub use commands::*;
