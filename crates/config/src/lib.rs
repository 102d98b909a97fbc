//! Configuration for thingsctl
//!
//! Settings are layered: built-in defaults, then an optional JSON file, then
//! `THINGSCTL_*` environment variables.

pub mod config;
pub mod loader;


pub use config::*;
pub use loader::ConfigLoader;
