//! Shared utilities for thingsctl
//!
//! Logging setup and the retry primitives used by the script engine.

pub mod resilience;
pub mod tracing;

pub use resilience::*;
