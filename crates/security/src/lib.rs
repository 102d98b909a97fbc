//! Security features for thingsctl
//!
//! This crate certifies that values are safe to place on the command line
//! used to run automation scripts, and that item identifiers are well-formed
//! before they reach the automated application.

pub mod validator;

pub use validator::SecurityValidator;
