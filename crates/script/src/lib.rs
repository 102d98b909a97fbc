//! Script execution engine for thingsctl
//!
//! Runs named automation scripts as subprocesses and turns every attempt
//! into a typed result. The moving parts:
//!
//! - [`ScriptCatalog`] resolves a script name to a file on disk
//! - [`quoting`] builds a shell-safe command line from sanitized arguments
//! - [`ScriptRunner`] runs one attempt; [`SystemScriptRunner`] is the
//!   `sh -c` implementation, [`testing::ScriptedRunner`] a replaying fake
//! - [`ScriptExecutor`] ties them together with timeout and retry
//! - [`records`] parses the pipe-delimited answers scripts print

pub mod catalog;
pub mod executor;
pub mod probe;
pub mod quoting;
pub mod records;
pub mod runner;
pub mod testing;

pub use catalog::ScriptCatalog;
pub use executor::{ExecuteOptions, ScriptExecutor};
pub use probe::probe_availability;
pub use records::{ActionRecord, BulkUpdateReport, TaskStats, TodoRecord};
pub use runner::{AttemptOutcome, ScriptRunner, SystemScriptRunner};
