//! Resilience primitives for calls into the automated application.
//!
//! ## Key Components
//!
//! - **`policy`**: How many times a failed call is re-attempted and how long
//!   to wait between attempts.
//! - **`delay`**: The wait itself, behind a trait so tests run without
//!   wall-clock sleeps.

pub mod delay;
pub mod policy;

pub use delay::{Delay, NoDelay, RecordingDelay, TokioDelay};
pub use policy::RetryPolicy;
