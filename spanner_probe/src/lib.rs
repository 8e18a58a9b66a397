//! Spanner session-not-found probe.
//!
//! Creates a session, deletes it, fetches it again, and checks that the
//! resulting `NOT_FOUND` error is recognised by
//! [`is_session_not_found_error`](spanner_probe_core::is_session_not_found_error).

pub mod cli;
pub mod config;
pub mod probe;
pub mod tracing_setup;

pub use config::{ConfigError, ProbeConfig};
pub use probe::{run_probe, run_probe_with_deadline, GetOutcome, ProbeError, ProbeReport};
