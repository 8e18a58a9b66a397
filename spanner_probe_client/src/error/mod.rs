//! Error types for the Spanner session client.
//!
//! - [`TransportError`]: gRPC and network-level failures (re-exported from core)
//! - [`ClientError`]: client-level validation and session operation errors
//!
//! # Error Hierarchy
//!
//! ```text
//! TransportError (gRPC/network)
//!       ↓
//! ClientError (validation, auth, session operations)
//! ```
//!
//! Both layers implement [`GrpcStatusSource`](spanner_probe_core::GrpcStatusSource),
//! so the classifiers in `spanner_probe_core` accept either.

pub mod client;

pub use client::ClientError;
pub use spanner_probe_core::TransportError;
