//! Core types for the Spanner session probe.
//!
//! This crate provides:
//! - [`TransportError`]: gRPC and network-level failures, preserving the raw
//!   status details sent by the server
//! - [`RpcStatus`] / [`ErrorDetail`]: a decoded view of `google.rpc.Status`
//! - [`GrpcStatusSource`]: the capability any error exposes when it carries a
//!   gRPC status, used by the classifier instead of concrete type checks
//! - [`classify`]: resource-not-found predicates, most notably
//!   [`is_session_not_found_error`]
//! - [`DatabasePath`] / [`SessionName`]: Spanner resource names

pub mod classify;
pub mod error;
pub mod status;
pub mod types;

pub use classify::{
    error_code, extract_resource_type, is_database_not_found_error,
    is_instance_not_found_error, is_resource_not_found, is_session_not_found_error,
    DATABASE_RESOURCE_TYPE, INSTANCE_RESOURCE_TYPE, SESSION_RESOURCE_TYPE,
};
pub use error::{ResourcePathError, TransportError};
pub use status::{ErrorDetail, GrpcStatusSource, RpcStatus};
pub use types::{DatabasePath, SessionName};
