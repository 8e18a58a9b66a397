//! Client for the Spanner session-management API.
//!
//! This crate provides the [`SessionService`] abstraction used by the probe,
//! its gRPC implementation [`GrpcSessionClient`], and the authentication and
//! request-metadata plumbing the Spanner API expects.

pub mod auth;
pub mod error;
pub mod grpc;
pub mod options;
pub mod service;

pub use error::{ClientError, TransportError};
pub use grpc::GrpcSessionClient;
pub use options::{ClientInfo, ClientOptions};
pub use service::{Session, SessionService};
