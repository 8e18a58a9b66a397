//! Error types for the Spanner probe.
//!
//! [`TransportError`] is the lowest layer: every failed RPC surfaces as one of
//! its variants before higher layers wrap it.

use std::time::Duration;
use thiserror::Error;
use tonic::Code;

use crate::status::GrpcStatusSource;

/// Transport-layer errors for gRPC communication with the Spanner API.
///
/// These errors represent network-level failures, connection issues,
/// and gRPC protocol errors. They preserve the original gRPC status
/// code and the binary status details so callers can classify them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to establish connection to the Spanner endpoint
    #[error("Connection failed to {endpoint}: {source}")]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// Invalid endpoint URL provided
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// gRPC status error from server
    ///
    /// `details` holds the encoded `google.rpc.Status` from the
    /// `grpc-status-details-bin` trailer, empty when the server sent none.
    #[error("gRPC error [{code}]: {message}")]
    GrpcStatus {
        code: Code,
        message: String,
        details: Vec<u8>,
    },

    /// Request timed out
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// TLS/SSL configuration error
    #[error("TLS error: {0}")]
    TlsError(String),
}

impl From<tonic::Status> for TransportError {
    fn from(status: tonic::Status) -> Self {
        TransportError::GrpcStatus {
            code: status.code(),
            message: status.message().to_string(),
            details: status.details().to_vec(),
        }
    }
}

impl From<tonic::transport::Error> for TransportError {
    fn from(error: tonic::transport::Error) -> Self {
        TransportError::ConnectionFailed {
            endpoint: "unknown".to_string(),
            source: error,
        }
    }
}

impl TransportError {
    /// Create a connection failed error with a specific endpoint
    pub fn connection_failed(endpoint: impl Into<String>, source: tonic::transport::Error) -> Self {
        TransportError::ConnectionFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a status error without details
    pub fn status(code: Code, message: impl Into<String>) -> Self {
        TransportError::GrpcStatus {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Create a status error carrying an encoded `google.rpc.Status`
    pub fn status_with_details(code: Code, message: impl Into<String>, details: Vec<u8>) -> Self {
        TransportError::GrpcStatus {
            code,
            message: message.into(),
            details,
        }
    }
}

impl GrpcStatusSource for TransportError {
    fn grpc_code(&self) -> Option<Code> {
        match self {
            TransportError::GrpcStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    fn grpc_message(&self) -> Option<&str> {
        match self {
            TransportError::GrpcStatus { message, .. } => Some(message),
            _ => None,
        }
    }

    fn grpc_details(&self) -> &[u8] {
        match self {
            TransportError::GrpcStatus { details, .. } => details,
            _ => &[],
        }
    }
}

/// Errors parsing or building Spanner resource names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourcePathError {
    #[error("{0} must not be empty")]
    EmptyComponent(&'static str),

    #[error("{component} must not contain '/': {value}")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },

    #[error("Malformed {kind} name: {name}")]
    Malformed { kind: &'static str, name: String },
}
