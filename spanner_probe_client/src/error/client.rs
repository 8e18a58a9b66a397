//! Client-layer error type.

use spanner_probe_core::{GrpcStatusSource, ResourcePathError};
use thiserror::Error;
use tonic::Code;

use super::TransportError;

/// Client-level errors for session operations.
///
/// Server-side failures arrive wrapped in [`ClientError::Transport`]; the
/// [`GrpcStatusSource`] implementation unwraps that one layer so callers can
/// classify a `ClientError` without matching on it.
///
/// # Examples
///
/// ```no_run
/// use spanner_probe_client::{ClientError, SessionService};
/// use spanner_probe_core::is_session_not_found_error;
///
/// async fn check(client: &dyn SessionService, name: &spanner_probe_core::SessionName) {
///     match client.get_session(name).await {
///         Ok(session) => println!("still alive: {}", session.name),
///         Err(e) if is_session_not_found_error(Some(&e)) => println!("gone"),
///         Err(e) => eprintln!("Error: {}", e),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid argument provided to operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Could not obtain or attach credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Client options could not be turned into a working client
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server answered with something the client cannot interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Malformed database or session name
    #[error(transparent)]
    ResourcePath(#[from] ResourcePathError),

    /// Transport-layer error
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<tonic::Status> for ClientError {
    fn from(status: tonic::Status) -> Self {
        ClientError::Transport(status.into())
    }
}

impl ClientError {
    fn transport(&self) -> Option<&TransportError> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl GrpcStatusSource for ClientError {
    fn grpc_code(&self) -> Option<Code> {
        self.transport()?.grpc_code()
    }

    fn grpc_message(&self) -> Option<&str> {
        self.transport()?.grpc_message()
    }

    fn grpc_details(&self) -> &[u8] {
        self.transport().map(|e| e.grpc_details()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanner_probe_core::{
        error_code, extract_resource_type, is_session_not_found_error, SESSION_RESOURCE_TYPE,
    };
    use spanner_probe_proto::generated::rpc;
    use spanner_probe_proto::{encode_status, DetailMessage};

    fn session_not_found_status() -> tonic::Status {
        let message = "Session not found: projects/p/instances/i/databases/d/sessions/s";
        let payload = encode_status(
            Code::NotFound as i32,
            message,
            vec![rpc::ResourceInfo {
                resource_type: SESSION_RESOURCE_TYPE.to_string(),
                resource_name: "projects/p/instances/i/databases/d/sessions/s".to_string(),
                ..Default::default()
            }
            .into_any()],
        );
        tonic::Status::with_details(Code::NotFound, message, payload.into())
    }

    #[test]
    fn test_classifier_unwraps_transport_layer() {
        let err = ClientError::from(session_not_found_status());

        assert!(matches!(err, ClientError::Transport(_)));
        assert_eq!(error_code(&err), Code::NotFound);
        assert_eq!(
            extract_resource_type(&err).as_deref(),
            Some(SESSION_RESOURCE_TYPE)
        );
        assert!(is_session_not_found_error(Some(&err)));
    }

    #[test]
    fn test_client_level_errors_carry_no_status() {
        let err = ClientError::Authentication("no token".to_string());

        assert_eq!(err.grpc_code(), None);
        assert_eq!(error_code(&err), Code::Unknown);
        assert!(err.grpc_details().is_empty());
        assert!(!is_session_not_found_error(Some(&err)));
    }
}
