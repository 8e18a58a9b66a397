//! The create → delete → get probe.

use std::collections::HashMap;
use std::time::Duration;

use spanner_probe_client::{ClientError, Session, SessionService};
use spanner_probe_core::{
    error_code, is_session_not_found_error, DatabasePath, GrpcStatusSource, SessionName,
};
use thiserror::Error;
use tonic::Code;

/// Message prefix Spanner uses when a session no longer exists
pub const SESSION_NOT_FOUND_PREFIX: &str = "Session not found:";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to create session")]
    CreateSession(#[source] ClientError),

    #[error("failed to delete session")]
    DeleteSession(#[source] ClientError),

    /// The server said the session is gone but the classifier did not agree
    #[error("Session not found error failed is_session_not_found_error")]
    Misclassified(#[source] ClientError),

    #[error("probe did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// What fetching the deleted session returned
#[derive(Debug)]
pub enum GetOutcome {
    /// `NOT_FOUND` carrying a Session `ResourceInfo`
    SessionNotFound,
    /// The server still returned the session
    StillExists(Box<Session>),
    /// Any other failure; not part of the check
    OtherError { code: Code, message: String },
}

#[derive(Debug)]
pub struct ProbeReport {
    pub database: DatabasePath,
    pub session: SessionName,
    pub outcome: GetOutcome,
}

/// Run the probe against `service`.
///
/// Create and delete failures abort the probe. The fetch after delete only
/// fails the probe when it looks like a session-not-found error yet is not
/// classified as one.
pub async fn run_probe<S>(service: &S) -> Result<ProbeReport, ProbeError>
where
    S: SessionService + ?Sized,
{
    let database = service.database().clone();

    let session = service
        .create_session(HashMap::new())
        .await
        .map_err(ProbeError::CreateSession)?;
    tracing::info!(session = %session.name, "Created session");

    service
        .delete_session(&session.name)
        .await
        .map_err(ProbeError::DeleteSession)?;
    tracing::info!(session = %session.name, "Deleted session");

    let outcome = match service.get_session(&session.name).await {
        Ok(found) => {
            tracing::warn!(session = %found.name, "Session still exists after delete");
            GetOutcome::StillExists(Box::new(found))
        }
        Err(err) => classify_get_error(err)?,
    };

    Ok(ProbeReport {
        database,
        session: session.name,
        outcome,
    })
}

/// Run the probe, aborting any in-flight call once `deadline` elapses.
pub async fn run_probe_with_deadline<S>(
    service: &S,
    deadline: Duration,
) -> Result<ProbeReport, ProbeError>
where
    S: SessionService + ?Sized,
{
    tokio::time::timeout(deadline, run_probe(service))
        .await
        .map_err(|_| ProbeError::DeadlineExceeded(deadline))?
}

fn classify_get_error(err: ClientError) -> Result<GetOutcome, ProbeError> {
    let code = error_code(&err);
    let message = err.grpc_message().unwrap_or_default().to_string();

    if is_session_not_found_error(Some(&err)) {
        tracing::info!(%message, "Fetch after delete classified as session not found");
        return Ok(GetOutcome::SessionNotFound);
    }

    if code == Code::NotFound && message.starts_with(SESSION_NOT_FOUND_PREFIX) {
        return Err(ProbeError::Misclassified(err));
    }

    tracing::warn!(?code, error = %err, "Fetch after delete failed with an unrelated error");
    Ok(GetOutcome::OtherError { code, message })
}
