//! The session operations the probe drives, independent of transport.

use std::collections::HashMap;
use std::time::SystemTime;

use async_trait::async_trait;
use spanner_probe_core::{DatabasePath, SessionName};
use spanner_probe_proto::generated::spanner as pb;

use crate::error::ClientError;

/// A server-side session handle
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub name: SessionName,
    pub labels: HashMap<String, String>,
    pub create_time: Option<SystemTime>,
    pub approximate_last_use_time: Option<SystemTime>,
    pub creator_role: String,
    pub multiplexed: bool,
}

impl Session {
    /// A session with only a name set
    pub fn named(name: SessionName) -> Self {
        Self {
            name,
            labels: HashMap::new(),
            create_time: None,
            approximate_last_use_time: None,
            creator_role: String::new(),
            multiplexed: false,
        }
    }
}

impl TryFrom<pb::Session> for Session {
    type Error = ClientError;

    fn try_from(session: pb::Session) -> Result<Self, Self::Error> {
        let name = session.name.parse::<SessionName>().map_err(|e| {
            ClientError::InvalidResponse(format!("session name {:?}: {e}", session.name))
        })?;
        Ok(Self {
            name,
            labels: session.labels,
            create_time: session.create_time.and_then(to_system_time),
            approximate_last_use_time: session.approximate_last_use_time.and_then(to_system_time),
            creator_role: session.creator_role,
            multiplexed: session.multiplexed,
        })
    }
}

fn to_system_time(ts: prost_types::Timestamp) -> Option<SystemTime> {
    SystemTime::try_from(ts).ok()
}

/// Session lifecycle operations against one database.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// The database sessions are created in
    fn database(&self) -> &DatabasePath;

    /// Creates a new session.
    async fn create_session(&self, labels: HashMap<String, String>)
        -> Result<Session, ClientError>;

    /// Ends a session, releasing server resources associated with it.
    async fn delete_session(&self, name: &SessionName) -> Result<(), ClientError>;

    /// Gets a session. Fails with `NOT_FOUND` if the session does not exist.
    async fn get_session(&self, name: &SessionName) -> Result<Session, ClientError>;
}
