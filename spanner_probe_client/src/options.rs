//! Client options.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use spanner_probe_core::DatabasePath;

use crate::error::ClientError;

pub const DEFAULT_ENDPOINT: &str = "https://spanner.googleapis.com";

/// When set, the client talks plaintext to this `host:port` without credentials.
pub const EMULATOR_HOST_ENV: &str = "SPANNER_EMULATOR_HOST";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Library identification reported in the `x-goog-api-client` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ClientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

impl FromStr for ClientInfo {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((name, version))
                if !name.is_empty() && !version.is_empty() && !version.contains('/') =>
            {
                Ok(ClientInfo::new(name, version))
            }
            _ => Err(ClientError::InvalidArgument(format!(
                "client info must look like name/version, got {s:?}"
            ))),
        }
    }
}

/// Client configuration options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// gRPC endpoint, `https://` for Cloud Spanner or `http://` for the emulator
    pub endpoint: String,
    /// Database every request is routed to
    pub database: DatabasePath,
    /// Optional client identification; `None` sends only the language token
    pub client_info: Option<ClientInfo>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientOptions {
    pub fn new(database: DatabasePath) -> Self {
        Self {
            endpoint: default_endpoint(),
            database,
            client_info: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_client_info(mut self, client_info: ClientInfo) -> Self {
        self.client_info = Some(client_info);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether requests go over TLS
    pub fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    /// Value of the `x-goog-api-client` header
    pub fn api_client_header(&self) -> String {
        match &self.client_info {
            Some(info) => format!("gl-rust {info}"),
            None => "gl-rust".to_string(),
        }
    }
}

/// The emulator endpoint if [`EMULATOR_HOST_ENV`] is set, otherwise [`DEFAULT_ENDPOINT`].
pub fn default_endpoint() -> String {
    match std::env::var(EMULATOR_HOST_ENV) {
        Ok(host) if !host.is_empty() => format!("http://{host}"),
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> DatabasePath {
        DatabasePath::new("p", "i", "d").unwrap()
    }

    #[test]
    fn test_parse_client_info() {
        let info: ClientInfo = "gccl/1.41.0".parse().unwrap();
        assert_eq!(info, ClientInfo::new("gccl", "1.41.0"));
        assert_eq!(info.to_string(), "gccl/1.41.0");

        assert!("gccl".parse::<ClientInfo>().is_err());
        assert!("/1.0".parse::<ClientInfo>().is_err());
        assert!("gccl/".parse::<ClientInfo>().is_err());
        assert!("a/b/c".parse::<ClientInfo>().is_err());
    }

    #[test]
    fn test_api_client_header() {
        let options = ClientOptions::new(database());
        assert_eq!(options.api_client_header(), "gl-rust");

        let options = options.with_client_info(ClientInfo::new("gccl", "1.41.0"));
        assert_eq!(options.api_client_header(), "gl-rust gccl/1.41.0");
    }

    #[test]
    fn test_tls_follows_scheme() {
        let options = ClientOptions::new(database()).with_endpoint("https://spanner.googleapis.com");
        assert!(options.uses_tls());

        let options = options.with_endpoint("http://localhost:9010");
        assert!(!options.uses_tls());
    }
}
