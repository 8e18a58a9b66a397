//! Probe configuration.
//!
//! Values come from an optional JSON file, then CLI flags and environment
//! variables override them. The database coordinates have no defaults.

use serde::{Deserialize, Serialize};
use spanner_probe_client::auth::{BoxedAuthProvider, ServiceAccountJwtProvider, StaticTokenProvider};
use spanner_probe_client::options::{default_endpoint, DEFAULT_REQUEST_TIMEOUT};
use spanner_probe_client::{ClientInfo, ClientOptions};
use spanner_probe_core::DatabasePath;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;

/// Probe configuration with validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub project: String,
    pub instance: String,
    pub database: String,

    /// gRPC endpoint; empty means [`default_endpoint`]
    pub endpoint: Option<String>,

    /// `name/version` reported in `x-goog-api-client`
    pub client_info: Option<String>,

    /// Service-account key file
    pub credentials: Option<PathBuf>,

    /// Never written back out
    #[serde(skip_serializing)]
    pub access_token: Option<String>,

    /// Overall deadline for the three calls
    #[serde(with = "serde_duration_opt")]
    pub deadline: Option<Duration>,

    /// Per-request timeout
    #[serde(with = "serde_duration_opt")]
    pub request_timeout: Option<Duration>,
}

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Client(#[from] spanner_probe_client::ClientError),
}

impl ProbeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build configuration from the command line, reading `--config` first if given
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(project) = &cli.project {
            self.project = project.clone();
        }
        if let Some(instance) = &cli.instance {
            self.instance = instance.clone();
        }
        if let Some(database) = &cli.database {
            self.database = database.clone();
        }
        if cli.endpoint.is_some() {
            self.endpoint = cli.endpoint.clone();
        }
        if cli.client_info.is_some() {
            self.client_info = cli.client_info.clone();
        }
        if cli.credentials.is_some() {
            self.credentials = cli.credentials.clone();
        }
        if cli.access_token.is_some() {
            self.access_token = cli.access_token.clone();
        }
        if let Some(secs) = cli.deadline_secs {
            self.deadline = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = cli.request_timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("project", &self.project),
            ("instance", &self.instance),
            ("database", &self.database),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }

        self.database_path()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(info) = &self.client_info {
            info.parse::<ClientInfo>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        if self.deadline() == Duration::ZERO {
            return Err(ConfigError::Invalid(
                "deadline must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout() == Duration::ZERO {
            return Err(ConfigError::Invalid(
                "request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn database_path(&self) -> Result<DatabasePath, spanner_probe_core::ResourcePathError> {
        DatabasePath::new(&self.project, &self.instance, &self.database)
    }

    pub fn deadline(&self) -> Duration {
        self.deadline.unwrap_or(DEFAULT_DEADLINE)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) if !endpoint.is_empty() => endpoint.clone(),
            _ => default_endpoint(),
        }
    }

    pub fn client_options(&self) -> Result<ClientOptions, ConfigError> {
        let database = self
            .database_path()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let mut options = ClientOptions::new(database)
            .with_endpoint(self.endpoint())
            .with_request_timeout(self.request_timeout());
        if let Some(info) = &self.client_info {
            options = options.with_client_info(info.parse()?);
        }
        Ok(options)
    }

    /// The credentials to attach, or `None` for unauthenticated (emulator) access
    pub fn auth_provider(&self) -> Result<Option<BoxedAuthProvider>, ConfigError> {
        if let Some(token) = &self.access_token {
            return Ok(Some(Arc::new(StaticTokenProvider::new(token.clone())?)));
        }
        if let Some(path) = &self.credentials {
            return Ok(Some(Arc::new(ServiceAccountJwtProvider::from_file(path)?)));
        }
        Ok(None)
    }
}

/// Serialization helper for optional durations in whole seconds
mod serde_duration_opt {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
