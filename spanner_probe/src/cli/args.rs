use clap::Parser;
use std::path::PathBuf;

/// Spanner session-not-found probe
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spanner-probe")]
#[command(about = "Create, delete and re-fetch a Spanner session, then check the NOT_FOUND error is classified")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(long, env = "SPANNER_PROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Google Cloud project ID
    #[arg(long, env = "SPANNER_PROJECT")]
    pub project: Option<String>,

    /// Spanner instance ID
    #[arg(long, env = "SPANNER_INSTANCE")]
    pub instance: Option<String>,

    /// Spanner database ID
    #[arg(long, env = "SPANNER_DATABASE")]
    pub database: Option<String>,

    /// gRPC endpoint (defaults to the emulator when SPANNER_EMULATOR_HOST is set)
    #[arg(long, env = "SPANNER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Report this client library in x-goog-api-client, e.g. gccl/1.41.0
    #[arg(long, env = "SPANNER_CLIENT_INFO")]
    pub client_info: Option<String>,

    /// Service-account JSON key used to sign access tokens
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    /// Pre-minted OAuth access token (takes precedence over --credentials)
    #[arg(long, env = "SPANNER_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Overall deadline for all three calls, in seconds
    #[arg(long)]
    pub deadline_secs: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
