//! `spanner-probe`: verify that a deleted Spanner session is reported as a
//! classifiable Session-not-found error.
//!
//! ## Running
//!
//! ```bash
//! # Against the emulator
//! SPANNER_EMULATOR_HOST=localhost:9010 \
//!     cargo run -p spanner_probe -- --project test-project --instance test-instance --database test-db
//!
//! # Against Cloud Spanner, reporting a client library version
//! cargo run -p spanner_probe -- --project my-project --instance my-instance --database my-db \
//!     --credentials key.json --client-info gccl/1.41.0
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use spanner_probe::cli::Cli;
use spanner_probe::tracing_setup::init_tracing;
use spanner_probe::{run_probe_with_deadline, GetOutcome, ProbeConfig};
use spanner_probe_client::GrpcSessionClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = ProbeConfig::from_cli(cli).context("invalid configuration")?;
    let options = config.client_options()?;
    let auth = config.auth_provider()?;

    tracing::info!(
        endpoint = %options.endpoint,
        database = %options.database,
        client_info = %options.api_client_header(),
        authenticated = auth.is_some(),
        "Starting probe"
    );

    let client = GrpcSessionClient::connect(options, auth)
        .await
        .context("failed to create session client")?;

    let report = run_probe_with_deadline(&client, config.deadline()).await?;

    match &report.outcome {
        GetOutcome::SessionNotFound => {}
        GetOutcome::StillExists(session) => {
            tracing::warn!(session = %session.name, "Deleted session was still readable")
        }
        GetOutcome::OtherError { code, message } => {
            tracing::warn!(?code, %message, "Fetch after delete did not return NOT_FOUND")
        }
    }

    tracing::info!("Ok: {}", report.database);
    Ok(())
}
