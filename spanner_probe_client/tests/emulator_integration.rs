//! Session lifecycle tests against the Cloud Spanner emulator.
//!
//! ## Prerequisites
//!
//! ```bash
//! docker run -p 9010:9010 -p 9020:9020 gcr.io/cloud-spanner-emulator/emulator
//! gcloud spanner instances create test-instance --config=emulator-config --nodes=1
//! gcloud spanner databases create test-db --instance=test-instance
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! SPANNER_EMULATOR_HOST=localhost:9010 \
//!     cargo test -p spanner_probe_client --test emulator_integration -- --ignored
//! ```
//!
//! `SPANNER_PROJECT`, `SPANNER_INSTANCE` and `SPANNER_DATABASE` override the
//! default `test-project/test-instance/test-db`.

use spanner_probe_client::{ClientInfo, ClientOptions, GrpcSessionClient, SessionService};
use spanner_probe_core::{
    error_code, is_database_not_found_error, is_session_not_found_error, DatabasePath,
};
use std::collections::HashMap;
use tonic::Code;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn test_database() -> DatabasePath {
    DatabasePath::new(
        env_or("SPANNER_PROJECT", "test-project"),
        env_or("SPANNER_INSTANCE", "test-instance"),
        env_or("SPANNER_DATABASE", "test-db"),
    )
    .expect("valid database path")
}

async fn connect(options: ClientOptions) -> GrpcSessionClient {
    assert!(
        std::env::var("SPANNER_EMULATOR_HOST").is_ok(),
        "SPANNER_EMULATOR_HOST must point at a running emulator"
    );
    GrpcSessionClient::connect(options, None)
        .await
        .expect("Failed to connect to emulator")
}

#[tokio::test]
#[ignore] // Requires the Spanner emulator
async fn test_deleted_session_is_classified_as_session_not_found() {
    let client = connect(ClientOptions::new(test_database())).await;

    let session = client
        .create_session(HashMap::from([("test".to_string(), "emulator".to_string())]))
        .await
        .expect("create session");
    assert_eq!(session.name.database(), client.database());

    client
        .delete_session(&session.name)
        .await
        .expect("delete session");

    let err = client
        .get_session(&session.name)
        .await
        .expect_err("session should be gone");

    assert_eq!(error_code(&err), Code::NotFound);
    assert!(is_session_not_found_error(Some(&err)), "{err}");
}

#[tokio::test]
#[ignore] // Requires the Spanner emulator
async fn test_classification_holds_with_client_info() {
    let options =
        ClientOptions::new(test_database()).with_client_info(ClientInfo::new("gccl", "1.41.0"));
    let client = connect(options).await;

    let session = client.create_session(HashMap::new()).await.expect("create session");
    client.delete_session(&session.name).await.expect("delete session");
    let err = client
        .get_session(&session.name)
        .await
        .expect_err("session should be gone");

    assert!(is_session_not_found_error(Some(&err)), "{err}");
}

#[tokio::test]
#[ignore] // Requires the Spanner emulator
async fn test_missing_database_is_not_a_session_error() {
    let database = DatabasePath::new(
        env_or("SPANNER_PROJECT", "test-project"),
        env_or("SPANNER_INSTANCE", "test-instance"),
        "no-such-database",
    )
    .unwrap();
    let client = connect(ClientOptions::new(database)).await;

    let err = client
        .create_session(HashMap::new())
        .await
        .expect_err("database does not exist");

    assert_eq!(error_code(&err), Code::NotFound);
    assert!(!is_session_not_found_error(Some(&err)));
    // The emulator may omit the ResourceInfo detail; only check when present.
    if spanner_probe_core::extract_resource_type(&err).is_some() {
        assert!(is_database_not_found_error(Some(&err)));
    }
}
