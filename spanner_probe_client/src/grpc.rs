//! gRPC client implementation for the Spanner session API.

use std::collections::HashMap;

use async_trait::async_trait;
use spanner_probe_core::{DatabasePath, SessionName};
use spanner_probe_proto::generated::spanner as pb;
use spanner_probe_proto::generated::spanner::spanner_client::SpannerClient;
use tonic::codegen::InterceptedService;
use tonic::metadata::MetadataMap;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::Request;

use crate::auth::{BoxedAuthProvider, SessionMetadataInterceptor};
use crate::error::{ClientError, TransportError};
use crate::options::ClientOptions;
use crate::service::{Session, SessionService};

type SpannerChannel = InterceptedService<Channel, SessionMetadataInterceptor>;

/// gRPC-based session client bound to one database
pub struct GrpcSessionClient {
    client: SpannerClient<SpannerChannel>,
    auth: Option<BoxedAuthProvider>,
    options: ClientOptions,
}

impl GrpcSessionClient {
    /// Connect to the endpoint in `options`.
    ///
    /// `https://` endpoints use TLS with the platform's root certificates;
    /// `http://` endpoints (the emulator) are plaintext. `auth` may be `None`
    /// for the emulator.
    pub async fn connect(
        options: ClientOptions,
        auth: Option<BoxedAuthProvider>,
    ) -> Result<Self, ClientError> {
        let mut endpoint = Endpoint::from_shared(options.endpoint.clone())
            .map_err(|_| TransportError::InvalidEndpoint(options.endpoint.clone()))?
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout);

        if options.uses_tls() {
            let domain = endpoint
                .uri()
                .host()
                .ok_or_else(|| TransportError::InvalidEndpoint(options.endpoint.clone()))?
                .to_string();
            let tls = ClientTlsConfig::new().with_native_roots().domain_name(domain);
            endpoint = endpoint
                .tls_config(tls)
                .map_err(|e| TransportError::TlsError(e.to_string()))?;
        } else if auth.is_some() {
            tracing::warn!(endpoint = %options.endpoint, "Sending credentials over a plaintext connection");
        }

        tracing::debug!(endpoint = %options.endpoint, database = %options.database, "Connecting");
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| TransportError::connection_failed(options.endpoint.clone(), e))?;

        let interceptor = SessionMetadataInterceptor::new(&options)?;
        let client = SpannerClient::with_interceptor(channel, interceptor);

        Ok(Self {
            client,
            auth,
            options,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Wrap `message` in a request carrying the deadline and credentials
    async fn request<T>(&self, message: T) -> Result<Request<T>, ClientError> {
        let mut request = Request::new(message);
        request.set_timeout(self.options.request_timeout);

        if let Some(auth) = &self.auth {
            let token = auth.get_token().await?;
            let value = token.bearer().parse().map_err(|_| {
                ClientError::Authentication("Invalid token format".to_string())
            })?;
            request.metadata_mut().insert("authorization", value);
        }

        Ok(request)
    }
}

fn log_response_metadata(method: &str, metadata: &MetadataMap) {
    if let Some(timing) = metadata.get("server-timing") {
        tracing::debug!(method, server_timing = ?timing, "Response headers");
    } else {
        tracing::trace!(method, headers = metadata.len(), "Response headers");
    }
}

#[async_trait]
impl SessionService for GrpcSessionClient {
    fn database(&self) -> &DatabasePath {
        &self.options.database
    }

    async fn create_session(
        &self,
        labels: HashMap<String, String>,
    ) -> Result<Session, ClientError> {
        let request = self
            .request(pb::CreateSessionRequest {
                database: self.options.database.to_string(),
                session: Some(pb::Session {
                    labels,
                    ..Default::default()
                }),
            })
            .await?;

        let mut client = self.client.clone();
        let response = client.create_session(request).await?;
        log_response_metadata("CreateSession", response.metadata());

        let session = Session::try_from(response.into_inner())?;
        tracing::debug!(session = %session.name, "Created session");
        Ok(session)
    }

    async fn delete_session(&self, name: &SessionName) -> Result<(), ClientError> {
        let request = self
            .request(pb::DeleteSessionRequest {
                name: name.to_string(),
            })
            .await?;

        let mut client = self.client.clone();
        let response = client.delete_session(request).await?;
        log_response_metadata("DeleteSession", response.metadata());

        tracing::debug!(session = %name, "Deleted session");
        Ok(())
    }

    async fn get_session(&self, name: &SessionName) -> Result<Session, ClientError> {
        let request = self
            .request(pb::GetSessionRequest {
                name: name.to_string(),
            })
            .await?;

        let mut client = self.client.clone();
        let response = client.get_session(request).await?;
        log_response_metadata("GetSession", response.metadata());

        Session::try_from(response.into_inner())
    }
}
