//! Tonic interceptor for per-database request metadata.

use tonic::metadata::{Ascii, MetadataValue};
use tonic::{Request, Status};

use crate::error::ClientError;
use crate::options::ClientOptions;

/// Routes the request to the database's serving resources
pub const RESOURCE_PREFIX_HEADER: &str = "google-cloud-resource-prefix";

/// Identifies the calling library and its version
pub const API_CLIENT_HEADER: &str = "x-goog-api-client";

/// Interceptor that adds the Spanner routing and client-identification headers
///
/// Header values are validated once when the interceptor is built, so the
/// per-request path cannot fail.
#[derive(Debug, Clone)]
pub struct SessionMetadataInterceptor {
    resource_prefix: MetadataValue<Ascii>,
    api_client: MetadataValue<Ascii>,
}

impl SessionMetadataInterceptor {
    pub fn new(options: &ClientOptions) -> Result<Self, ClientError> {
        let resource_prefix = options.database.to_string().parse().map_err(|_| {
            ClientError::Configuration(format!(
                "database path is not a valid header value: {}",
                options.database
            ))
        })?;
        let api_client = options.api_client_header().parse().map_err(|_| {
            ClientError::Configuration(format!(
                "client info is not a valid header value: {}",
                options.api_client_header()
            ))
        })?;

        Ok(Self {
            resource_prefix,
            api_client,
        })
    }
}

impl tonic::service::Interceptor for SessionMetadataInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let metadata = request.metadata_mut();
        metadata.insert(RESOURCE_PREFIX_HEADER, self.resource_prefix.clone());
        metadata.insert(API_CLIENT_HEADER, self.api_client.clone());
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use tonic::service::Interceptor;

    use super::*;
    use crate::options::ClientInfo;
    use spanner_probe_core::DatabasePath;

    fn options() -> ClientOptions {
        ClientOptions::new(DatabasePath::new("p", "i", "d").unwrap())
    }

    #[test]
    fn test_interceptor_adds_routing_headers() {
        let mut interceptor = SessionMetadataInterceptor::new(&options()).unwrap();

        let request = interceptor.call(Request::new(())).unwrap();

        assert_eq!(
            request.metadata().get(RESOURCE_PREFIX_HEADER).unwrap(),
            "projects/p/instances/i/databases/d"
        );
        assert_eq!(request.metadata().get(API_CLIENT_HEADER).unwrap(), "gl-rust");
    }

    #[test]
    fn test_interceptor_reports_client_info() {
        let options = options().with_client_info(ClientInfo::new("gccl", "1.41.0"));
        let mut interceptor = SessionMetadataInterceptor::new(&options).unwrap();

        let request = interceptor.call(Request::new(())).unwrap();

        assert_eq!(
            request.metadata().get(API_CLIENT_HEADER).unwrap(),
            "gl-rust gccl/1.41.0"
        );
    }

    #[test]
    fn test_interceptor_replaces_existing_values() {
        let mut interceptor = SessionMetadataInterceptor::new(&options()).unwrap();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(API_CLIENT_HEADER, "stale".parse().unwrap());

        let request = interceptor.call(request).unwrap();

        assert_eq!(request.metadata().get_all(API_CLIENT_HEADER).iter().count(), 1);
    }

    #[test]
    fn test_non_ascii_client_info_is_rejected() {
        let options = options().with_client_info(ClientInfo::new("gccl\n", "1"));
        assert!(matches!(
            SessionMetadataInterceptor::new(&options),
            Err(ClientError::Configuration(_))
        ));
    }
}
