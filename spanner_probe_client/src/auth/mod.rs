//! Authentication and request metadata for the Spanner API.

mod interceptor;
mod jwt;
mod provider;

pub use interceptor::{SessionMetadataInterceptor, API_CLIENT_HEADER, RESOURCE_PREFIX_HEADER};
pub use jwt::{ServiceAccountJwtProvider, ServiceAccountKey, JwtClaims, SPANNER_AUDIENCE};
pub use provider::{AuthProvider, AuthToken, BoxedAuthProvider, StaticTokenProvider};
