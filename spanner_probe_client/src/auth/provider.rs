//! Authentication provider trait and types.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ClientError;

/// Authentication token with expiration information
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// Raw bearer token (OAuth access token or self-signed JWT)
    pub token: String,
    /// Unix timestamp when the token expires
    pub expires_at: i64,
}

impl AuthToken {
    /// Create a new auth token
    pub fn new(token: String, expires_at: i64) -> Self {
        Self { token, expires_at }
    }

    /// Check if the token is expired or will expire within the buffer period
    pub fn is_expired(&self, buffer_seconds: i64) -> bool {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.expires_at - buffer_seconds <= now
    }

    /// Value of the `authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Trait for authentication providers
///
/// Implementations may cache tokens internally; callers ask for a token
/// before every request.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get an authentication token (may be cached internally)
    async fn get_token(&self) -> Result<AuthToken, ClientError>;
}

/// Type alias for shared auth provider
pub type BoxedAuthProvider = Arc<dyn AuthProvider>;

/// A pre-minted access token, e.g. from `gcloud auth print-access-token`.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AuthToken,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::Authentication(
                "access token is empty".to_string(),
            ));
        }
        Ok(Self {
            token: AuthToken::new(token.trim().to_string(), i64::MAX),
        })
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<AuthToken, ClientError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_expiry_buffer() {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        assert!(AuthToken::new("t".into(), now + 30).is_expired(60));
        assert!(!AuthToken::new("t".into(), now + 120).is_expired(60));
    }

    #[tokio::test]
    async fn test_static_token_provider() {
        let provider = StaticTokenProvider::new(" ya29.token\n").unwrap();
        let token = provider.get_token().await.unwrap();

        assert_eq!(token.bearer(), "Bearer ya29.token");
        assert!(!token.is_expired(3600));
    }

    #[test]
    fn test_static_token_provider_rejects_empty() {
        assert!(matches!(
            StaticTokenProvider::new("  "),
            Err(ClientError::Authentication(_))
        ));
    }
}
