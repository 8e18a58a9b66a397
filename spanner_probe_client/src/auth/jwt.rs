//! Self-signed JWT authentication for Google service accounts.
//!
//! Google APIs accept a JWT signed with the service account's own key in
//! place of an OAuth access token, as long as the audience is the API's
//! service URL. No token exchange round-trip is needed.

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::provider::{AuthProvider, AuthToken};
use crate::error::ClientError;

/// Audience for self-signed JWTs presented to the Spanner API
pub const SPANNER_AUDIENCE: &str = "https://spanner.googleapis.com/";

/// Default JWT token TTL in seconds (1 hour, the maximum Google accepts)
const DEFAULT_TTL_SECONDS: i64 = 3600;

/// Default token expiration buffer in seconds
const EXPIRATION_BUFFER_SECONDS: i64 = 60;

/// The fields of a service-account key file this provider needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// RSA private key in PEM format
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
}

/// JWT claims for a self-signed service-account token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Service-account JWT provider with token caching
#[derive(Debug)]
pub struct ServiceAccountJwtProvider {
    key: ServiceAccountKey,
    audience: String,
    ttl_seconds: i64,
    cached_token: Arc<RwLock<Option<AuthToken>>>,
}

impl ServiceAccountJwtProvider {
    /// Create a provider from a parsed key, validating the private key up front
    pub fn new(key: ServiceAccountKey) -> Result<Self, ClientError> {
        Self::with_options(key, SPANNER_AUDIENCE, DEFAULT_TTL_SECONDS)
    }

    pub fn with_options(
        key: ServiceAccountKey,
        audience: impl Into<String>,
        ttl_seconds: i64,
    ) -> Result<Self, ClientError> {
        Self::validate_rsa_key(key.private_key.as_bytes())?;

        if ttl_seconds <= 0 {
            return Err(ClientError::InvalidArgument(
                "TTL must be positive".to_string(),
            ));
        }
        if key.client_email.is_empty() {
            return Err(ClientError::InvalidArgument(
                "service account key has no client_email".to_string(),
            ));
        }

        Ok(Self {
            key,
            audience: audience.into(),
            ttl_seconds,
            cached_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Parse a service-account JSON key
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let key: ServiceAccountKey = serde_json::from_str(json).map_err(|e| {
            ClientError::Authentication(format!("Invalid service account key: {}", e))
        })?;
        Self::new(key)
    }

    /// Read and parse a service-account JSON key file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Authentication(format!(
                "Failed to read service account key {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn validate_rsa_key(key: &[u8]) -> Result<(), ClientError> {
        let _ = EncodingKey::from_rsa_pem(key).map_err(|e| {
            ClientError::InvalidArgument(format!("Invalid RSA private key: {}", e))
        })?;
        Ok(())
    }

    fn generate_token(&self) -> Result<AuthToken, ClientError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| ClientError::Authentication(format!("System time error: {}", e)))?
            .as_secs() as i64;

        let expires_at = now + self.ttl_seconds;

        let claims = JwtClaims {
            iss: self.key.client_email.clone(),
            sub: self.key.client_email.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: expires_at,
        };

        let mut header = Header::new(jsonwebtoken::Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| {
                ClientError::Authentication(format!("Failed to create encoding key: {}", e))
            })?;

        let token = encode(&header, &claims, &encoding_key)
            .map_err(|e| ClientError::Authentication(format!("Failed to encode JWT: {}", e)))?;

        tracing::debug!(client_email = %self.key.client_email, expires_at, "Minted self-signed JWT");
        Ok(AuthToken::new(token, expires_at))
    }
}

#[async_trait]
impl AuthProvider for ServiceAccountJwtProvider {
    async fn get_token(&self) -> Result<AuthToken, ClientError> {
        // Fast path: read lock, check cache
        {
            let cache = self.cached_token.read();
            if let Some(token) = cache.as_ref() {
                if !token.is_expired(EXPIRATION_BUFFER_SECONDS) {
                    return Ok(token.clone());
                }
            }
        }

        let mut cache = self.cached_token.write();

        // Double-check after acquiring write lock
        if let Some(token) = cache.as_ref() {
            if !token.is_expired(EXPIRATION_BUFFER_SECONDS) {
                return Ok(token.clone());
            }
        }

        let new_token = self.generate_token()?;
        *cache = Some(new_token.clone());
        Ok(new_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};

    // Generate a test RSA key pair (2048 bits)
    fn generate_test_rsa_key() -> (String, Vec<u8>) {
        use rand::thread_rng;
        use rsa::{
            pkcs1::EncodeRsaPrivateKey, pkcs8::EncodePublicKey, RsaPrivateKey, RsaPublicKey,
        };

        let mut rng = thread_rng();
        let private_key =
            RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate private key");
        let public_key = RsaPublicKey::from(&private_key);

        let private_pem = private_key
            .to_pkcs1_pem(rsa::pkcs8::LineEnding::default())
            .expect("Failed to encode private key")
            .to_string();

        let public_pem = public_key
            .to_public_key_pem(rsa::pkcs8::LineEnding::default())
            .expect("Failed to encode public key")
            .as_bytes()
            .to_vec();

        (private_pem, public_pem)
    }

    fn key(private_key: String) -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "probe@my-project.iam.gserviceaccount.com".to_string(),
            private_key,
            private_key_id: Some("key-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_jwt_claims_and_header() {
        let (private_key, public_key) = generate_test_rsa_key();

        let provider = ServiceAccountJwtProvider::new(key(private_key)).unwrap();
        let token = provider.get_token().await.unwrap();

        let header = decode_header(&token.token).unwrap();
        assert_eq!(header.kid.as_deref(), Some("key-1"));

        let decoding_key = DecodingKey::from_rsa_pem(&public_key).unwrap();
        let mut validation = Validation::new(jsonwebtoken::Algorithm::RS256);
        validation.set_audience(&[SPANNER_AUDIENCE]);
        let decoded = decode::<JwtClaims>(&token.token, &decoding_key, &validation).unwrap();

        assert_eq!(
            decoded.claims.iss,
            "probe@my-project.iam.gserviceaccount.com"
        );
        assert_eq!(decoded.claims.sub, decoded.claims.iss);
        assert_eq!(decoded.claims.aud, SPANNER_AUDIENCE);
        assert_eq!(decoded.claims.exp - decoded.claims.iat, DEFAULT_TTL_SECONDS);
    }

    #[tokio::test]
    async fn test_jwt_token_caching() {
        let (private_key, _public_key) = generate_test_rsa_key();

        let provider = ServiceAccountJwtProvider::new(key(private_key)).unwrap();

        let token1 = provider.get_token().await.unwrap();
        let token2 = provider.get_token().await.unwrap();

        assert_eq!(token1.token, token2.token);
        assert_eq!(token1.expires_at, token2.expires_at);
    }

    #[tokio::test]
    async fn test_jwt_token_refresh_on_expiration() {
        let (private_key, _public_key) = generate_test_rsa_key();

        // A TTL inside the expiry buffer forces a new token on every call
        let provider =
            ServiceAccountJwtProvider::with_options(key(private_key), SPANNER_AUDIENCE, 1).unwrap();

        let token1 = provider.get_token().await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(1100)).await;
        let token2 = provider.get_token().await.unwrap();

        assert_ne!(token1.token, token2.token);
        assert_ne!(token1.expires_at, token2.expires_at);
    }

    #[test]
    fn test_from_json() {
        let (private_key, _public_key) = generate_test_rsa_key();
        let json = serde_json::json!({
            "type": "service_account",
            "project_id": "my-project",
            "private_key_id": "abc123",
            "private_key": private_key,
            "client_email": "probe@my-project.iam.gserviceaccount.com",
            "token_uri": "https://oauth2.googleapis.com/token",
        })
        .to_string();

        let provider = ServiceAccountJwtProvider::from_json(&json).unwrap();
        assert_eq!(
            provider.client_email(),
            "probe@my-project.iam.gserviceaccount.com"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = ServiceAccountJwtProvider::new(key("not a valid key".to_string()));

        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
    }

    #[test]
    fn test_malformed_json_is_authentication_error() {
        let result = ServiceAccountJwtProvider::from_json("{\"client_email\": 1}");
        assert!(matches!(result, Err(ClientError::Authentication(_))));
    }

    #[test]
    fn test_invalid_ttl() {
        let (private_key, _public_key) = generate_test_rsa_key();

        let result = ServiceAccountJwtProvider::with_options(key(private_key), SPANNER_AUDIENCE, 0);

        assert!(matches!(result, Err(ClientError::InvalidArgument(_))));
    }
}
