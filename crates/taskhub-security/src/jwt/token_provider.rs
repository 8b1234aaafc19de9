//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use taskhub_config::SecurityConfig;
use taskhub_core::{Interface, TaskhubError, TaskhubResult, User};
use tracing::{debug, warn};

/// Signs claims into bearer tokens and validates them on the way back in.
pub trait TokenIssuer: Interface + Send + Sync {
    /// Builds access-token claims for `user`, valid from now.
    fn access_claims(&self, user: &User) -> Claims;

    /// Signs the claims into a compact JWT.
    fn generate_access_token(&self, claims: &Claims) -> TaskhubResult<String>;

    /// Verifies signature, issuer and expiry, returning the claims.
    fn validate_access_token(&self, token: &str) -> TaskhubResult<Claims>;

    /// Lifetime of issued access tokens in seconds.
    fn access_token_ttl_secs(&self) -> u64;
}

/// HS256 token provider.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }
}

impl TokenIssuer for TokenProvider {
    fn access_claims(&self, user: &User) -> Claims {
        let issued_at = Utc::now();
        let ttl = i64::try_from(self.config.jwt_access_expiration_secs).unwrap_or(i64::MAX);
        let expires_at = issued_at + Duration::seconds(ttl);

        Claims::new_access(user, self.config.jwt_issuer.clone(), issued_at, expires_at)
    }

    fn generate_access_token(&self, claims: &Claims) -> TaskhubResult<String> {
        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TaskhubError::Internal(format!("Failed to generate access token: {}", e)))?;

        debug!("Generated access token for user {}", claims.username);
        Ok(token)
    }

    fn validate_access_token(&self, token: &str) -> TaskhubResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Token validation failed: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => TaskhubError::TokenExpired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                    TaskhubError::InvalidToken("Invalid token signature".to_string())
                }
                ErrorKind::InvalidIssuer => TaskhubError::InvalidToken("Invalid token issuer".to_string()),
                _ => TaskhubError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    fn access_token_ttl_secs(&self) -> u64 {
        self.config.jwt_access_expiration_secs
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .finish_non_exhaustive()
    }
}
