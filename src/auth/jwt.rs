//! JWT Token Service
//! Mission: Issue and verify signed identity tokens

use crate::auth::models::Claims;
use crate::users::models::User;
use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::Error as JwtError, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed token, or expired
    #[error("invalid token: {0}")]
    InvalidToken(JwtError),

    #[error("failed to sign token: {0}")]
    Signing(JwtError),
}

/// Signs and verifies tokens with a process-wide HMAC secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<Duration>,
}

impl TokenService {
    /// Tokens issued by this service never expire.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: None,
        }
    }

    /// Tokens carry an `exp` claim `ttl` from issuance and are rejected after it.
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::new(secret)
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now().timestamp().max(0) as u64;
        let claims = Claims {
            username: user.username.clone(),
            id: user.id.to_string(),
            iat: now,
            exp: self.ttl.map(|ttl| now + ttl.as_secs()),
        };

        debug!(
            "Issuing token for user {} ({}), ttl {:?}",
            user.username, user.id, self.ttl
        );

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(TokenError::InvalidToken)?;

        debug!("Verified token for user {}", decoded.claims.username);

        Ok(decoded.claims)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::default();
        validation.leeway = 0;
        if self.ttl.is_none() {
            validation.validate_exp = false;
            validation.required_spec_claims = HashSet::new();
        }
        validation
    }
}
