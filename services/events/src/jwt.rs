//! JWT service for token generation and validation
//!
//! Tokens are signed with HS256 using a shared secret. The only payload is
//! the user id; the user is looked up again on every request, so tokens are
//! never trusted for anything beyond identity.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::warn;

/// Default token lifetime in seconds
const DEFAULT_TOKEN_LIFETIME: u64 = 20000;

/// Errors raised by the JWT service
#[derive(Error, Debug, PartialEq)]
pub enum TokenError {
    /// The token was well formed and signed but is past its expiry
    #[error("Token expired")]
    Expired,

    /// Bad signature, bad encoding, missing claims...
    #[error("Invalid token: {0}")]
    Invalid(String),

    /// Signing failed
    #[error("Failed to issue token: {0}")]
    Issue(String),

    /// Missing or unusable configuration
    #[error("JWT configuration error: {0}")]
    Configuration(String),
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub token_lifetime: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Signing secret (required)
    /// - `TOKEN_LIFETIME`: Token lifetime in seconds (default: 20000)
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                TokenError::Configuration("JWT_SECRET environment variable not set".to_string())
            })?;

        let token_lifetime = std::env::var("TOKEN_LIFETIME")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);

        Ok(JwtConfig {
            secret,
            token_lifetime,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User ID
    pub sub: i32,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: i32) -> Result<String, TokenError> {
        let now = now_secs()?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now.saturating_add(self.config.token_lifetime),
        };

        self.encode_claims(&claims)
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Validate a token and return the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(e) if matches!(e.kind(), ErrorKind::ExpiredSignature) => Err(TokenError::Expired),
            Err(e) => {
                warn!("Rejected token: {}", e);
                Err(TokenError::Invalid(e.to_string()))
            }
        }
    }

    /// Get the token lifetime in seconds
    pub fn token_lifetime(&self) -> u64 {
        self.config.token_lifetime
    }
}

fn now_secs() -> Result<u64, TokenError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TokenError::Issue(format!("Failed to get current time: {}", e)))?
        .as_secs())
}

#[cfg(test)]
pub(crate) fn test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret".to_string(),
        token_lifetime: 3600,
    })
}

#[cfg(test)]
pub(crate) fn expired_token(service: &JwtService, user_id: i32) -> String {
    let now = now_secs().unwrap();
    service
        .encode_claims(&Claims {
            sub: user_id,
            iat: now - 7200,
            exp: now - 3600,
        })
        .unwrap()
}
