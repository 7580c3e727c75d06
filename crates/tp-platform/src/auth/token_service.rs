//! Token Service
//!
//! Signed, stateless bearer tokens (HS256 JWT). The token is the only
//! credential a request carries; no server-side session or revocation list
//! exists. Claims embed enough identity (id, email, role) to resolve the
//! principal without a store lookup.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::error::{MarketError, Result};
use crate::user::entity::{Role, User};

/// Claims embedded in an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user id)
    pub sub: String,

    /// Email at issuance time
    pub email: String,

    /// Display name at issuance time
    pub name: String,

    /// Role at issuance time; trusted directly until expiry
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token parse failures, in check order: structure, signature, expiry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,
}

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC signing secret, process-wide, lives as long as the service
    pub secret_key: String,

    /// Token issuer
    pub issuer: String,

    /// Token expiry horizon in seconds
    pub token_expiry_secs: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            issuer: "tradepost".to_string(),
            token_expiry_secs: 86400, // 24 hours
        }
    }
}

/// Issues and parses signed access tokens.
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_expiry_secs);

        let claims = AccessTokenClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.full_name.clone(),
            role: user.role,
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| MarketError::internal(format!("Failed to encode token: {}", e)))
    }

    /// Parse and validate a token, returning its claims.
    ///
    /// The signature is verified before any claim is trusted. Expiry is
    /// inclusive: a token whose expiry is at or before now fails with
    /// `Expired`. The library's own exp check is disabled because it admits
    /// a token at the expiry instant; the boundary is enforced here instead.
    pub fn parse(&self, token: &str) -> std::result::Result<AccessTokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_aud = false;
        validation.validate_exp = false;

        let claims = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

/// Extract bearer token from an Authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}
