//! Stateless bearer tokens (JWT).
//!
//! A token carries the subject (the user's email), `iat` and `exp`, signed with
//! a secret fixed at startup. Validity depends only on signature and expiry;
//! nothing is stored server-side, so tokens cannot be revoked before `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, undecodable, or expired.
    #[error("invalid token")]
    InvalidToken,

    #[error("token has no subject")]
    MissingSubject,
}

/// JWT payload. `sub` is optional on the way in so a token without one can be
/// told apart from a malformed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenIssuer {
    /// `algorithm` must be an HMAC algorithm; see `config::parse_hmac_algorithm`.
    pub fn new(secret: &str, algorithm: Algorithm, default_ttl: Duration) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            default_ttl,
        }
    }

    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(subject.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT encoding failed: {e}")))
    }

    pub fn issue_default(&self, subject: &str) -> Result<String, AppError> {
        self.issue(subject, self.default_ttl)
    }

    /// Returns the token's subject.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::InvalidToken)?;

        data.claims.sub.ok_or(TokenError::MissingSubject)
    }
}
