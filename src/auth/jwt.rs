//! Identity token issuing and verification
//!
//! Tokens are HS256 JWTs whose subject is the caller's principal text.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Principal;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Could not sign identity token: {0}")]
    EncodingFailed(String),

    #[error("Identity token rejected: {0}")]
    DecodingFailed(String),

    #[error("Identity token has expired")]
    TokenExpired,

    #[error("Identity token subject is unusable: {0}")]
    InvalidToken(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal text
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn principal(&self) -> Result<Principal, JwtError> {
        let principal = Principal::new(self.sub.trim());
        if self.sub.trim().is_empty() || principal.is_anonymous() {
            return Err(JwtError::InvalidToken(format!("'{}'", self.sub)));
        }
        Ok(principal)
    }
}

/// Sign a token for `principal`, valid for `ttl_seconds`
pub fn issue_token(principal: &Principal, secret: &str, ttl_seconds: i64) -> Result<String, JwtError> {
    let now = Utc::now();
    let claims = Claims {
        sub: principal.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Check the signature and expiry of `token` and return its claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::DecodingFailed(e.to_string()),
        })
}
