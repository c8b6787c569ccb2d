//! Caller identity
//!
//! The identity provider is external; this service only verifies the tokens
//! it issues and turns them into a [`Principal`].

mod jwt;

pub use jwt::{issue_token, verify_token, Claims, JwtError};

use crate::models::Principal;

/// Verifies identity tokens with the shared secret
#[derive(Clone)]
pub struct IdentityVerifier {
    secret: String,
}

impl IdentityVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Principal, JwtError> {
        verify_token(token, &self.secret)?.principal()
    }

    /// Issue a token for `principal`, for tooling and tests
    pub fn issue(&self, principal: &Principal, ttl_seconds: i64) -> Result<String, JwtError> {
        issue_token(principal, &self.secret, ttl_seconds)
    }
}
