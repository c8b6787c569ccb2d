//! Identity extractors
//!
//! Verify the bearer token from the identity provider and resolve the
//! calling principal.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::{IdentityVerifier, JwtError};
use crate::error::{ApiError, ErrorDetails, ErrorResponse};
use crate::models::Principal;
use crate::profile::ProfileService;
use crate::queries::QueryState;

/// Caller identified by a valid identity token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub principal: Principal,
}

/// Identity rejections use the same body shape as [`ApiError`] with their
/// own codes, so clients can tell a missing token from an expired one.
fn reject(status: StatusCode, code: &'static str, message: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorDetails {
            code,
            message: message.to_string(),
            details: None,
        },
    };
    (status, Json(body)).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<IdentityVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    reject(
                        StatusCode::UNAUTHORIZED,
                        "MISSING_TOKEN",
                        "Sign in to continue",
                    )
                })?;

        let verifier = Arc::<IdentityVerifier>::from_ref(state);

        let principal = verifier.verify(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "Identity token rejected");
            let (code, message) = match e {
                JwtError::TokenExpired => ("TOKEN_EXPIRED", "Your session has expired"),
                _ => ("INVALID_TOKEN", "Your sign-in could not be verified"),
            };
            reject(StatusCode::UNAUTHORIZED, code, message)
        })?;

        Ok(AuthenticatedUser { principal })
    }
}

/// Caller that may be anonymous. A missing or unusable token resolves to the
/// anonymous principal.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    pub fn principal(&self) -> Principal {
        self.0
            .as_ref()
            .map(|user| user.principal.clone())
            .unwrap_or_else(Principal::anonymous)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    Arc<IdentityVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(
            AuthenticatedUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Authenticated caller the gateway reports as an admin
pub struct AdminUser(pub AuthenticatedUser);

impl AdminUser {
    pub fn principal(&self) -> &Principal {
        &self.0.principal
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Arc<IdentityVerifier>: FromRef<S>,
    ProfileService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        let profiles = ProfileService::from_ref(state);
        let is_admin = match profiles.is_admin(&user.principal).await {
            Ok(QueryState::Ready(is_admin)) => is_admin,
            Ok(QueryState::Disabled) => return Err(ApiError::ServiceUnavailable.into_response()),
            Err(e) => return Err(ApiError::from(e).into_response()),
        };

        if !is_admin {
            tracing::warn!(caller = %user.principal, "Admin route refused");
            return Err(reject(
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Admin access required",
            ));
        }

        Ok(AdminUser(user))
    }
}
