//! Centralized API error handling
//!
//! Every layer error converts into [`ApiError`], which maps to an HTTP
//! status code and a JSON error body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::admin::PackageError;
use crate::gateway::GatewayError;
use crate::inquiry::{SubmissionError, RETRY_MESSAGE};
use crate::profile::ProfileError;

/// Shown for remote rejections outside the inquiry flow
const GENERIC_RETRY: &str = "The request could not be completed. Please try again.";

/// Errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    /// The gateway handle has not resolved, or was lost
    #[error("The service is starting up. Please try again shortly.")]
    ServiceUnavailable,

    #[error("Too many requests. Please try again in {retry_after_secs} seconds.")]
    RateLimited { retry_after_secs: u64 },

    /// Rejected by the gateway; the message is a user-facing retry prompt
    #[error("{0}")]
    GatewayRejected(String),

    #[error("Some fields need attention")]
    ValidationError(ValidationErrors),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: &'static str,
    pub message: String,
    /// Per-field validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ApiError::GatewayRejected(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_REJECTED"),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    pub fn error_code(&self) -> &'static str {
        self.parts().1
    }

    /// Map a gateway failure, logging the original error. `retry` is the
    /// message the caller sees for a rejection.
    fn from_gateway(err: GatewayError, retry: &str) -> Self {
        match err {
            GatewayError::Unavailable => ApiError::ServiceUnavailable,
            other => {
                tracing::warn!(error = %other, "Gateway call failed");
                ApiError::GatewayRejected(retry.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        if status.is_server_error() {
            tracing::error!(code, error = %self, "Responding with server error");
        } else {
            tracing::debug!(code, error = %self, "Responding with client error");
        }

        let details = match &self {
            ApiError::ValidationError(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message: self.to_string(),
                details,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        ApiError::from_gateway(err, GENERIC_RETRY)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::ValidationError(err)
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Invalid(errors) => ApiError::ValidationError(errors),
            SubmissionError::InFlight => ApiError::Conflict(err.to_string()),
            SubmissionError::Gateway(err) => ApiError::from_gateway(err, RETRY_MESSAGE),
        }
    }
}

impl From<PackageError> for ApiError {
    fn from(err: PackageError) -> Self {
        match err {
            PackageError::Invalid(errors) => ApiError::ValidationError(errors),
            PackageError::NotConfirmed(_) => ApiError::BadRequest(err.to_string()),
            PackageError::Gateway(err) => ApiError::from(err),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Invalid(errors) => ApiError::ValidationError(errors),
            ProfileError::Anonymous => ApiError::Unauthorized(err.to_string()),
            ProfileError::Gateway(err) => ApiError::from(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
