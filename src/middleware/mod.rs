//! HTTP middleware: identity extractors, request tracing, security headers
//! and submission throttling

pub mod auth;
mod rate_limit;
mod security;
mod tracing;

pub use auth::{AdminUser, AuthenticatedUser, OptionalUser};
pub use rate_limit::{limit_submissions, RateLimiter};
pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
