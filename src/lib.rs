//! Travel desk backend
//!
//! Customer inquiry intake and the admin back-office for a travel agency,
//! served over HTTP in front of a remote gateway actor that owns packages,
//! inquiries, profiles and roles.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod inquiry;
pub mod middleware;
pub mod models;
pub mod profile;
pub mod queries;
pub mod routes;
pub mod state;
pub mod validation;

use axum::{routing::get, Router};
use tower::ServiceBuilder;

use crate::state::AppState;

/// Build the application router with request tracing and security headers.
/// CORS and HSTS depend on deployment and are layered by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(routes::package_routes())
        .merge(routes::inquiry_routes(&state))
        .merge(routes::admin_routes())
        .merge(routes::profile_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_tracing))
                .layer(axum::middleware::from_fn(middleware::security_headers)),
        )
}
