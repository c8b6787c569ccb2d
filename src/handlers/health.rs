//! Health check

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gateway: &'static str,
    pub version: &'static str,
}

/// GET /health - Ready once the gateway handle has resolved
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let resolved = state.data.gateway().is_resolved().await;
    let (status, code) = if resolved {
        ("healthy", StatusCode::OK)
    } else {
        ("starting", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            gateway: if resolved { "resolved" } else { "pending" },
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
