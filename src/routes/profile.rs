//! Caller profile routes

use axum::{routing::get, Router};

use crate::handlers::{get_profile, get_role, save_profile};
use crate::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profile", get(get_profile).put(save_profile))
        .route("/api/me/role", get(get_role))
}
