//! Admin review and role routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{assign_role, get_inquiry, list_inquiries, update_inquiry_status};
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/inquiries", get(list_inquiries))
        .route("/api/admin/inquiries/:id", get(get_inquiry))
        .route("/api/admin/inquiries/:id/status", put(update_inquiry_status))
        .route("/api/admin/roles", post(assign_role))
}
