//! Package catalog routes

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{create_package, delete_package, list_packages, update_package};
use crate::state::AppState;

pub fn package_routes() -> Router<AppState> {
    Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/admin/packages", post(create_package))
        .route(
            "/api/admin/packages/:id",
            put(update_package).delete(delete_package),
        )
}
