//! Package catalog handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{ready, AdminUser, OptionalUser};
use crate::admin::PackageForm;
use crate::error::ApiResult;
use crate::models::{ApiResponse, TourPackage};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// GET /api/packages - Public package listing
pub async fn list_packages(
    State(state): State<AppState>,
    user: OptionalUser,
) -> ApiResult<Json<ApiResponse<Vec<TourPackage>>>> {
    let packages = ready(state.catalog.list(&user.principal()).await?)?;
    Ok(Json(ApiResponse::ok(packages)))
}

/// POST /api/admin/packages - Create a package with a caller-chosen id
pub async fn create_package(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(form): Json<PackageForm>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TourPackage>>)> {
    let package = state.catalog.create(admin.principal(), form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(package))))
}

/// PUT /api/admin/packages/:id - Replace all mutable fields; the id comes from the path
pub async fn update_package(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(form): Json<PackageForm>,
) -> ApiResult<Json<ApiResponse<TourPackage>>> {
    let package = state.catalog.update(admin.principal(), &id, form).await?;
    Ok(Json(ApiResponse::ok(package)))
}

/// DELETE /api/admin/packages/:id?confirm=true - Irreversible, refused unless confirmed
pub async fn delete_package(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<StatusCode> {
    state
        .catalog
        .delete(admin.principal(), &id, query.confirm)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
