//! Caller profile handlers

use axum::{extract::State, Json};

use super::{ready, AuthenticatedUser};
use crate::error::ApiResult;
use crate::models::{ApiResponse, UserProfile};
use crate::profile::{ProfileForm, ProfileView, RoleView};
use crate::state::AppState;

/// GET /api/profile - Profile plus whether the setup dialog should be shown
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<ProfileView>>> {
    let view = state.profiles.profile(&user.principal).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/profile
pub async fn save_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(form): Json<ProfileForm>,
) -> ApiResult<Json<ApiResponse<UserProfile>>> {
    let profile = state.profiles.save(&user.principal, form).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /api/me/role
pub async fn get_role(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<RoleView>>> {
    let role = ready(state.profiles.role(&user.principal).await?)?;
    Ok(Json(ApiResponse::ok(role)))
}
