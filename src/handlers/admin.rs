//! Admin inquiry review and role handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{ready, AdminUser};
use crate::admin::{detail_panel, CategoryFilter, DetailPanel, StatusSummary};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    ApiResponse, CustomerInquiry, InquiryStatus, Nat, Principal, UserRole,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InquiryListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryListing {
    pub inquiries: Vec<CustomerInquiry>,
    pub summary: StatusSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryView {
    pub inquiry: CustomerInquiry,
    pub category_label: &'static str,
    pub panel: Option<DetailPanel>,
}

impl From<CustomerInquiry> for InquiryView {
    fn from(inquiry: CustomerInquiry) -> Self {
        Self {
            category_label: inquiry.category().label(),
            panel: detail_panel(&inquiry),
            inquiry,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: InquiryStatus,
}

#[derive(Debug, Deserialize)]
pub struct RoleAssignment {
    pub user: Principal,
    pub role: UserRole,
}

fn parse_id(id: &str) -> ApiResult<Nat> {
    Nat::parse(id).map_err(|e| ApiError::BadRequest(format!("Invalid inquiry id: {}", e)))
}

/// GET /api/admin/inquiries?category= - Listing filtered by category
pub async fn list_inquiries(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<InquiryListQuery>,
) -> ApiResult<Json<ApiResponse<InquiryListing>>> {
    let filter = match query.category.as_deref() {
        Some(text) => text.parse::<CategoryFilter>().map_err(ApiError::BadRequest)?,
        None => CategoryFilter::All,
    };

    let inquiries = ready(state.review.list(admin.principal(), filter).await?)?;
    let summary = StatusSummary::of(&inquiries);
    Ok(Json(ApiResponse::ok(InquiryListing { inquiries, summary })))
}

/// GET /api/admin/inquiries/:id - One inquiry with its detail panel
pub async fn get_inquiry(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<InquiryView>>> {
    let id = parse_id(&id)?;
    let inquiry = ready(state.review.find(admin.principal(), id).await?)?
        .ok_or_else(|| ApiError::NotFound(format!("Inquiry {} not found", id)))?;
    Ok(Json(ApiResponse::ok(inquiry.into())))
}

/// PUT /api/admin/inquiries/:id/status - Returns the entry as re-read from the gateway
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> ApiResult<Json<ApiResponse<InquiryView>>> {
    let id = parse_id(&id)?;
    let inquiry = state
        .review
        .set_status(admin.principal(), id, update.status)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Inquiry {} not found", id)))?;
    Ok(Json(ApiResponse::ok(inquiry.into())))
}

/// POST /api/admin/roles - Assign a role to another principal
pub async fn assign_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(assignment): Json<RoleAssignment>,
) -> ApiResult<StatusCode> {
    state
        .profiles
        .assign_role(admin.principal(), assignment.user, assignment.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
