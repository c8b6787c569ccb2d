//! Inquiry submission handlers
//!
//! Each request runs one [`SubmissionFlow`]: local validation first, then a
//! single gateway write.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::OptionalUser;
use crate::error::ApiResult;
use crate::inquiry::{
    CarRentalForm, CustomPackageForm, FlightBookingForm, HotelBookingForm, InquiryForm,
    RailwayBookingForm, SubmissionFlow, TourInquiryForm,
};
use crate::models::{ApiResponse, InquiryCategory};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub category: InquiryCategory,
    pub message: &'static str,
}

type SubmissionResponse = ApiResult<(StatusCode, Json<ApiResponse<SubmissionReceipt>>)>;

async fn submit<F: InquiryForm>(
    state: &AppState,
    user: &OptionalUser,
    form: F,
) -> SubmissionResponse {
    let caller = user.principal();
    let mut flow = SubmissionFlow::new(form);
    flow.submit(&state.data, &caller).await?;

    let category = F::CATEGORY;
    tracing::info!(category = %category, caller = %caller, "Inquiry submitted");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SubmissionReceipt {
            category,
            message: "Thank you! We will get back to you shortly.",
        })),
    ))
}

/// POST /api/inquiries/tour
pub async fn submit_tour_inquiry(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<TourInquiryForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}

/// POST /api/inquiries/car-rental
pub async fn submit_car_rental(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<CarRentalForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}

/// POST /api/inquiries/custom-package
pub async fn submit_custom_package(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<CustomPackageForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}

/// POST /api/inquiries/railway
pub async fn submit_railway_booking(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<RailwayBookingForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}

/// POST /api/inquiries/flight
pub async fn submit_flight_booking(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<FlightBookingForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}

/// POST /api/inquiries/hotel
pub async fn submit_hotel_booking(
    State(state): State<AppState>,
    user: OptionalUser,
    Json(form): Json<HotelBookingForm>,
) -> SubmissionResponse {
    submit(&state, &user, form).await
}
