//! Inquiry submission routes

use axum::{middleware::from_fn_with_state, routing::post, Router};

use crate::handlers::{
    submit_car_rental, submit_custom_package, submit_flight_booking, submit_hotel_booking,
    submit_railway_booking, submit_tour_inquiry,
};
use crate::middleware::limit_submissions;
use crate::state::AppState;

/// Public submission endpoints, throttled per client
pub fn inquiry_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/inquiries/tour", post(submit_tour_inquiry))
        .route("/api/inquiries/car-rental", post(submit_car_rental))
        .route("/api/inquiries/custom-package", post(submit_custom_package))
        .route("/api/inquiries/railway", post(submit_railway_booking))
        .route("/api/inquiries/flight", post(submit_flight_booking))
        .route("/api/inquiries/hotel", post(submit_hotel_booking))
        .route_layer(from_fn_with_state(
            state.submission_limiter.clone(),
            limit_submissions,
        ))
}
