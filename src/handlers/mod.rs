//! HTTP handlers

pub mod admin;
pub mod health;
pub mod inquiries;
pub mod packages;
pub mod profile;

pub use admin::{assign_role, get_inquiry, list_inquiries, update_inquiry_status};
pub use health::health_check;
pub use inquiries::{
    submit_car_rental, submit_custom_package, submit_flight_booking, submit_hotel_booking,
    submit_railway_booking, submit_tour_inquiry,
};
pub use packages::{create_package, delete_package, list_packages, update_package};
pub use profile::{get_profile, get_role, save_profile};

pub use crate::middleware::auth::{AdminUser, AuthenticatedUser, OptionalUser};

use crate::error::{ApiError, ApiResult};
use crate::gateway::GatewayError;
use crate::queries::QueryState;

/// A read that found the gateway unresolved is reported as unavailable
fn ready<T>(state: QueryState<T>) -> ApiResult<T> {
    state
        .ready()
        .ok_or_else(|| ApiError::from(GatewayError::Unavailable))
}
