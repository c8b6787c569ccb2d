//! Data models for the travel desk

use serde::{Deserialize, Serialize};

pub mod inquiry;
pub mod nat;
pub mod package;
pub mod profile;

pub use inquiry::*;
pub use nat::{Nat, ParseNatError};
pub use package::TourPackage;
pub use profile::{Principal, UserProfile, UserRole, ANONYMOUS_PRINCIPAL};

/// API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
