//! Remote gateway port
//!
//! The gateway is the remote actor that owns packages, inquiries, profiles
//! and roles. Everything in this crate talks to it through the [`Gateway`]
//! trait, reached via a [`GatewaySlot`] that is resolved asynchronously at
//! startup and may still be empty when the first requests arrive.

mod memory;
mod rpc;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{
    CarRentalRequest, ContactDetails, CustomPackageDetails, CustomerInquiry,
    FlightBookingDetails, HotelBookingDetails, InquiryStatus, Nat, Principal,
    RailwayBookingDetails, TourPackage, UserProfile, UserRole,
};

pub use memory::InMemoryGateway;
pub use rpc::RpcGateway;

/// Gateway failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The handle has not resolved yet; nothing was sent
    #[error("Actor not available")]
    Unavailable,

    /// The gateway completed the call with a failure
    #[error("Gateway rejected the call: {0}")]
    Rejected(String),

    #[error("Gateway transport error: {0}")]
    Transport(String),

    #[error("Gateway returned an unreadable response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Operations exposed by the remote actor. Every call is made on behalf of
/// `caller`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn get_public_packages(&self, caller: &Principal) -> GatewayResult<Vec<TourPackage>>;

    async fn create_package(
        &self,
        caller: &Principal,
        id: &str,
        title: &str,
        description: &str,
        price: Nat,
        duration: Nat,
    ) -> GatewayResult<()>;

    async fn update_package(
        &self,
        caller: &Principal,
        id: &str,
        package: &TourPackage,
    ) -> GatewayResult<()>;

    async fn delete_package(&self, caller: &Principal, id: &str) -> GatewayResult<()>;

    async fn submit_tour_inquiry(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        message: &str,
    ) -> GatewayResult<()>;

    async fn submit_car_rental(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        request: &CarRentalRequest,
    ) -> GatewayResult<()>;

    async fn submit_custom_package(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &CustomPackageDetails,
    ) -> GatewayResult<()>;

    async fn submit_railway_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &RailwayBookingDetails,
    ) -> GatewayResult<()>;

    async fn submit_flight_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &FlightBookingDetails,
    ) -> GatewayResult<()>;

    async fn submit_hotel_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &HotelBookingDetails,
    ) -> GatewayResult<()>;

    async fn get_all_inquiries(&self, caller: &Principal) -> GatewayResult<Vec<CustomerInquiry>>;

    async fn update_inquiry_status(
        &self,
        caller: &Principal,
        id: Nat,
        status: InquiryStatus,
    ) -> GatewayResult<()>;

    async fn get_caller_user_profile(&self, caller: &Principal)
        -> GatewayResult<Option<UserProfile>>;

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> GatewayResult<()>;

    async fn is_caller_admin(&self, caller: &Principal) -> GatewayResult<bool>;

    async fn get_caller_user_role(&self, caller: &Principal) -> GatewayResult<UserRole>;

    async fn assign_caller_user_role(
        &self,
        caller: &Principal,
        user: &Principal,
        role: UserRole,
    ) -> GatewayResult<()>;
}

/// Shared, lazily resolved gateway handle
#[derive(Clone, Default)]
pub struct GatewaySlot {
    inner: Arc<RwLock<Option<Arc<dyn Gateway>>>>,
}

impl GatewaySlot {
    /// Slot that resolves later through [`GatewaySlot::resolve`]
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn resolved(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(gateway))),
        }
    }

    pub async fn resolve(&self, gateway: Arc<dyn Gateway>) {
        *self.inner.write().await = Some(gateway);
        tracing::info!("Gateway handle resolved");
    }

    pub async fn current(&self) -> Option<Arc<dyn Gateway>> {
        self.inner.read().await.clone()
    }

    pub async fn is_resolved(&self) -> bool {
        self.inner.read().await.is_some()
    }
}
