//! Gateway writes and the query keys each one invalidates

use async_trait::async_trait;

use super::QueryKey;
use crate::gateway::{Gateway, GatewayResult};
use crate::models::{InquirySubmission, InquiryStatus, Nat, Principal, TourPackage, UserProfile, UserRole};

/// A write against the gateway. Its invalidation list is declared beside its
/// execution so reads and writes cannot drift apart.
#[async_trait]
pub trait Mutation: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Keys whose cached values are stale once this mutation succeeds
    fn invalidates(&self, caller: &Principal) -> Vec<QueryKey>;

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()>;
}

#[derive(Debug, Clone)]
pub struct CreatePackage {
    pub package: TourPackage,
}

#[async_trait]
impl Mutation for CreatePackage {
    fn name(&self) -> &'static str {
        "createPackage"
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::PublicPackages]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        let package = &self.package;
        gateway
            .create_package(
                caller,
                &package.id,
                &package.title,
                &package.description,
                package.price,
                package.duration,
            )
            .await
    }
}

/// Replace every mutable field of the package with `package.id`
#[derive(Debug, Clone)]
pub struct UpdatePackage {
    pub package: TourPackage,
}

#[async_trait]
impl Mutation for UpdatePackage {
    fn name(&self) -> &'static str {
        "updatePackage"
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::PublicPackages]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        gateway
            .update_package(caller, &self.package.id, &self.package)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct DeletePackage {
    pub id: String,
}

#[async_trait]
impl Mutation for DeletePackage {
    fn name(&self) -> &'static str {
        "deletePackage"
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::PublicPackages]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        gateway.delete_package(caller, &self.id).await
    }
}

/// Submit an inquiry of any category
#[derive(Debug, Clone)]
pub struct SubmitInquiry {
    pub submission: InquirySubmission,
}

#[async_trait]
impl Mutation for SubmitInquiry {
    fn name(&self) -> &'static str {
        match &self.submission {
            InquirySubmission::Tour { .. } => "submitTourInquiry",
            InquirySubmission::CarRental { .. } => "submitCarRental",
            InquirySubmission::CustomPackage { .. } => "submitCustomPackage",
            InquirySubmission::RailwayBooking { .. } => "submitRailwayBooking",
            InquirySubmission::FlightBooking { .. } => "submitFlightBooking",
            InquirySubmission::HotelBooking { .. } => "submitHotelBooking",
        }
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::AllInquiries]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        match &self.submission {
            InquirySubmission::Tour { contact, message } => {
                gateway.submit_tour_inquiry(caller, contact, message).await
            }
            InquirySubmission::CarRental { contact, request } => {
                gateway.submit_car_rental(caller, contact, request).await
            }
            InquirySubmission::CustomPackage { contact, details } => {
                gateway.submit_custom_package(caller, contact, details).await
            }
            InquirySubmission::RailwayBooking { contact, details } => {
                gateway.submit_railway_booking(caller, contact, details).await
            }
            InquirySubmission::FlightBooking { contact, details } => {
                gateway.submit_flight_booking(caller, contact, details).await
            }
            InquirySubmission::HotelBooking { contact, details } => {
                gateway.submit_hotel_booking(caller, contact, details).await
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateInquiryStatus {
    pub id: Nat,
    pub status: InquiryStatus,
}

#[async_trait]
impl Mutation for UpdateInquiryStatus {
    fn name(&self) -> &'static str {
        "updateInquiryStatus"
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::AllInquiries]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        gateway
            .update_inquiry_status(caller, self.id, self.status)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct SaveProfile {
    pub profile: UserProfile,
}

#[async_trait]
impl Mutation for SaveProfile {
    fn name(&self) -> &'static str {
        "saveCallerUserProfile"
    }

    fn invalidates(&self, caller: &Principal) -> Vec<QueryKey> {
        vec![QueryKey::CallerProfile(caller.clone())]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        gateway.save_caller_user_profile(caller, &self.profile).await
    }
}

#[derive(Debug, Clone)]
pub struct AssignRole {
    pub user: Principal,
    pub role: UserRole,
}

#[async_trait]
impl Mutation for AssignRole {
    fn name(&self) -> &'static str {
        "assignCallerUserRole"
    }

    fn invalidates(&self, _caller: &Principal) -> Vec<QueryKey> {
        vec![
            QueryKey::CallerRole(self.user.clone()),
            QueryKey::CallerIsAdmin(self.user.clone()),
        ]
    }

    async fn execute(&self, gateway: &dyn Gateway, caller: &Principal) -> GatewayResult<()> {
        gateway
            .assign_caller_user_role(caller, &self.user, self.role)
            .await
    }
}
