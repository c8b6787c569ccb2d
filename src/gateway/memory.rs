//! In-process gateway used for local development and tests
//!
//! It applies the same rules the remote actor enforces: package ids are
//! unique, catalog and inquiry administration is restricted to admins, and
//! inquiry ids are assigned sequentially on submission.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Gateway, GatewayError, GatewayResult};
use crate::inquiry::estimate_fare;
use crate::models::{
    CarRentalRequest, ContactDetails, CustomPackageDetails, CustomerInquiry,
    FlightBookingDetails, HotelBookingDetails, InquiryCategory, InquiryDetails, InquiryStatus,
    Nat, Principal, RailwayBookingDetails, RentalDetails, TourPackage, UserProfile, UserRole,
};

#[derive(Default)]
struct MemoryState {
    packages: BTreeMap<String, TourPackage>,
    inquiries: Vec<CustomerInquiry>,
    next_inquiry_id: u128,
    profiles: HashMap<Principal, UserProfile>,
    roles: HashMap<Principal, UserRole>,
}

impl MemoryState {
    fn role_of(&self, principal: &Principal) -> UserRole {
        if let Some(role) = self.roles.get(principal) {
            return *role;
        }
        if principal.is_anonymous() {
            UserRole::Guest
        } else {
            UserRole::User
        }
    }

    fn require_admin(&self, caller: &Principal, action: &str) -> GatewayResult<()> {
        if self.role_of(caller) == UserRole::Admin {
            Ok(())
        } else {
            Err(GatewayError::Rejected(format!(
                "Unauthorized: Only admins can {}",
                action
            )))
        }
    }

    fn record_inquiry(&mut self, contact: &ContactDetails, message: String, details: InquiryDetails) {
        self.next_inquiry_id += 1;
        let id = Nat::new(self.next_inquiry_id);
        self.inquiries.push(CustomerInquiry {
            id,
            contact: contact.clone(),
            message,
            status: InquiryStatus::New,
            details,
        });
    }
}

/// Gateway backed by process memory
#[derive(Default)]
pub struct InMemoryGateway {
    state: RwLock<MemoryState>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway in which `admin` already holds the admin role
    pub fn with_admin(admin: Principal) -> Self {
        let mut state = MemoryState::default();
        state.roles.insert(admin, UserRole::Admin);
        Self {
            state: RwLock::new(state),
        }
    }

    /// Insert an inquiry record exactly as given, bypassing submission rules
    pub async fn insert_inquiry(&self, inquiry: CustomerInquiry) {
        let mut state = self.state.write().await;
        state.next_inquiry_id = state.next_inquiry_id.max(inquiry.id.get());
        state.inquiries.push(inquiry);
    }
}

#[async_trait]
impl Gateway for InMemoryGateway {
    async fn get_public_packages(&self, _caller: &Principal) -> GatewayResult<Vec<TourPackage>> {
        Ok(self.state.read().await.packages.values().cloned().collect())
    }

    async fn create_package(
        &self,
        caller: &Principal,
        id: &str,
        title: &str,
        description: &str,
        price: Nat,
        duration: Nat,
    ) -> GatewayResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(caller, "create packages")?;
        if state.packages.contains_key(id) {
            return Err(GatewayError::Rejected(format!(
                "Package with id '{}' already exists",
                id
            )));
        }
        state.packages.insert(
            id.to_string(),
            TourPackage {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                price,
                duration,
            },
        );
        Ok(())
    }

    async fn update_package(
        &self,
        caller: &Principal,
        id: &str,
        package: &TourPackage,
    ) -> GatewayResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(caller, "update packages")?;
        if package.id != id {
            return Err(GatewayError::Rejected(
                "Package id cannot be changed".to_string(),
            ));
        }
        match state.packages.get_mut(id) {
            Some(existing) => {
                *existing = package.clone();
                Ok(())
            }
            None => Err(GatewayError::Rejected(format!("Package '{}' not found", id))),
        }
    }

    async fn delete_package(&self, caller: &Principal, id: &str) -> GatewayResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(caller, "delete packages")?;
        state
            .packages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| GatewayError::Rejected(format!("Package '{}' not found", id)))
    }

    async fn submit_tour_inquiry(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        message: &str,
    ) -> GatewayResult<()> {
        self.state.write().await.record_inquiry(
            contact,
            message.to_string(),
            InquiryDetails::TourInquiry,
        );
        Ok(())
    }

    async fn submit_car_rental(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        request: &CarRentalRequest,
    ) -> GatewayResult<()> {
        let details = RentalDetails {
            vehicle_type: request.vehicle_type,
            driver_required: request.driver_required,
            pricing_mode: request.pricing_mode,
            estimated_distance: request.estimated_distance,
            estimated_days: request.estimated_days,
            estimated_fare: estimate_fare(request),
        };
        self.state.write().await.record_inquiry(
            contact,
            InquiryCategory::CarRental.placeholder_message().to_string(),
            InquiryDetails::CarRental(details),
        );
        Ok(())
    }

    async fn submit_custom_package(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        details: &CustomPackageDetails,
    ) -> GatewayResult<()> {
        self.state.write().await.record_inquiry(
            contact,
            InquiryCategory::CustomPackage.placeholder_message().to_string(),
            InquiryDetails::CustomPackage(details.clone()),
        );
        Ok(())
    }

    async fn submit_railway_booking(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        details: &RailwayBookingDetails,
    ) -> GatewayResult<()> {
        self.state.write().await.record_inquiry(
            contact,
            InquiryCategory::RailwayBooking.placeholder_message().to_string(),
            InquiryDetails::RailwayBooking(details.clone()),
        );
        Ok(())
    }

    async fn submit_flight_booking(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        details: &FlightBookingDetails,
    ) -> GatewayResult<()> {
        self.state.write().await.record_inquiry(
            contact,
            InquiryCategory::FlightBooking.placeholder_message().to_string(),
            InquiryDetails::FlightBooking(details.clone()),
        );
        Ok(())
    }

    async fn submit_hotel_booking(
        &self,
        _caller: &Principal,
        contact: &ContactDetails,
        details: &HotelBookingDetails,
    ) -> GatewayResult<()> {
        self.state.write().await.record_inquiry(
            contact,
            InquiryCategory::HotelBooking.placeholder_message().to_string(),
            InquiryDetails::HotelBooking(details.clone()),
        );
        Ok(())
    }

    async fn get_all_inquiries(&self, caller: &Principal) -> GatewayResult<Vec<CustomerInquiry>> {
        let state = self.state.read().await;
        state.require_admin(caller, "view inquiries")?;
        Ok(state.inquiries.clone())
    }

    async fn update_inquiry_status(
        &self,
        caller: &Principal,
        id: Nat,
        status: InquiryStatus,
    ) -> GatewayResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(caller, "update inquiries")?;
        let inquiry = state
            .inquiries
            .iter_mut()
            .find(|inquiry| inquiry.id == id)
            .ok_or_else(|| GatewayError::Rejected(format!("Inquiry {} not found", id)))?;
        inquiry.status = status;
        Ok(())
    }

    async fn get_caller_user_profile(
        &self,
        caller: &Principal,
    ) -> GatewayResult<Option<UserProfile>> {
        Ok(self.state.read().await.profiles.get(caller).cloned())
    }

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> GatewayResult<()> {
        if caller.is_anonymous() {
            return Err(GatewayError::Rejected(
                "Unauthorized: Only users can save profiles".to_string(),
            ));
        }
        self.state
            .write()
            .await
            .profiles
            .insert(caller.clone(), profile.clone());
        Ok(())
    }

    async fn is_caller_admin(&self, caller: &Principal) -> GatewayResult<bool> {
        Ok(self.state.read().await.role_of(caller) == UserRole::Admin)
    }

    async fn get_caller_user_role(&self, caller: &Principal) -> GatewayResult<UserRole> {
        Ok(self.state.read().await.role_of(caller))
    }

    async fn assign_caller_user_role(
        &self,
        caller: &Principal,
        user: &Principal,
        role: UserRole,
    ) -> GatewayResult<()> {
        let mut state = self.state.write().await;
        state.require_admin(caller, "assign user roles")?;
        state.roles.insert(user.clone(), role);
        Ok(())
    }
}
