//! Shared fixtures: a gateway that records every call before delegating to
//! the in-memory gateway.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use travel_desk::gateway::{Gateway, GatewayError, GatewayResult, GatewaySlot, InMemoryGateway};
use travel_desk::models::{
    CarRentalRequest, ContactDetails, CustomPackageDetails, CustomerInquiry,
    FlightBookingDetails, HotelBookingDetails, InquiryStatus, Nat, Principal,
    RailwayBookingDetails, TourPackage, UserProfile, UserRole,
};
use travel_desk::queries::DataAccess;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    GetPublicPackages,
    CreatePackage {
        id: String,
        title: String,
        description: String,
        price: Nat,
        duration: Nat,
    },
    UpdatePackage {
        id: String,
        package: TourPackage,
    },
    DeletePackage {
        id: String,
    },
    SubmitTourInquiry {
        name: String,
        phone: String,
        email: String,
        message: String,
    },
    SubmitCarRental(ContactDetails, CarRentalRequest),
    SubmitCustomPackage(ContactDetails, CustomPackageDetails),
    SubmitRailwayBooking(ContactDetails, RailwayBookingDetails),
    SubmitFlightBooking(ContactDetails, FlightBookingDetails),
    SubmitHotelBooking(ContactDetails, HotelBookingDetails),
    GetAllInquiries,
    UpdateInquiryStatus {
        id: Nat,
        status: InquiryStatus,
    },
    GetCallerUserProfile,
    SaveCallerUserProfile(UserProfile),
    IsCallerAdmin,
    GetCallerUserRole,
    AssignCallerUserRole {
        user: Principal,
        role: UserRole,
    },
}

impl GatewayCall {
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            GatewayCall::GetPublicPackages
                | GatewayCall::GetAllInquiries
                | GatewayCall::GetCallerUserProfile
                | GatewayCall::IsCallerAdmin
                | GatewayCall::GetCallerUserRole
        )
    }
}

pub struct RecordingGateway {
    inner: InMemoryGateway,
    calls: Mutex<Vec<GatewayCall>>,
    fail_writes: AtomicBool,
}

impl RecordingGateway {
    pub fn with_admin(admin: &Principal) -> Self {
        Self {
            inner: InMemoryGateway::with_admin(admin.clone()),
            calls: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &InMemoryGateway {
        &self.inner
    }

    /// Make every following write fail with a transport error
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<GatewayCall> {
        self.calls().into_iter().filter(GatewayCall::is_write).collect()
    }

    pub fn count(&self, matches: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: GatewayCall) -> GatewayResult<()> {
        let write = call.is_write();
        self.calls.lock().unwrap().push(call);
        if write && self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn get_public_packages(&self, caller: &Principal) -> GatewayResult<Vec<TourPackage>> {
        self.record(GatewayCall::GetPublicPackages)?;
        self.inner.get_public_packages(caller).await
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
        self.record(GatewayCall::CreatePackage {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            price,
            duration,
        })?;
        self.inner
            .create_package(caller, id, title, description, price, duration)
            .await
    }

    async fn update_package(
        &self,
        caller: &Principal,
        id: &str,
        package: &TourPackage,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::UpdatePackage {
            id: id.to_string(),
            package: package.clone(),
        })?;
        self.inner.update_package(caller, id, package).await
    }

    async fn delete_package(&self, caller: &Principal, id: &str) -> GatewayResult<()> {
        self.record(GatewayCall::DeletePackage { id: id.to_string() })?;
        self.inner.delete_package(caller, id).await
    }

    async fn submit_tour_inquiry(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        message: &str,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitTourInquiry {
            name: contact.name.clone(),
            phone: contact.phone_number.clone(),
            email: contact.email.clone(),
            message: message.to_string(),
        })?;
        self.inner.submit_tour_inquiry(caller, contact, message).await
    }

    async fn submit_car_rental(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        request: &CarRentalRequest,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitCarRental(contact.clone(), request.clone()))?;
        self.inner.submit_car_rental(caller, contact, request).await
    }

    async fn submit_custom_package(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &CustomPackageDetails,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitCustomPackage(contact.clone(), details.clone()))?;
        self.inner.submit_custom_package(caller, contact, details).await
    }

    async fn submit_railway_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &RailwayBookingDetails,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitRailwayBooking(contact.clone(), details.clone()))?;
        self.inner.submit_railway_booking(caller, contact, details).await
    }

    async fn submit_flight_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &FlightBookingDetails,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitFlightBooking(contact.clone(), details.clone()))?;
        self.inner.submit_flight_booking(caller, contact, details).await
    }

    async fn submit_hotel_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &HotelBookingDetails,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SubmitHotelBooking(contact.clone(), details.clone()))?;
        self.inner.submit_hotel_booking(caller, contact, details).await
    }

    async fn get_all_inquiries(&self, caller: &Principal) -> GatewayResult<Vec<CustomerInquiry>> {
        self.record(GatewayCall::GetAllInquiries)?;
        self.inner.get_all_inquiries(caller).await
    }

    async fn update_inquiry_status(
        &self,
        caller: &Principal,
        id: Nat,
        status: InquiryStatus,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::UpdateInquiryStatus { id, status })?;
        self.inner.update_inquiry_status(caller, id, status).await
    }

    async fn get_caller_user_profile(
        &self,
        caller: &Principal,
    ) -> GatewayResult<Option<UserProfile>> {
        self.record(GatewayCall::GetCallerUserProfile)?;
        self.inner.get_caller_user_profile(caller).await
    }

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::SaveCallerUserProfile(profile.clone()))?;
        self.inner.save_caller_user_profile(caller, profile).await
    }

    async fn is_caller_admin(&self, caller: &Principal) -> GatewayResult<bool> {
        self.record(GatewayCall::IsCallerAdmin)?;
        self.inner.is_caller_admin(caller).await
    }

    async fn get_caller_user_role(&self, caller: &Principal) -> GatewayResult<UserRole> {
        self.record(GatewayCall::GetCallerUserRole)?;
        self.inner.get_caller_user_role(caller).await
    }

    async fn assign_caller_user_role(
        &self,
        caller: &Principal,
        user: &Principal,
        role: UserRole,
    ) -> GatewayResult<()> {
        self.record(GatewayCall::AssignCallerUserRole {
            user: user.clone(),
            role,
        })?;
        self.inner.assign_caller_user_role(caller, user, role).await
    }
}

pub fn admin() -> Principal {
    Principal::new("admin-principal")
}

/// Data access over a fresh recording gateway in which [`admin`] is an admin
pub fn setup() -> (Arc<RecordingGateway>, DataAccess) {
    let gateway = Arc::new(RecordingGateway::with_admin(&admin()));
    let data = DataAccess::new(GatewaySlot::resolved(gateway.clone()));
    (gateway, data)
}
