//! JSON-RPC adapter for the remote gateway

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{Gateway, GatewayError, GatewayResult};
use crate::models::{
    CarRentalRequest, ContactDetails, CustomPackageDetails, CustomerInquiry,
    FlightBookingDetails, HotelBookingDetails, InquiryStatus, Nat, Principal,
    RailwayBookingDetails, TourPackage, UserProfile, UserRole,
};

/// Gateway reached over HTTP with JSON-RPC 2.0 envelopes
pub struct RpcGateway {
    endpoint: String,
    client: Client,
    next_id: AtomicU64,
}

impl RpcGateway {
    /// Fails with [`GatewayError::Transport`] when the HTTP client cannot be
    /// built with the requested timeout
    pub fn new(endpoint: String, timeout: Duration) -> GatewayResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Build the adapter and check the gateway answers an anonymous catalog read
    pub async fn connect(endpoint: String, timeout: Duration) -> GatewayResult<Self> {
        let gateway = Self::new(endpoint, timeout)?;
        gateway
            .get_public_packages(&Principal::anonymous())
            .await?;
        Ok(gateway)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn envelope(&self, caller: &Principal, method: &str, args: Vec<Value>) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": {
                "caller": caller,
                "args": args,
            }
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        caller: &Principal,
        method: &str,
        args: Vec<Value>,
    ) -> GatewayResult<T> {
        let payload = self.envelope(caller, method, args);

        tracing::debug!(method = %method, caller = %caller, "Calling gateway");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        decode_response(method, resp)
    }
}

fn decode_response<T: DeserializeOwned>(method: &str, mut resp: Value) -> GatewayResult<T> {
    if let Some(err) = resp.get("error").filter(|err| !err.is_null()) {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(GatewayError::Rejected(message));
    }

    let result = resp
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| GatewayError::Decode(format!("No result in response to {}", method)))?;

    Ok(serde_json::from_value(result)?)
}

fn contact_args(contact: &ContactDetails) -> Vec<Value> {
    vec![
        json!(contact.name),
        json!(contact.phone_number),
        json!(contact.email),
    ]
}

#[async_trait]
impl Gateway for RpcGateway {
    async fn get_public_packages(&self, caller: &Principal) -> GatewayResult<Vec<TourPackage>> {
        self.call(caller, "getPublicPackages", vec![]).await
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
        let args = vec![
            json!(id),
            json!(title),
            json!(description),
            json!(price),
            json!(duration),
        ];
        self.call(caller, "createPackage", args).await
    }

    async fn update_package(
        &self,
        caller: &Principal,
        id: &str,
        package: &TourPackage,
    ) -> GatewayResult<()> {
        self.call(caller, "updatePackage", vec![json!(id), json!(package)])
            .await
    }

    async fn delete_package(&self, caller: &Principal, id: &str) -> GatewayResult<()> {
        self.call(caller, "deletePackage", vec![json!(id)]).await
    }

    async fn submit_tour_inquiry(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        message: &str,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.push(json!(message));
        self.call(caller, "submitTourInquiry", args).await
    }

    async fn submit_car_rental(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        request: &CarRentalRequest,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.extend([
            json!(request.vehicle_type),
            json!(request.driver_required),
            json!(request.estimated_distance),
            json!(request.pricing_mode),
            json!(request.estimated_days),
        ]);
        self.call(caller, "submitCarRental", args).await
    }

    async fn submit_custom_package(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &CustomPackageDetails,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.extend([
            json!(details.destination_type),
            json!(details.destination),
            json!(details.number_of_travelers),
            json!(details.duration_days),
            json!(details.preferred_dates),
        ]);
        self.call(caller, "submitCustomPackage", args).await
    }

    async fn submit_railway_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &RailwayBookingDetails,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.extend([
            json!(details.origin_station),
            json!(details.destination_station),
            json!(details.travel_date),
            json!(details.passenger_count),
            json!(details.rail_class),
        ]);
        self.call(caller, "submitRailwayBooking", args).await
    }

    async fn submit_flight_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &FlightBookingDetails,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.extend([
            json!(details.origin_city),
            json!(details.destination_city),
            json!(details.departure_date),
            json!(details.return_date),
            json!(details.trip_type),
            json!(details.passenger_count),
            json!(details.cabin_class),
        ]);
        self.call(caller, "submitFlightBooking", args).await
    }

    async fn submit_hotel_booking(
        &self,
        caller: &Principal,
        contact: &ContactDetails,
        details: &HotelBookingDetails,
    ) -> GatewayResult<()> {
        let mut args = contact_args(contact);
        args.extend([
            json!(details.destination),
            json!(details.check_in_date),
            json!(details.check_out_date),
            json!(details.number_of_guests),
            json!(details.number_of_rooms),
            json!(details.room_type_preference),
            json!(details.hotel_name),
            json!(details.star_rating),
            json!(details.location),
            json!(details.price_per_night),
        ]);
        self.call(caller, "submitHotelBooking", args).await
    }

    async fn get_all_inquiries(&self, caller: &Principal) -> GatewayResult<Vec<CustomerInquiry>> {
        self.call(caller, "getAllInquiries", vec![]).await
    }

    async fn update_inquiry_status(
        &self,
        caller: &Principal,
        id: Nat,
        status: InquiryStatus,
    ) -> GatewayResult<()> {
        self.call(caller, "updateInquiryStatus", vec![json!(id), json!(status)])
            .await
    }

    async fn get_caller_user_profile(
        &self,
        caller: &Principal,
    ) -> GatewayResult<Option<UserProfile>> {
        self.call(caller, "getCallerUserProfile", vec![]).await
    }

    async fn save_caller_user_profile(
        &self,
        caller: &Principal,
        profile: &UserProfile,
    ) -> GatewayResult<()> {
        self.call(caller, "saveCallerUserProfile", vec![json!(profile)])
            .await
    }

    async fn is_caller_admin(&self, caller: &Principal) -> GatewayResult<bool> {
        self.call(caller, "isCallerAdmin", vec![]).await
    }

    async fn get_caller_user_role(&self, caller: &Principal) -> GatewayResult<UserRole> {
        self.call(caller, "getCallerUserRole", vec![]).await
    }

    async fn assign_caller_user_role(
        &self,
        caller: &Principal,
        user: &Principal,
        role: UserRole,
    ) -> GatewayResult<()> {
        self.call(caller, "assignCallerUserRole", vec![json!(user), json!(role)])
            .await
    }
}
