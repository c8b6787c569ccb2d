//! Customer inquiry models
//!
//! On the gateway wire an inquiry is a flat record with one optional detail
//! field per category ([`InquiryRecord`]). Inside the crate it is a
//! [`CustomerInquiry`] whose [`InquiryDetails`] variant carries exactly the
//! payload of its own category, so a category/detail mismatch cannot be built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Nat;

/// Booking type an inquiry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryCategory {
    TourInquiry,
    CarRental,
    CustomPackage,
    RailwayBooking,
    FlightBooking,
    HotelBooking,
}

impl InquiryCategory {
    pub const ALL: [InquiryCategory; 6] = [
        InquiryCategory::TourInquiry,
        InquiryCategory::CarRental,
        InquiryCategory::CustomPackage,
        InquiryCategory::RailwayBooking,
        InquiryCategory::FlightBooking,
        InquiryCategory::HotelBooking,
    ];

    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryCategory::TourInquiry => "tourInquiry",
            InquiryCategory::CarRental => "carRental",
            InquiryCategory::CustomPackage => "customPackage",
            InquiryCategory::RailwayBooking => "railwayBooking",
            InquiryCategory::FlightBooking => "flightBooking",
            InquiryCategory::HotelBooking => "hotelBooking",
        }
    }

    /// Human readable name used in admin panels
    pub fn label(&self) -> &'static str {
        match self {
            InquiryCategory::TourInquiry => "Tour Inquiry",
            InquiryCategory::CarRental => "Car Rental",
            InquiryCategory::CustomPackage => "Custom Package",
            InquiryCategory::RailwayBooking => "Railway Booking",
            InquiryCategory::FlightBooking => "Flight Booking",
            InquiryCategory::HotelBooking => "Hotel Booking",
        }
    }

    /// Message stored with inquiries whose form has no free-text message
    pub fn placeholder_message(&self) -> &'static str {
        match self {
            InquiryCategory::TourInquiry => "Tour inquiry",
            InquiryCategory::CarRental => "Car rental inquiry",
            InquiryCategory::CustomPackage => "Custom package inquiry",
            InquiryCategory::RailwayBooking => "Railway booking inquiry",
            InquiryCategory::FlightBooking => "Flight booking inquiry",
            InquiryCategory::HotelBooking => "Hotel booking inquiry",
        }
    }
}

impl fmt::Display for InquiryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InquiryCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown inquiry category: '{}'", s))
    }
}

/// Admin handling status. Any status may be set from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryStatus {
    New,
    InProgress,
    Resolved,
}

impl InquiryStatus {
    pub const ALL: [InquiryStatus; 3] = [
        InquiryStatus::New,
        InquiryStatus::InProgress,
        InquiryStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::InProgress => "inProgress",
            InquiryStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Sedan,
    Suv,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "Sedan",
            VehicleType::Suv => "SUV",
        }
    }
}

/// How a car rental fare is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingMode {
    #[default]
    PerKm,
    PerDay,
}

impl PricingMode {
    pub fn label(&self) -> &'static str {
        match self {
            PricingMode::PerKm => "Per kilometre",
            PricingMode::PerDay => "Per day",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DestinationType {
    #[default]
    Domestic,
    International,
}

impl DestinationType {
    pub fn label(&self) -> &'static str {
        match self {
            DestinationType::Domestic => "Domestic",
            DestinationType::International => "International",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripType {
    #[default]
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "round-trip")]
    RoundTrip,
}

impl TripType {
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "One way",
            TripType::RoundTrip => "Round trip",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

/// Contact block shared by every inquiry category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub name: String,
    pub phone_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    pub vehicle_type: VehicleType,
    pub driver_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_mode: Option<PricingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_distance: Option<Nat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_days: Option<Nat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_fare: Option<Nat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPackageDetails {
    pub destination_type: DestinationType,
    pub destination: String,
    pub number_of_travelers: Nat,
    pub duration_days: Nat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_dates: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailwayBookingDetails {
    pub origin_station: String,
    pub destination_station: String,
    pub travel_date: String,
    pub passenger_count: Nat,
    pub rail_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightBookingDetails {
    pub origin_city: String,
    pub destination_city: String,
    pub departure_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    pub trip_type: TripType,
    pub passenger_count: Nat,
    pub cabin_class: CabinClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBookingDetails {
    pub destination: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: Nat,
    pub number_of_rooms: Nat,
    pub room_type_preference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_rating: Option<Nat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<Nat>,
}

/// Category-specific booking details
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryDetails {
    TourInquiry,
    CarRental(RentalDetails),
    CustomPackage(CustomPackageDetails),
    RailwayBooking(RailwayBookingDetails),
    FlightBooking(FlightBookingDetails),
    HotelBooking(HotelBookingDetails),
    /// The gateway returned a record whose detail payload for this category
    /// was absent or belonged to another category
    Missing(InquiryCategory),
}

impl InquiryDetails {
    pub fn category(&self) -> InquiryCategory {
        match self {
            InquiryDetails::TourInquiry => InquiryCategory::TourInquiry,
            InquiryDetails::CarRental(_) => InquiryCategory::CarRental,
            InquiryDetails::CustomPackage(_) => InquiryCategory::CustomPackage,
            InquiryDetails::RailwayBooking(_) => InquiryCategory::RailwayBooking,
            InquiryDetails::FlightBooking(_) => InquiryCategory::FlightBooking,
            InquiryDetails::HotelBooking(_) => InquiryCategory::HotelBooking,
            InquiryDetails::Missing(category) => *category,
        }
    }
}

/// An inquiry as listed for admins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InquiryRecord", into = "InquiryRecord")]
pub struct CustomerInquiry {
    pub id: Nat,
    pub contact: ContactDetails,
    pub message: String,
    pub status: InquiryStatus,
    pub details: InquiryDetails,
}

impl CustomerInquiry {
    pub fn category(&self) -> InquiryCategory {
        self.details.category()
    }
}

/// Gateway wire shape of an inquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRecord {
    pub id: Nat,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: String,
    pub category: InquiryCategory,
    pub status: InquiryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_details: Option<RentalDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_package_details: Option<CustomPackageDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub railway_booking_details: Option<RailwayBookingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flight_booking_details: Option<FlightBookingDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_booking_details: Option<HotelBookingDetails>,
}

impl From<InquiryRecord> for CustomerInquiry {
    fn from(record: InquiryRecord) -> Self {
        let populated = [
            record.rental_details.is_some(),
            record.custom_package_details.is_some(),
            record.railway_booking_details.is_some(),
            record.flight_booking_details.is_some(),
            record.hotel_booking_details.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count();

        let category = record.category;
        let matched = match category {
            InquiryCategory::TourInquiry => Some(InquiryDetails::TourInquiry),
            InquiryCategory::CarRental => record.rental_details.map(InquiryDetails::CarRental),
            InquiryCategory::CustomPackage => record
                .custom_package_details
                .map(InquiryDetails::CustomPackage),
            InquiryCategory::RailwayBooking => record
                .railway_booking_details
                .map(InquiryDetails::RailwayBooking),
            InquiryCategory::FlightBooking => record
                .flight_booking_details
                .map(InquiryDetails::FlightBooking),
            InquiryCategory::HotelBooking => record
                .hotel_booking_details
                .map(InquiryDetails::HotelBooking),
        };

        let own_payload = usize::from(
            category != InquiryCategory::TourInquiry && matched.is_some(),
        );
        if populated > own_payload {
            tracing::warn!(
                inquiry_id = %record.id,
                category = %category,
                "Inquiry carries detail payloads of another category; ignoring them"
            );
        }

        let details = matched.unwrap_or_else(|| {
            tracing::warn!(
                inquiry_id = %record.id,
                category = %category,
                "Inquiry is missing its detail payload"
            );
            InquiryDetails::Missing(category)
        });

        CustomerInquiry {
            id: record.id,
            contact: ContactDetails {
                name: record.name,
                phone_number: record.phone_number,
                email: record.email,
            },
            message: record.message,
            status: record.status,
            details,
        }
    }
}

impl From<CustomerInquiry> for InquiryRecord {
    fn from(inquiry: CustomerInquiry) -> Self {
        let category = inquiry.category();
        let mut record = InquiryRecord {
            id: inquiry.id,
            name: inquiry.contact.name,
            email: inquiry.contact.email,
            phone_number: inquiry.contact.phone_number,
            message: inquiry.message,
            category,
            status: inquiry.status,
            rental_details: None,
            custom_package_details: None,
            railway_booking_details: None,
            flight_booking_details: None,
            hotel_booking_details: None,
        };
        match inquiry.details {
            InquiryDetails::CarRental(details) => record.rental_details = Some(details),
            InquiryDetails::CustomPackage(details) => {
                record.custom_package_details = Some(details)
            }
            InquiryDetails::RailwayBooking(details) => {
                record.railway_booking_details = Some(details)
            }
            InquiryDetails::FlightBooking(details) => {
                record.flight_booking_details = Some(details)
            }
            InquiryDetails::HotelBooking(details) => record.hotel_booking_details = Some(details),
            InquiryDetails::TourInquiry | InquiryDetails::Missing(_) => {}
        }
        record
    }
}

/// Car rental request as submitted; the fare is quoted by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRentalRequest {
    pub vehicle_type: VehicleType,
    pub driver_required: bool,
    pub estimated_distance: Option<Nat>,
    pub pricing_mode: Option<PricingMode>,
    pub estimated_days: Option<Nat>,
}

/// Validated payload of one inquiry submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquirySubmission {
    Tour {
        contact: ContactDetails,
        message: String,
    },
    CarRental {
        contact: ContactDetails,
        request: CarRentalRequest,
    },
    CustomPackage {
        contact: ContactDetails,
        details: CustomPackageDetails,
    },
    RailwayBooking {
        contact: ContactDetails,
        details: RailwayBookingDetails,
    },
    FlightBooking {
        contact: ContactDetails,
        details: FlightBookingDetails,
    },
    HotelBooking {
        contact: ContactDetails,
        details: HotelBookingDetails,
    },
}

impl InquirySubmission {
    pub fn category(&self) -> InquiryCategory {
        match self {
            InquirySubmission::Tour { .. } => InquiryCategory::TourInquiry,
            InquirySubmission::CarRental { .. } => InquiryCategory::CarRental,
            InquirySubmission::CustomPackage { .. } => InquiryCategory::CustomPackage,
            InquirySubmission::RailwayBooking { .. } => InquiryCategory::RailwayBooking,
            InquirySubmission::FlightBooking { .. } => InquiryCategory::FlightBooking,
            InquirySubmission::HotelBooking { .. } => InquiryCategory::HotelBooking,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            InquirySubmission::Tour { contact, .. }
            | InquirySubmission::CarRental { contact, .. }
            | InquirySubmission::CustomPackage { contact, .. }
            | InquirySubmission::RailwayBooking { contact, .. }
            | InquirySubmission::FlightBooking { contact, .. }
            | InquirySubmission::HotelBooking { contact, .. } => contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flight_record() -> serde_json::Value {
        json!({
            "id": "7",
            "name": "Asha",
            "email": "asha@example.com",
            "phoneNumber": "9876543210",
            "message": "Flight booking inquiry",
            "category": "flightBooking",
            "status": "inProgress",
            "flightBookingDetails": {
                "originCity": "Delhi",
                "destinationCity": "Goa",
                "departureDate": "2026-12-01",
                "returnDate": "2026-12-05",
                "tripType": "round-trip",
                "passengerCount": "2",
                "cabinClass": "economy"
            }
        })
    }

    #[test]
    fn test_record_decodes_into_matching_variant() {
        let inquiry: CustomerInquiry = serde_json::from_value(flight_record()).unwrap();
        assert_eq!(inquiry.id, Nat::new(7));
        assert_eq!(inquiry.status, InquiryStatus::InProgress);
        match &inquiry.details {
            InquiryDetails::FlightBooking(details) => {
                assert_eq!(details.trip_type, TripType::RoundTrip);
                assert_eq!(details.return_date.as_deref(), Some("2026-12-05"));
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_record_degrades_to_missing() {
        let mut record = flight_record();
        record["category"] = json!("hotelBooking");
        let inquiry: CustomerInquiry = serde_json::from_value(record).unwrap();
        assert_eq!(
            inquiry.details,
            InquiryDetails::Missing(InquiryCategory::HotelBooking)
        );
        assert_eq!(inquiry.category(), InquiryCategory::HotelBooking);
    }

    #[test]
    fn test_encoding_populates_only_own_detail_field() {
        let inquiry: CustomerInquiry = serde_json::from_value(flight_record()).unwrap();
        let encoded = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(encoded["category"], "flightBooking");
        assert!(encoded.get("flightBookingDetails").is_some());
        assert!(encoded.get("hotelBookingDetails").is_none());
        assert!(encoded.get("rentalDetails").is_none());
    }

    #[test]
    fn test_category_parses_case_insensitively() {
        assert_eq!(
            "carrental".parse::<InquiryCategory>().unwrap(),
            InquiryCategory::CarRental
        );
        assert!("boat".parse::<InquiryCategory>().is_err());
    }
}
