//! Per-category inquiry forms
//!
//! Each form holds the raw text a customer typed. `validate()` runs the
//! local rules; `to_submission()` validates and then converts the text into
//! the wire payload.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
    CabinClass, CarRentalRequest, ContactDetails, CustomPackageDetails, DestinationType,
    FlightBookingDetails, HotelBookingDetails, InquiryCategory, InquirySubmission, PricingMode,
    RailwayBookingDetails, TripType, VehicleType,
};
use crate::validation::{
    at_least_one, calendar_date, form_error, nat_field, not_blank, optional_at_least_one,
    optional_calendar_date, optional_nat_field, optional_non_negative, optional_star_rating,
    optional_text, parse_date,
};

/// A form that produces one inquiry submission
pub trait InquiryForm: Validate + Default + Clone + Send + Sync + 'static {
    const CATEGORY: InquiryCategory;

    /// Convert already validated text into the payload
    fn build(&self) -> Result<InquirySubmission, ValidationErrors>;

    fn to_submission(&self) -> Result<InquirySubmission, ValidationErrors> {
        self.validate()?;
        self.build()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub phone_number: String,
    #[validate(custom = "not_blank")]
    pub email: String,
}

impl ContactForm {
    pub fn new(name: &str, phone_number: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            email: email.to_string(),
        }
    }

    fn to_details(&self) -> ContactDetails {
        ContactDetails {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TourInquiryForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    #[validate(custom = "not_blank")]
    pub message: String,
}

impl InquiryForm for TourInquiryForm {
    const CATEGORY: InquiryCategory = InquiryCategory::TourInquiry;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        Ok(InquirySubmission::Tour {
            contact: self.contact.to_details(),
            message: self.message.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rental_estimate", skip_on_field_errors = false))]
pub struct CarRentalForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub driver_required: bool,
    #[serde(default)]
    pub pricing_mode: PricingMode,
    #[serde(default)]
    #[validate(custom = "optional_at_least_one")]
    pub estimated_distance: String,
    #[serde(default)]
    #[validate(custom = "optional_at_least_one")]
    pub estimated_days: String,
}

fn validate_rental_estimate(form: &CarRentalForm) -> Result<(), ValidationError> {
    match form.pricing_mode {
        PricingMode::PerKm if form.estimated_distance.trim().is_empty() => Err(form_error(
            "estimated_distance_required",
            "Estimated distance is required for per-kilometre pricing",
        )),
        PricingMode::PerDay if form.estimated_days.trim().is_empty() => Err(form_error(
            "estimated_days_required",
            "Number of days is required for per-day pricing",
        )),
        _ => Ok(()),
    }
}

impl InquiryForm for CarRentalForm {
    const CATEGORY: InquiryCategory = InquiryCategory::CarRental;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        Ok(InquirySubmission::CarRental {
            contact: self.contact.to_details(),
            request: CarRentalRequest {
                vehicle_type: self.vehicle_type,
                driver_required: self.driver_required,
                estimated_distance: optional_nat_field(
                    "estimated_distance",
                    &self.estimated_distance,
                )?,
                pricing_mode: Some(self.pricing_mode),
                estimated_days: optional_nat_field("estimated_days", &self.estimated_days)?,
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomPackageForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    #[serde(default)]
    pub destination_type: DestinationType,
    #[validate(custom = "not_blank")]
    pub destination: String,
    #[validate(custom = "at_least_one")]
    pub number_of_travelers: String,
    #[validate(custom = "at_least_one")]
    pub duration_days: String,
    #[serde(default)]
    pub preferred_dates: String,
}

impl InquiryForm for CustomPackageForm {
    const CATEGORY: InquiryCategory = InquiryCategory::CustomPackage;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        Ok(InquirySubmission::CustomPackage {
            contact: self.contact.to_details(),
            details: CustomPackageDetails {
                destination_type: self.destination_type,
                destination: self.destination.trim().to_string(),
                number_of_travelers: nat_field("number_of_travelers", &self.number_of_travelers)?,
                duration_days: nat_field("duration_days", &self.duration_days)?,
                preferred_dates: optional_text(&self.preferred_dates),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RailwayBookingForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    #[validate(custom = "not_blank")]
    pub origin_station: String,
    #[validate(custom = "not_blank")]
    pub destination_station: String,
    #[validate(custom = "calendar_date")]
    pub travel_date: String,
    #[validate(custom = "at_least_one")]
    pub passenger_count: String,
    #[validate(custom = "not_blank")]
    pub rail_class: String,
}

impl InquiryForm for RailwayBookingForm {
    const CATEGORY: InquiryCategory = InquiryCategory::RailwayBooking;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        Ok(InquirySubmission::RailwayBooking {
            contact: self.contact.to_details(),
            details: RailwayBookingDetails {
                origin_station: self.origin_station.trim().to_string(),
                destination_station: self.destination_station.trim().to_string(),
                travel_date: self.travel_date.trim().to_string(),
                passenger_count: nat_field("passenger_count", &self.passenger_count)?,
                rail_class: self.rail_class.trim().to_string(),
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_return_date", skip_on_field_errors = false))]
pub struct FlightBookingForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    #[validate(custom = "not_blank")]
    pub origin_city: String,
    #[validate(custom = "not_blank")]
    pub destination_city: String,
    #[validate(custom = "calendar_date")]
    pub departure_date: String,
    #[serde(default)]
    #[validate(custom = "optional_calendar_date")]
    pub return_date: String,
    #[serde(default)]
    pub trip_type: TripType,
    #[validate(custom = "at_least_one")]
    pub passenger_count: String,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

/// A return date is required only for round trips and may not precede departure
fn validate_return_date(form: &FlightBookingForm) -> Result<(), ValidationError> {
    if form.trip_type != TripType::RoundTrip {
        return Ok(());
    }
    if form.return_date.trim().is_empty() {
        return Err(form_error(
            "return_date_required",
            "Return date is required for round trips",
        ));
    }
    match (parse_date(&form.departure_date), parse_date(&form.return_date)) {
        (Some(departure), Some(ret)) if ret < departure => Err(form_error(
            "return_before_departure",
            "Return date cannot be before the departure date",
        )),
        _ => Ok(()),
    }
}

impl InquiryForm for FlightBookingForm {
    const CATEGORY: InquiryCategory = InquiryCategory::FlightBooking;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        let return_date = match self.trip_type {
            TripType::RoundTrip => optional_text(&self.return_date),
            TripType::OneWay => None,
        };
        Ok(InquirySubmission::FlightBooking {
            contact: self.contact.to_details(),
            details: FlightBookingDetails {
                origin_city: self.origin_city.trim().to_string(),
                destination_city: self.destination_city.trim().to_string(),
                departure_date: self.departure_date.trim().to_string(),
                return_date,
                trip_type: self.trip_type,
                passenger_count: nat_field("passenger_count", &self.passenger_count)?,
                cabin_class: self.cabin_class,
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stay_dates", skip_on_field_errors = false))]
pub struct HotelBookingForm {
    #[serde(flatten)]
    #[validate]
    pub contact: ContactForm,
    #[validate(custom = "not_blank")]
    pub destination: String,
    #[validate(custom = "calendar_date")]
    pub check_in_date: String,
    #[validate(custom = "calendar_date")]
    pub check_out_date: String,
    #[validate(custom = "at_least_one")]
    pub number_of_guests: String,
    #[validate(custom = "at_least_one")]
    pub number_of_rooms: String,
    #[validate(custom = "not_blank")]
    pub room_type_preference: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    #[validate(custom = "optional_star_rating")]
    pub star_rating: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    #[validate(custom = "optional_non_negative")]
    pub price_per_night: String,
}

fn validate_stay_dates(form: &HotelBookingForm) -> Result<(), ValidationError> {
    match (parse_date(&form.check_in_date), parse_date(&form.check_out_date)) {
        (Some(check_in), Some(check_out)) if check_out <= check_in => Err(form_error(
            "check_out_not_after_check_in",
            "Check-out must be after check-in",
        )),
        _ => Ok(()),
    }
}

impl InquiryForm for HotelBookingForm {
    const CATEGORY: InquiryCategory = InquiryCategory::HotelBooking;

    fn build(&self) -> Result<InquirySubmission, ValidationErrors> {
        Ok(InquirySubmission::HotelBooking {
            contact: self.contact.to_details(),
            details: HotelBookingDetails {
                destination: self.destination.trim().to_string(),
                check_in_date: self.check_in_date.trim().to_string(),
                check_out_date: self.check_out_date.trim().to_string(),
                number_of_guests: nat_field("number_of_guests", &self.number_of_guests)?,
                number_of_rooms: nat_field("number_of_rooms", &self.number_of_rooms)?,
                room_type_preference: self.room_type_preference.trim().to_string(),
                hotel_name: optional_text(&self.hotel_name),
                star_rating: optional_nat_field("star_rating", &self.star_rating)?,
                location: optional_text(&self.location),
                price_per_night: optional_nat_field("price_per_night", &self.price_per_night)?,
            },
        })
    }
}
