//! Admin inquiry review: listing, category filter, detail panels and status
//! changes.
//!
//! The gateway always returns the full inquiry set; filtering happens here.

use std::str::FromStr;

use serde::Serialize;

use crate::gateway::GatewayResult;
use crate::models::{
    CustomerInquiry, InquiryCategory, InquiryDetails, InquiryStatus, Nat, Principal,
};
use crate::queries::{DataAccess, QueryState, UpdateInquiryStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(InquiryCategory),
}

impl CategoryFilter {
    pub fn matches(&self, inquiry: &CustomerInquiry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => inquiry.category() == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<InquiryCategory>().map(CategoryFilter::Only)
    }
}

/// Count of inquiries per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub new: usize,
    pub in_progress: usize,
    pub resolved: usize,
}

impl StatusSummary {
    pub fn of<'a>(inquiries: impl IntoIterator<Item = &'a CustomerInquiry>) -> Self {
        inquiries
            .into_iter()
            .fold(Self::default(), |mut summary, inquiry| {
                summary.total += 1;
                match inquiry.status {
                    InquiryStatus::New => summary.new += 1,
                    InquiryStatus::InProgress => summary.in_progress += 1,
                    InquiryStatus::Resolved => summary.resolved += 1,
                }
                summary
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Category-specific details shown beside an inquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub title: &'static str,
    pub rows: Vec<DetailRow>,
}

#[derive(Default)]
struct Rows(Vec<DetailRow>);

impl Rows {
    fn add(mut self, label: &'static str, value: impl ToString) -> Self {
        self.0.push(DetailRow {
            label,
            value: value.to_string(),
        });
        self
    }

    fn add_opt<T: ToString>(self, label: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.add(label, value),
            None => self,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Build the detail panel for an inquiry.
///
/// Tour inquiries carry nothing beyond their message, and an inquiry whose
/// detail payload is missing renders no panel instead of failing.
pub fn detail_panel(inquiry: &CustomerInquiry) -> Option<DetailPanel> {
    let (title, rows) = match &inquiry.details {
        InquiryDetails::TourInquiry | InquiryDetails::Missing(_) => return None,
        InquiryDetails::CarRental(rental) => (
            "Rental Details",
            Rows::default()
                .add("Vehicle", rental.vehicle_type.label())
                .add("Driver Required", yes_no(rental.driver_required))
                .add_opt("Pricing", rental.pricing_mode.map(|mode| mode.label()))
                .add_opt(
                    "Estimated Distance",
                    rental.estimated_distance.map(|km| format!("{} km", km)),
                )
                .add_opt(
                    "Estimated Days",
                    rental.estimated_days.map(|days| format!("{} days", days)),
                )
                .add_opt("Estimated Fare", rental.estimated_fare),
        ),
        InquiryDetails::CustomPackage(package) => (
            "Custom Package Details",
            Rows::default()
                .add("Destination Type", package.destination_type.label())
                .add("Destination", &package.destination)
                .add("Travelers", package.number_of_travelers)
                .add("Duration", format!("{} days", package.duration_days))
                .add_opt("Preferred Dates", package.preferred_dates.as_ref()),
        ),
        InquiryDetails::RailwayBooking(rail) => (
            "Railway Booking Details",
            Rows::default()
                .add("From", &rail.origin_station)
                .add("To", &rail.destination_station)
                .add("Travel Date", &rail.travel_date)
                .add("Passengers", rail.passenger_count)
                .add("Class", &rail.rail_class),
        ),
        InquiryDetails::FlightBooking(flight) => (
            "Flight Booking Details",
            Rows::default()
                .add("From", &flight.origin_city)
                .add("To", &flight.destination_city)
                .add("Trip Type", flight.trip_type.label())
                .add("Departure", &flight.departure_date)
                .add_opt("Return", flight.return_date.as_ref())
                .add("Passengers", flight.passenger_count)
                .add("Cabin Class", flight.cabin_class.label()),
        ),
        InquiryDetails::HotelBooking(hotel) => (
            "Hotel Booking Details",
            Rows::default()
                .add("Destination", &hotel.destination)
                .add("Check-in", &hotel.check_in_date)
                .add("Check-out", &hotel.check_out_date)
                .add("Guests", hotel.number_of_guests)
                .add("Rooms", hotel.number_of_rooms)
                .add("Room Type", &hotel.room_type_preference)
                .add_opt("Hotel", hotel.hotel_name.as_ref())
                .add_opt("Star Rating", hotel.star_rating.map(|stars| format!("{} star", stars)))
                .add_opt("Location", hotel.location.as_ref())
                .add_opt("Price per Night", hotel.price_per_night),
        ),
    };
    Some(DetailPanel { title, rows: rows.0 })
}

/// Inquiry listing for the admin dashboard
#[derive(Clone)]
pub struct InquiryReview {
    data: DataAccess,
}

impl InquiryReview {
    pub fn new(data: DataAccess) -> Self {
        Self { data }
    }

    pub async fn list(
        &self,
        caller: &Principal,
        filter: CategoryFilter,
    ) -> GatewayResult<QueryState<Vec<CustomerInquiry>>> {
        let listing = self.data.all_inquiries(caller).await?;
        Ok(listing.map(|inquiries| {
            inquiries
                .into_iter()
                .filter(|inquiry| filter.matches(inquiry))
                .collect()
        }))
    }

    pub async fn find(
        &self,
        caller: &Principal,
        id: Nat,
    ) -> GatewayResult<QueryState<Option<CustomerInquiry>>> {
        let listing = self.data.all_inquiries(caller).await?;
        Ok(listing.map(|inquiries| inquiries.into_iter().find(|inquiry| inquiry.id == id)))
    }

    /// Set the status of inquiry `id` and return the entry as the gateway
    /// now reports it, read back through the invalidated listing.
    pub async fn set_status(
        &self,
        caller: &Principal,
        id: Nat,
        status: InquiryStatus,
    ) -> GatewayResult<Option<CustomerInquiry>> {
        self.data
            .mutate(caller, UpdateInquiryStatus { id, status })
            .await?;
        tracing::info!(inquiry_id = %id, status = status.as_str(), "Inquiry status updated");
        Ok(self.find(caller, id).await?.ready().flatten())
    }
}
