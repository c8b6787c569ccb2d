//! Customer inquiry submission: per-category forms, the submission state
//! machine and the car rental rate card.

mod fare;
mod flow;
mod forms;

pub use fare::{estimate_fare, rate_per_day, rate_per_km, DRIVER_ALLOWANCE_PER_DAY};
pub use flow::{FlowState, SubmissionError, SubmissionFlow, RETRY_MESSAGE};
pub use forms::{
    CarRentalForm, ContactForm, CustomPackageForm, FlightBookingForm, HotelBookingForm,
    InquiryForm, RailwayBookingForm, TourInquiryForm,
};
