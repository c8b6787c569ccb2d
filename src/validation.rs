//! Field validators shared by the submission and catalog forms
//!
//! Forms keep raw text exactly as typed. These validators use ordinary
//! integer and date parsing; conversion to wire types happens only when a
//! validated form is turned into a payload.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::{ValidationError, ValidationErrors};

use crate::models::Nat;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Required text, blank after trimming counts as missing
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

fn integer_at_least(value: &str, min: i64) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(error("required", "This field is required"));
    }
    match trimmed.parse::<i64>() {
        Ok(number) if number >= min => Ok(()),
        Ok(_) => Err(error("range", format!("Must be at least {}", min))),
        Err(_) => Err(error("not_a_number", "Must be a whole number")),
    }
}

/// Whole number, at least 1
pub fn at_least_one(value: &str) -> Result<(), ValidationError> {
    integer_at_least(value, 1)
}

/// Whole number, zero or more
pub fn non_negative(value: &str) -> Result<(), ValidationError> {
    integer_at_least(value, 0)
}

/// Blank, or a whole number of at least 1
pub fn optional_at_least_one(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    at_least_one(value)
}

/// Blank, or a whole number of at least 0
pub fn optional_non_negative(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    non_negative(value)
}

/// Blank, or a star rating between 1 and 5
pub fn optional_star_rating(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    at_least_one(value)?;
    match value.trim().parse::<i64>() {
        Ok(stars) if stars <= 5 => Ok(()),
        _ => Err(error("range", "Star rating must be between 1 and 5")),
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Required `YYYY-MM-DD` date
pub fn calendar_date(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    match parse_date(value) {
        Some(_) => Ok(()),
        None => Err(error("date", "Use the YYYY-MM-DD format")),
    }
}

/// Blank, or a `YYYY-MM-DD` date
pub fn optional_calendar_date(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    calendar_date(value)
}

/// Error raised by a whole-form rule
pub fn form_error(code: &'static str, message: &'static str) -> ValidationError {
    error(code, message)
}

fn field_errors(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

/// Convert validated text into a wire integer
pub fn nat_field(field: &'static str, value: &str) -> Result<Nat, ValidationErrors> {
    Nat::parse(value).map_err(|err| field_errors(field, error("not_a_number", err.to_string())))
}

/// Convert optional validated text into a wire integer
pub fn optional_nat_field(field: &'static str, value: &str) -> Result<Option<Nat>, ValidationErrors> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    nat_field(field, value).map(Some)
}

/// Trimmed text, `None` when blank
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
