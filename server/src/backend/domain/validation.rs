//! Input checks shared by the domain services.
//!
//! Metric values (mood, energy, inflammation) are deliberately not range
//! checked here; the 1-10 scale is a client-side control setting.

use chrono::{NaiveDate, NaiveTime};

use super::errors::{DomainError, DomainResult};

pub const MAX_NAME_LENGTH: usize = 100;

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_iso_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        // chrono accepts unpadded fields; stored dates must stay sortable as text
        .filter(|_| value.len() == 10)
        .ok_or_else(|| DomainError::validation(format!("{} must be in YYYY-MM-DD format", field)))
}

/// Validate a 24-hour "HH:MM" time of day
pub fn validate_time_of_day(field: &str, value: &str) -> DomainResult<()> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        Ok(())
    } else {
        Err(DomainError::validation(format!("{} must be in HH:MM format", field)))
    }
}

/// Trim and check a required free-text field
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_len
        )));
    }
    Ok(trimmed.to_string())
}
