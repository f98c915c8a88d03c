//! Sign-up validation rules.
//!
//! Checks run in a fixed order and the first failure wins: username,
//! password length, date of birth, age range.

use chrono::{DateTime, Datelike, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Minimum accepted password length, in bytes.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Youngest accepted age at sign-up (inclusive).
pub const MIN_AGE: i32 = 8;

/// Oldest accepted age at sign-up (inclusive).
pub const MAX_AGE: i32 = 150;

/// Age as the plain difference of calendar years. Month and day are ignored.
pub fn age_in_years(date_of_birth: Timestamp, now: Timestamp) -> i32 {
    now.year() - date_of_birth.year()
}

/// Validate a sign-up payload against the rules above and return the parsed
/// date of birth.
///
/// `date_of_birth` is the raw RFC 3339 string from the request body, or
/// `None` when the client omitted it.
pub fn validate_sign_up(
    username: &str,
    password: &str,
    date_of_birth: Option<&str>,
    now: Timestamp,
) -> Result<Timestamp, CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("invalid username".into()));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "invalid password: length must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let Some(dob) = date_of_birth.and_then(parse_timestamp) else {
        return Err(CoreError::Validation(
            "invalid date of birth: must be in format (e.g., 2020-01-01T00:00:00Z)".into(),
        ));
    };

    let age = age_in_years(dob, now);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(CoreError::Validation(format!(
            "invalid age: must be between {MIN_AGE} and {MAX_AGE} years old"
        )));
    }

    Ok(dob)
}

fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
