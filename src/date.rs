//! Valid APOD archive range and date clamping.
//!
//! The archive starts on 1995-06-16 and ends with today's entry. Every date
//! written to an [`ApodClient`](crate::ApodClient) passes through
//! [`clamp_date`], so an out-of-range date is never an error.

use chrono::{Local, NaiveDate};

/// First day of the APOD archive.
pub const MIN_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("1995-06-16 is a valid calendar date"),
};

/// Date format used by the API for both the `date` query parameter and the
/// `date` field of the response.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today in the caller's local calendar.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Constrains `date` to the inclusive range `[MIN_DATE, today]`.
///
/// Later dates are lowered to `today`, earlier dates raised to [`MIN_DATE`].
#[must_use]
pub fn clamp_date(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    if date > today {
        today
    } else if date < MIN_DATE {
        MIN_DATE
    } else {
        date
    }
}
