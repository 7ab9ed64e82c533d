//! Calendar window of a planned trip

use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;

use crate::models::TripDetails;

/// Trip dates relative to a fixed "today"
///
/// The start is `start_offset_days` after today and the trip lasts
/// `duration_days`, so the end date is `start + duration_days`. Day `n`
/// falls on `start + (n - 1)`.
#[must_use]
pub fn trip_window(
    destination: &str,
    today: NaiveDate,
    start_offset_days: u32,
    duration_days: u32,
) -> TripDetails {
    let start_date = add_days(today, start_offset_days);
    let end_date = add_days(start_date, duration_days);
    let daily_dates = (1..=duration_days)
        .map(|day| (day, add_days(start_date, day - 1)))
        .collect::<BTreeMap<_, _>>();

    TripDetails {
        destination: destination.to_string(),
        start_date,
        end_date,
        duration_days,
        daily_dates,
    }
}

/// Saturates at the last representable date
fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
