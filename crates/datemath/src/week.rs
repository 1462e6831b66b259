//! ISO-8601 week numbering.

use chrono::{Datelike, Duration, NaiveDate};

use crate::instant::{local_datetime, ToInstant};

/// ISO-8601 week number (1-53) of the instant's local calendar date.
///
/// Weeks run Monday through Sunday and week 1 is the week containing the
/// year's first Thursday, so the first days of January can belong to the
/// previous year's last week (and late December to week 1 of the next).
/// Returns `None` when `input` does not convert to a valid instant.
pub fn week_of_year(input: impl ToInstant) -> Option<u32> {
    let millis = input.to_instant().millis()?;
    let date = local_datetime(millis)?.date_naive();

    // Shift to the Thursday of this week; its year is the week-numbering
    // year, and counting 7-day blocks from that January 1 gives the week.
    let iso_weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date.checked_add_signed(Duration::days(4 - iso_weekday))?;
    let jan1 = NaiveDate::from_ymd_opt(thursday.year(), 1, 1)?;
    let days_into_year = thursday.signed_duration_since(jan1).num_days();

    Some((days_into_year / 7 + 1) as u32)
}

// ── Tests ───────────────────────────────────────────────────────────────────
