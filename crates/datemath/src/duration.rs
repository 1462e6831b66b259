//! Calendar durations and date arithmetic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instant::{local_datetime, resolve_local, Instant, ToInstant};

/// A signed calendar offset with independent optional fields.
///
/// Fields are not normalized against each other (90 minutes stays 90
/// minutes) and absent fields are no-ops. [`add`] applies the present
/// fields in the fixed order years, months, days, hours, minutes, seconds,
/// millis.
///
/// Build one with struct-update syntax:
///
/// ```
/// use datemath::CalendarDuration;
///
/// let dur = CalendarDuration {
///     days: Some(3),
///     hours: Some(2),
///     ..Default::default()
/// };
/// assert_eq!(dur.negated().days, Some(-3));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarDuration {
    pub years: Option<i64>,
    pub months: Option<i64>,
    pub days: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub millis: Option<i64>,
}

impl CalendarDuration {
    /// The duration with every present field negated. Absent fields stay
    /// absent rather than becoming zero.
    pub fn negated(self) -> Self {
        Self {
            years: self.years.map(i64::saturating_neg),
            months: self.months.map(i64::saturating_neg),
            days: self.days.map(i64::saturating_neg),
            hours: self.hours.map(i64::saturating_neg),
            minutes: self.minutes.map(i64::saturating_neg),
            seconds: self.seconds.map(i64::saturating_neg),
            millis: self.millis.map(i64::saturating_neg),
        }
    }

    fn touches_calendar_date(self) -> bool {
        self.years.is_some() || self.months.is_some() || self.days.is_some()
    }
}

/// Add a calendar duration to an instant.
///
/// Year, month, and day components apply to the local calendar date: month
/// steps keep the day number and let overflow roll into the following month
/// (Jan 31 + 1 month lands in early March, never on a clamped Feb day), and
/// day steps preserve the local wall-clock time. Hours, minutes, seconds,
/// and millis are fixed-quantity millisecond arithmetic.
///
/// # Errors
///
/// Returns [`DateMathError::InvalidInput`](crate::DateMathError::InvalidInput)
/// when `input` does not resolve to a valid instant. Arithmetic that
/// escapes the representable date-time range yields an invalid instant
/// rather than an error.
pub fn add(input: impl ToInstant, duration: CalendarDuration) -> Result<Instant> {
    let millis = input.to_instant().valid_millis()?;
    Ok(apply(millis, duration)
        .map(Instant::from_millis)
        .unwrap_or(Instant::invalid()))
}

/// Subtract a calendar duration from an instant: [`add`] of the negated
/// duration.
///
/// # Errors
///
/// Same as [`add`].
pub fn sub(input: impl ToInstant, duration: CalendarDuration) -> Result<Instant> {
    add(input, duration.negated())
}

/// Apply the duration field by field. `None` when any intermediate result
/// leaves the representable range.
fn apply(millis: i64, duration: CalendarDuration) -> Option<i64> {
    let mut result = millis;

    // Date-level fields go through the local calendar so that day numbers
    // and wall-clock times carry across month lengths and DST shifts.
    if duration.touches_calendar_date() {
        let mut naive = local_datetime(result)?.naive_local();
        if let Some(years) = duration.years {
            naive = shift_months(naive, years.checked_mul(12)?)?;
        }
        if let Some(months) = duration.months {
            naive = shift_months(naive, months)?;
        }
        if let Some(days) = duration.days {
            naive = shift_days(naive, days)?;
        }
        result = resolve_local(naive)?.timestamp_millis();
    }

    if let Some(hours) = duration.hours {
        result = result.checked_add(hours.checked_mul(3_600_000)?)?;
    }
    if let Some(minutes) = duration.minutes {
        result = result.checked_add(minutes.checked_mul(60_000)?)?;
    }
    if let Some(seconds) = duration.seconds {
        result = result.checked_add(seconds.checked_mul(1_000)?)?;
    }
    if let Some(extra) = duration.millis {
        result = result.checked_add(extra)?;
    }

    Some(result)
}

/// Step the date by whole months, keeping the day number. A day number past
/// the end of the target month rolls into the following month.
fn shift_months(naive: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let date = naive.date();
    let months0 = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(i64::from(date.month0()))?
        .checked_add(delta)?;
    let year = i32::try_from(months0.div_euclid(12)).ok()?;
    let month = months0.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let shifted = first.checked_add_signed(Duration::days(i64::from(date.day()) - 1))?;
    Some(shifted.and_time(naive.time()))
}

/// Step the calendar date by whole days, preserving the wall-clock time.
fn shift_days(naive: NaiveDateTime, delta: i64) -> Option<NaiveDateTime> {
    let shifted = naive.date().checked_add_signed(Duration::try_days(delta)?)?;
    Some(shifted.and_time(naive.time()))
}

// ── Tests ───────────────────────────────────────────────────────────────────
