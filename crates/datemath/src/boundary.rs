//! Period boundaries: the first and last instant of the enclosing calendar
//! unit.

use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::DateMathError;
use crate::instant::{local_datetime, resolve_local, Instant, ToInstant};

/// Granularity selector for [`start_of`] and [`end_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Year,
    Month,
    /// ISO week, Monday through Sunday.
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl CalendarUnit {
    /// The lowercase unit name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        }
    }
}

impl FromStr for CalendarUnit {
    type Err = DateMathError;

    /// Parse a lowercase unit name. Names outside the closed set are
    /// rejected with [`DateMathError::UnsupportedUnit`] — the strict
    /// counterpart to [`DiffUnit::from_symbol`](crate::DiffUnit::from_symbol).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            _ => Err(DateMathError::UnsupportedUnit(s.to_string())),
        }
    }
}

/// The earliest instant within the same local-time period as `input`.
///
/// Years start on January 1, months on the 1st, weeks on Monday, and the
/// finer units truncate every field below them. An input that does not
/// convert to a valid instant propagates as an invalid instant — the
/// boundary functions are not validators.
pub fn start_of(input: impl ToInstant, unit: CalendarUnit) -> Instant {
    let Some(millis) = input.to_instant().millis() else {
        return Instant::invalid();
    };
    period_start(millis, unit)
        .map(Instant::from_millis)
        .unwrap_or(Instant::invalid())
}

/// The last representable millisecond of the same period: the next
/// period's start minus one millisecond.
pub fn end_of(input: impl ToInstant, unit: CalendarUnit) -> Instant {
    let Some(millis) = input.to_instant().millis() else {
        return Instant::invalid();
    };
    next_period_start(millis, unit)
        .and_then(|next| next.checked_sub(1))
        .map(Instant::from_millis)
        .unwrap_or(Instant::invalid())
}

fn period_start(millis: i64, unit: CalendarUnit) -> Option<i64> {
    let local = local_datetime(millis)?;
    let date = local.date_naive();

    let naive = match unit {
        CalendarUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
        CalendarUnit::Month => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)?
        }
        CalendarUnit::Week => week_start(date)?.and_hms_opt(0, 0, 0)?,
        CalendarUnit::Day => date.and_hms_opt(0, 0, 0)?,
        CalendarUnit::Hour => date.and_hms_opt(local.hour(), 0, 0)?,
        CalendarUnit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0)?,
        CalendarUnit::Second => {
            date.and_hms_opt(local.hour(), local.minute(), local.second())?
        }
    };

    Some(resolve_local(naive)?.timestamp_millis())
}

fn next_period_start(millis: i64, unit: CalendarUnit) -> Option<i64> {
    let local = local_datetime(millis)?;
    let date = local.date_naive();

    match unit {
        CalendarUnit::Year => {
            resolve_midnight(NaiveDate::from_ymd_opt(date.year().checked_add(1)?, 1, 1)?)
        }
        CalendarUnit::Month => {
            let (year, month) = if date.month() == 12 {
                (date.year().checked_add(1)?, 1)
            } else {
                (date.year(), date.month() + 1)
            };
            resolve_midnight(NaiveDate::from_ymd_opt(year, month, 1)?)
        }
        CalendarUnit::Week => {
            resolve_midnight(week_start(date)?.checked_add_signed(Duration::days(7))?)
        }
        CalendarUnit::Day => resolve_midnight(date.checked_add_signed(Duration::days(1))?),
        CalendarUnit::Hour => period_start(millis, CalendarUnit::Hour)?.checked_add(3_600_000),
        CalendarUnit::Minute => period_start(millis, CalendarUnit::Minute)?.checked_add(60_000),
        CalendarUnit::Second => period_start(millis, CalendarUnit::Second)?.checked_add(1_000),
    }
}

/// Monday of the ISO week containing `date`.
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let back = i64::from(date.weekday().num_days_from_monday());
    date.checked_sub_signed(Duration::days(back))
}

fn resolve_midnight(date: NaiveDate) -> Option<i64> {
    let naive = date.and_hms_opt(0, 0, 0)?;
    Some(resolve_local(naive)?.timestamp_millis())
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{is_after, is_before};
    use chrono::{Local, TimeZone, Weekday};

    fn local_instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from_millis(
            Local
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .unwrap()
                .timestamp_millis(),
        )
    }

    fn local_parts(instant: Instant) -> (i32, u32, u32, u32, u32, u32, u32) {
        let dt = local_datetime(instant.millis().unwrap()).unwrap();
        (
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.timestamp_subsec_millis(),
        )
    }

    #[test]
    fn test_start_of_year() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        assert_eq!(
            local_parts(start_of(d, CalendarUnit::Year)),
            (2026, 1, 1, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_start_of_month() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        assert_eq!(
            local_parts(start_of(d, CalendarUnit::Month)),
            (2026, 7, 1, 0, 0, 0, 0)
        );
    }

    #[test]
    fn test_start_of_week_from_wednesday() {
        // 2026-07-15 is a Wednesday; the week's Monday is July 13.
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        let start = start_of(d, CalendarUnit::Week);
        assert_eq!(local_parts(start), (2026, 7, 13, 0, 0, 0, 0));
        let weekday = local_datetime(start.millis().unwrap()).unwrap().weekday();
        assert_eq!(weekday, Weekday::Mon);
    }

    #[test]
    fn test_start_of_week_on_monday_midnight_is_identity() {
        let d = local_instant(2026, 7, 13, 0, 0, 0);
        assert_eq!(start_of(d, CalendarUnit::Week), d);
    }

    #[test]
    fn test_start_of_finer_units_truncate() {
        let base = local_instant(2026, 7, 15, 13, 45, 30);
        let with_millis = Instant::from_millis(base.millis().unwrap() + 250);

        assert_eq!(
            local_parts(start_of(with_millis, CalendarUnit::Day)),
            (2026, 7, 15, 0, 0, 0, 0)
        );
        assert_eq!(
            local_parts(start_of(with_millis, CalendarUnit::Hour)),
            (2026, 7, 15, 13, 0, 0, 0)
        );
        assert_eq!(
            local_parts(start_of(with_millis, CalendarUnit::Minute)),
            (2026, 7, 15, 13, 45, 0, 0)
        );
        assert_eq!(
            local_parts(start_of(with_millis, CalendarUnit::Second)),
            (2026, 7, 15, 13, 45, 30, 0)
        );
    }

    #[test]
    fn test_end_of_week_is_sunday_night() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        assert_eq!(
            local_parts(end_of(d, CalendarUnit::Week)),
            (2026, 7, 19, 23, 59, 59, 999)
        );
    }

    #[test]
    fn test_end_of_month_leap_february() {
        let d = local_instant(2024, 2, 10, 8, 0, 0);
        assert_eq!(
            local_parts(end_of(d, CalendarUnit::Month)),
            (2024, 2, 29, 23, 59, 59, 999)
        );
    }

    #[test]
    fn test_end_of_december_rolls_to_next_year() {
        let d = local_instant(2026, 12, 20, 8, 0, 0);
        assert_eq!(
            local_parts(end_of(d, CalendarUnit::Month)),
            (2026, 12, 31, 23, 59, 59, 999)
        );
        assert_eq!(
            local_parts(end_of(d, CalendarUnit::Year)),
            (2026, 12, 31, 23, 59, 59, 999)
        );
    }

    #[test]
    fn test_end_of_second_spans_999_millis() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        let start = start_of(d, CalendarUnit::Second);
        let end = end_of(d, CalendarUnit::Second);
        assert_eq!(end.millis().unwrap() - start.millis().unwrap(), 999);
    }

    #[test]
    fn test_start_of_is_idempotent() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        for unit in [
            CalendarUnit::Year,
            CalendarUnit::Month,
            CalendarUnit::Week,
            CalendarUnit::Day,
            CalendarUnit::Hour,
            CalendarUnit::Minute,
            CalendarUnit::Second,
        ] {
            let once = start_of(d, unit);
            assert_eq!(start_of(once, unit), once, "unit {unit:?}");
        }
    }

    #[test]
    fn test_period_contains_input() {
        let d = local_instant(2026, 7, 15, 13, 45, 30);
        for unit in [
            CalendarUnit::Year,
            CalendarUnit::Month,
            CalendarUnit::Week,
            CalendarUnit::Day,
            CalendarUnit::Hour,
            CalendarUnit::Minute,
            CalendarUnit::Second,
        ] {
            assert!(!is_after(start_of(d, unit), d), "unit {unit:?}");
            assert!(!is_before(end_of(d, unit), d), "unit {unit:?}");
        }
    }

    #[test]
    fn test_unit_parse_and_round_trip() {
        for unit in [
            CalendarUnit::Year,
            CalendarUnit::Month,
            CalendarUnit::Week,
            CalendarUnit::Day,
            CalendarUnit::Hour,
            CalendarUnit::Minute,
            CalendarUnit::Second,
        ] {
            assert_eq!(unit.as_str().parse::<CalendarUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_unit_parse_rejects_unknown_names() {
        let err = "fortnight".parse::<CalendarUnit>().unwrap_err();
        assert!(err.to_string().contains("Unsupported unit"), "got: {err}");
        assert!("Week".parse::<CalendarUnit>().is_err());
    }

    #[test]
    fn test_unit_serde() {
        assert_eq!(serde_json::to_string(&CalendarUnit::Week).unwrap(), "\"week\"");
        let parsed: CalendarUnit = serde_json::from_str("\"month\"").unwrap();
        assert_eq!(parsed, CalendarUnit::Month);
    }

    #[test]
    fn test_invalid_input_propagates() {
        assert!(!start_of("garbage", CalendarUnit::Day).is_valid());
        assert!(!end_of(Instant::invalid(), CalendarUnit::Week).is_valid());
    }
}
