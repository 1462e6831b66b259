//! Token-pattern rendering of local calendar fields.

use chrono::{Datelike, Timelike};

use crate::error::{DateMathError, Result};
use crate::instant::{local_datetime, ToInstant};

/// Render an instant through a token pattern.
///
/// The local-time fields substitute for the literal tokens `YYYY`, `MM`,
/// `DD`, `HH`, `mm`, `ss`, applied case-sensitively in that fixed order,
/// left to right and non-overlapping. Every occurrence of a token is
/// replaced; tokens may repeat or appear in any order; unrecognized text
/// passes through unchanged. All fields except the year are zero-padded to
/// two digits.
///
/// # Errors
///
/// Returns [`DateMathError::InvalidInput`] when `input` does not resolve to
/// a valid instant.
///
/// # Examples
///
/// ```
/// use datemath::{format, now};
///
/// let stamp = format(now(), "YYYY-MM-DD HH:mm:ss").unwrap();
/// assert_eq!(stamp.len(), 19);
/// ```
pub fn format(input: impl ToInstant, pattern: &str) -> Result<String> {
    let millis = input.to_instant().valid_millis()?;
    let local = local_datetime(millis).ok_or_else(|| {
        DateMathError::InvalidInput("instant is outside the formattable range".to_string())
    })?;

    // Fixed application order; `mm`/`MM` stay disjoint because matching is
    // case-sensitive.
    let substitutions = [
        ("YYYY", format!("{:04}", local.year())),
        ("MM", format!("{:02}", local.month())),
        ("DD", format!("{:02}", local.day())),
        ("HH", format!("{:02}", local.hour())),
        ("mm", format!("{:02}", local.minute())),
        ("ss", format!("{:02}", local.second())),
    ];

    let mut rendered = pattern.to_string();
    for (token, value) in &substitutions {
        rendered = rendered.replace(token, value);
    }
    Ok(rendered)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instant::Instant;
    use chrono::{Local, TimeZone};

    fn local_instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from_millis(
            Local
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .unwrap()
                .timestamp_millis(),
        )
    }

    #[test]
    fn test_format_full_timestamp() {
        let instant = local_instant(1970, 1, 1, 0, 0, 0);
        assert_eq!(
            format(instant, "YYYY-MM-DD HH:mm:ss").unwrap(),
            "1970-01-01 00:00:00"
        );
    }

    #[test]
    fn test_format_zero_padding() {
        let instant = local_instant(2026, 3, 5, 7, 8, 9);
        assert_eq!(
            format(instant, "YYYY-MM-DD HH:mm:ss").unwrap(),
            "2026-03-05 07:08:09"
        );
    }

    #[test]
    fn test_format_repeated_tokens() {
        let instant = local_instant(2026, 3, 5, 0, 0, 0);
        assert_eq!(format(instant, "YYYY/YYYY").unwrap(), "2026/2026");
    }

    #[test]
    fn test_format_case_sensitive_tokens() {
        // MM is the month, mm the minute.
        let instant = local_instant(2026, 3, 5, 10, 7, 0);
        assert_eq!(format(instant, "MM mm").unwrap(), "03 07");
    }

    #[test]
    fn test_format_unrecognized_passthrough() {
        let instant = local_instant(2026, 3, 5, 10, 0, 0);
        assert_eq!(
            format(instant, "DD [at] HH o'clock").unwrap(),
            "05 [at] 10 o'clock"
        );
    }

    #[test]
    fn test_format_empty_pattern() {
        let instant = local_instant(2026, 3, 5, 10, 0, 0);
        assert_eq!(format(instant, "").unwrap(), "");
    }

    #[test]
    fn test_format_rejects_invalid_input() {
        let err = format("not-a-date", "YYYY").unwrap_err();
        assert!(err.to_string().contains("Invalid input"), "got: {err}");
    }
}
