//! Human-readable relative-time phrasing.

use crate::compare::{diff, DiffUnit};
use crate::instant::{now, ToInstant};

/// Phrase the offset from `from` to `to`.
///
/// Buckets by absolute elapsed time with round-to-nearest counts, and each
/// count is rounded *before* its threshold comparison (59.6 raw seconds
/// rounds to 60 and lands in the minutes bucket). Under ten rounded
/// seconds the phrase is `"in a moment"` / `"just now"`; then seconds,
/// minutes, and hours buckets (`"in 5 min"`, `"3 hr ago"`); then days,
/// with the one special-cased plural (`"1 day"` vs `"2 days"`). One
/// language is baked in — there is no localization hook.
pub fn relative_time(to: impl ToInstant, from: impl ToInstant) -> String {
    let millis = diff(to, from, DiffUnit::Millis);
    let future = millis > 0.0;
    let magnitude = millis.abs();

    let seconds = (magnitude / 1e3).round();
    let minutes = (magnitude / 6e4).round();
    let hours = (magnitude / 3.6e6).round();
    let days = (magnitude / 8.64e7).round();

    if seconds < 10.0 {
        return if future { "in a moment" } else { "just now" }.to_string();
    }
    if seconds < 60.0 {
        return phrase(seconds, "sec", future);
    }
    if minutes < 60.0 {
        return phrase(minutes, "min", future);
    }
    if hours < 24.0 {
        return phrase(hours, "hr", future);
    }
    let unit = if days == 1.0 { "day" } else { "days" };
    phrase(days, unit, future)
}

/// Phrase the offset from the current wall clock to `to`.
pub fn relative_time_from_now(to: impl ToInstant) -> String {
    relative_time(to, now())
}

fn phrase(count: f64, unit: &str, future: bool) -> String {
    if future {
        format!("in {count} {unit}")
    } else {
        format!("{count} {unit} ago")
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
