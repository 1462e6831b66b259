//! Differences, ordering predicates, and range clamping.

use serde::{Deserialize, Serialize};

use crate::instant::{Instant, ToInstant};

/// Fixed conversion units for [`diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffUnit {
    #[default]
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DiffUnit {
    /// Map a unit symbol (`"ms"`, `"s"`, `"m"`, `"h"`, `"d"`). Anything
    /// unrecognized falls back to milliseconds rather than failing — the
    /// deliberate counterpart to the strict parse on
    /// [`CalendarUnit`](crate::CalendarUnit).
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "ms" => Self::Millis,
            "s" => Self::Seconds,
            "m" => Self::Minutes,
            "h" => Self::Hours,
            "d" => Self::Days,
            _ => Self::Millis,
        }
    }

    fn divisor(self) -> f64 {
        match self {
            Self::Millis => 1.0,
            Self::Seconds => 1e3,
            Self::Minutes => 6e4,
            Self::Hours => 3.6e6,
            Self::Days => 8.64e7,
        }
    }
}

/// Signed difference `a - b` expressed in `unit`.
///
/// The result is a real number — fractional and negative values included —
/// and NaN when either operand fails to convert to a valid instant.
pub fn diff(a: impl ToInstant, b: impl ToInstant, unit: DiffUnit) -> f64 {
    match (a.to_instant().millis(), b.to_instant().millis()) {
        (Some(a), Some(b)) => (a as f64 - b as f64) / unit.divisor(),
        _ => f64::NAN,
    }
}

/// True iff `a` is strictly earlier than `b`. Invalid operands compare
/// false.
pub fn is_before(a: impl ToInstant, b: impl ToInstant) -> bool {
    matches!(
        (a.to_instant().millis(), b.to_instant().millis()),
        (Some(a), Some(b)) if a < b
    )
}

/// True iff `a` is strictly later than `b`. Invalid operands compare false.
pub fn is_after(a: impl ToInstant, b: impl ToInstant) -> bool {
    matches!(
        (a.to_instant().millis(), b.to_instant().millis()),
        (Some(a), Some(b)) if a > b
    )
}

/// True iff `a` and `b` hold the same millisecond count. Invalid operands
/// compare false, including against each other.
pub fn is_equal(a: impl ToInstant, b: impl ToInstant) -> bool {
    matches!(
        (a.to_instant().millis(), b.to_instant().millis()),
        (Some(a), Some(b)) if a == b
    )
}

/// Clamp an instant to the `[min, max]` range.
///
/// Two one-sided comparisons applied in sequence: an input below `min`
/// returns `min`, then an input above `max` returns `max`. When
/// `max < min` the comparisons still run in that order, so this is *not* a
/// symmetric clamp for inverted ranges. Invalid comparisons fall through
/// to returning the converted input.
pub fn clamp(input: impl ToInstant, min: impl ToInstant, max: impl ToInstant) -> Instant {
    let instant = input.to_instant();
    let min = min.to_instant();
    let max = max.to_instant();

    if is_before(instant, min) {
        return min;
    }
    if is_after(instant, max) {
        return max;
    }
    instant
}

// ── Tests ───────────────────────────────────────────────────────────────────
