//! The [`Instant`] value type, conversion and validity, and clocks.
//!
//! An `Instant` is one point in time at millisecond resolution. Conversion
//! into it is deliberately total: strings that fail to parse and non-finite
//! numbers produce the *invalid* instant rather than an error, and
//! [`is_valid`] (or [`Instant::is_valid`]) is the check callers apply before
//! operations that insist on a real point in time.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{DateMathError, Result};

// ── Instant ─────────────────────────────────────────────────────────────────

/// One point in time, stored as signed milliseconds since
/// 1970-01-01T00:00:00.000Z, or the not-a-time sentinel.
///
/// Calendar-field operations (year through second) interpret the count in
/// host local time; ISO week numbering depends only on the calendar date.
/// `Instant` is immutable — every operation that "modifies" one returns a
/// new value.
///
/// Serializes transparently as the epoch-millisecond number, or `null` when
/// invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant {
    millis: Option<i64>,
}

impl Instant {
    /// An instant at the given epoch-millisecond count.
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis: Some(millis),
        }
    }

    /// The not-a-time sentinel.
    pub const fn invalid() -> Self {
        Self { millis: None }
    }

    /// An instant from a possibly non-finite epoch-millisecond value.
    /// NaN and infinities yield the invalid instant.
    pub fn from_epoch_f64(millis: f64) -> Self {
        if millis.is_finite() {
            Self::from_millis(millis as i64)
        } else {
            Self::invalid()
        }
    }

    /// Lenient parse. Accepts RFC 3339 date-times (offset or `Z`), naive
    /// `YYYY-MM-DDTHH:MM[:SS[.fff]]` date-times (and the space-separated
    /// variant) interpreted in host local time, and date-only `YYYY-MM-DD`
    /// interpreted as UTC midnight. Never fails: anything else yields the
    /// invalid instant.
    pub fn parse(text: &str) -> Self {
        Self {
            millis: parse_lenient(text),
        }
    }

    /// The epoch-millisecond count, or `None` for the invalid instant.
    pub const fn millis(self) -> Option<i64> {
        self.millis
    }

    /// Whether this instant holds a real millisecond count.
    pub const fn is_valid(self) -> bool {
        self.millis.is_some()
    }

    /// The millisecond count, or `InvalidInput` for operations that refuse
    /// invalid operands.
    pub(crate) fn valid_millis(self) -> Result<i64> {
        self.millis
            .ok_or_else(|| DateMathError::InvalidInput("not a finite instant".to_string()))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.millis.and_then(local_datetime) {
            Some(local) => f.write_str(&local.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("invalid"),
        }
    }
}

impl FromStr for Instant {
    type Err = DateMathError;

    /// Strict parsing door: same grammar as [`Instant::parse`], but
    /// unrecognized text is an error instead of an invalid value.
    fn from_str(s: &str) -> Result<Self> {
        parse_lenient(s)
            .map(Self::from_millis)
            .ok_or_else(|| DateMathError::InvalidInput(format!("'{s}' is not a recognized date-time")))
    }
}

// ── Conversion ──────────────────────────────────────────────────────────────

/// Conversion into an [`Instant`].
///
/// Implemented for `Instant` itself (an independent copy), strings (lenient
/// parse), and numeric epoch-millisecond values. Public operations take
/// `impl ToInstant` operands and convert each one independently.
pub trait ToInstant {
    fn to_instant(&self) -> Instant;
}

impl<T: ToInstant + ?Sized> ToInstant for &T {
    fn to_instant(&self) -> Instant {
        (**self).to_instant()
    }
}

impl ToInstant for Instant {
    fn to_instant(&self) -> Instant {
        *self
    }
}

impl ToInstant for str {
    fn to_instant(&self) -> Instant {
        Instant::parse(self)
    }
}

impl ToInstant for String {
    fn to_instant(&self) -> Instant {
        Instant::parse(self)
    }
}

impl ToInstant for i64 {
    fn to_instant(&self) -> Instant {
        Instant::from_millis(*self)
    }
}

impl ToInstant for f64 {
    fn to_instant(&self) -> Instant {
        Instant::from_epoch_f64(*self)
    }
}

/// Convert any accepted input into an independent [`Instant`]. Never fails;
/// unusable input produces an invalid instant, detectable via [`is_valid`].
pub fn to_instant(input: impl ToInstant) -> Instant {
    input.to_instant()
}

/// Whether `input` converts to a valid instant.
pub fn is_valid(input: impl ToInstant) -> bool {
    input.to_instant().is_valid()
}

/// Strict parse: `Some` only for text that produces a valid instant.
///
/// # Examples
///
/// ```
/// use datemath::parse_iso;
///
/// assert!(parse_iso("2024-03-15T10:00:00Z").is_some());
/// assert!(parse_iso("not-a-date").is_none());
/// ```
pub fn parse_iso(text: &str) -> Option<Instant> {
    let instant = Instant::parse(text);
    instant.is_valid().then_some(instant)
}

// ── Clocks ──────────────────────────────────────────────────────────────────

/// A source of "now". Production code reads [`SystemClock`]; tests can pin
/// the anchor with [`FixedClock`].
pub trait Clock {
    /// The current instant according to this clock.
    fn now(&self) -> Instant;
}

/// The host wall clock, read through `chrono::Utc::now()` (the OS kernel
/// clock, NTP-synchronized on modern systems).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_millis(Utc::now().timestamp_millis())
    }
}

/// A clock pinned to one instant, for tests and simulation.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

/// Capture the current wall-clock time. Each call reads the clock afresh.
pub fn now() -> Instant {
    SystemClock.now()
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Naive (offset-less) date-time formats, interpreted in host local time.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_lenient(text: &str) -> Option<i64> {
    let s = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return resolve_local(naive).map(|dt| dt.timestamp_millis());
        }
    }

    // Date-only forms denote UTC midnight.
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).timestamp_millis());
    }

    None
}

/// Interpret an epoch-millisecond count in host local time. `None` when the
/// count falls outside the representable date-time range.
pub(crate) fn local_datetime(millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(millis).single()
}

/// Resolve a local wall-clock reading back to an instant. Fall-back
/// ambiguity resolves to the earlier instant; a spring-forward gap slides
/// the wall clock forward one hour.
pub(crate) fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(Duration::hours(1))?;
            match Local.from_local_datetime(&shifted) {
                LocalResult::Single(dt) => Some(dt),
                LocalResult::Ambiguous(earlier, _) => Some(earlier),
                LocalResult::None => None,
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
