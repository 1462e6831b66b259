//! # datemath
//!
//! Calendar arithmetic over epoch-millisecond instants.
//!
//! A deliberately small, flat function surface on top of `chrono`: every
//! operation is a pure, synchronous transformation of an [`Instant`] — an
//! immutable point in time that callers can hand in as an existing
//! `Instant`, a date string, or a numeric epoch value. Calendar fields
//! (year through second) are interpreted in host local time; ISO week
//! numbering depends only on the calendar date.
//!
//! Conversion is total: unusable input produces an *invalid* instant
//! rather than an error, and only [`format()`], [`add`], and [`sub`]
//! insist on valid operands. Everything else degrades — [`diff`] goes
//! NaN, the ordering predicates go false, boundaries propagate
//! invalidity.
//!
//! ## Modules
//!
//! - [`instant`] — the `Instant` value, conversion and validity, clocks
//! - [`format`](mod@format) — token-pattern rendering of local calendar fields
//! - [`duration`] — `CalendarDuration` and calendar add/subtract
//! - [`compare`] — differences, ordering predicates, clamping
//! - [`boundary`] — start/end of the enclosing calendar period
//! - [`week`] — ISO-8601 week numbering
//! - [`relative`] — human-readable relative-time phrasing
//! - [`error`] — error types

pub mod boundary;
pub mod compare;
pub mod duration;
pub mod error;
pub mod format;
pub mod instant;
pub mod relative;
pub mod week;

pub use boundary::{end_of, start_of, CalendarUnit};
pub use compare::{clamp, diff, is_after, is_before, is_equal, DiffUnit};
pub use duration::{add, sub, CalendarDuration};
pub use error::DateMathError;
pub use format::format;
pub use instant::{
    is_valid, now, parse_iso, to_instant, Clock, FixedClock, Instant, SystemClock, ToInstant,
};
pub use relative::{relative_time, relative_time_from_now};
pub use week::week_of_year;
