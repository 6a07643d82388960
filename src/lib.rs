// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar arithmetic over millisecond instants.
//!
//! Instants are signed milliseconds since 1970-01-01T00:00:00Z. A
//! [`Chronology`] gives them calendar meaning through a set of fields and
//! units; all arithmetic is overflow-checked and every failure surfaces as a
//! [`TimeError`].
//!
//! # Core types
//!
//! - [`Chronology`]: a calendar system at a fixed UTC offset, shared
//!   process-wide.
//! - [`DateTimeField`] / [`DurationField`]: one calendar axis / one unit of
//!   length.
//! - [`Instant`], [`DateTime`], [`MutableDateTime`]: points in time.
//! - [`LocalTime`]: a time of day without date or offset.
//! - [`Duration`]: an exact number of milliseconds.
//! - [`Period`] / [`PeriodType`]: calendar unit counts, resolved against an
//!   instant.
//! - [`Interval`] / [`MutableInterval`]: half-open `[start, end)` spans.
//! - [`TimeInstant`] / [`ReadableInterval`]: the traits the above share.
//!
//! # Calendars
//!
//! | Kind | Years | Eras |
//! |------|-------|------|
//! | [`CalendarKind::Iso`] | proleptic Gregorian, ISO-8601 weeks | `BC` = 0, `AD` = 1 |
//! | [`CalendarKind::Buddhist`] | ISO year + 543 | `BE` = 1 only |
//!
//! # Errors
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `Overflow` | a result leaves the 64-bit range |
//! | `FieldOutOfRange` | a field value is outside its bounds at that instant |
//! | `InvalidInterval` | an interval would end before it starts |
//! | `UnsupportedOperation` | the chronology does not model the unit or field |
//! | `InvalidText` | a textual value is not recognised |
//!
//! # Configuration
//!
//! Constructors without an explicit chronology use [`TimeConfig`], read from
//! `TEMPOCAL_CALENDAR` and `TEMPOCAL_OFFSET_SECONDS` by
//! [`TimeConfig::from_env`] and installed once per process.

pub mod buddhist;
pub mod chronology;
pub mod config;
mod date_time;
mod duration;
pub mod duration_field;
mod error;
pub mod field;
mod field_type;
pub mod gj;
mod instant;
mod interval;
mod local_time;
mod period;
pub mod safe;
pub mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use chronology::{CalendarKind, Chronology};
pub use config::TimeConfig;
pub use date_time::{DateTime, MutableDateTime, Property, Rounding};
pub use duration::Duration;
pub use duration_field::DurationField;
pub use error::{TimeError, TimeResult};
pub use field::DateTimeField;
pub use field_type::{DateTimeFieldType, DurationFieldType};
pub use instant::{Instant, TimeInstant};
pub use interval::{complement_within, intersect_intervals, Interval, MutableInterval, ReadableInterval};
pub use local_time::LocalTime;
pub use period::{Period, PeriodType};
