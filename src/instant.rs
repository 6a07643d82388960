// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Points on the absolute timeline.
//!
//! Every instant in the crate is a signed count of milliseconds since
//! 1970-01-01T00:00:00Z. [`Instant`] is the bare count; calendar-aware values
//! such as [`DateTime`] pair it with a [`Chronology`]. The [`TimeInstant`]
//! trait is what intervals, periods and durations accept, so any of them
//! (and `chrono::DateTime<Utc>`) can be used as an endpoint or anchor.

use crate::chronology::Chronology;
use crate::date_time::{DateTime, MutableDateTime};
use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::field_type::DateTimeFieldType;
use crate::safe::{safe_add, safe_subtract};
use chrono::{FixedOffset, Utc};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that represent a point in time.
///
/// Implementors provide the millisecond instant and the chronology used to
/// interpret it; everything else has a default.
pub trait TimeInstant {
    /// Milliseconds since 1970-01-01T00:00:00Z.
    fn millis(&self) -> i64;

    /// The calendar system used to read fields of this instant.
    fn chronology(&self) -> Chronology;

    /// The bare instant, dropping the chronology.
    fn to_instant(&self) -> Instant {
        Instant::from_millis(self.millis())
    }

    /// Convert to `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        chrono::DateTime::from_timestamp_millis(self.millis())
    }

    /// The value of `field_type` under this instant's chronology.
    fn get(&self, field_type: DateTimeFieldType) -> i32 {
        self.chronology().field(field_type).get(self.millis())
    }

    fn is_before<T: TimeInstant + ?Sized>(&self, other: &T) -> bool {
        self.millis() < other.millis()
    }

    fn is_after<T: TimeInstant + ?Sized>(&self, other: &T) -> bool {
        self.millis() > other.millis()
    }

    /// Same instant, regardless of chronology.
    fn is_equal<T: TimeInstant + ?Sized>(&self, other: &T) -> bool {
        self.millis() == other.millis()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A millisecond instant with no calendar attached.
///
/// Fields are read in ISO at UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant {
    millis: i64,
}

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const EPOCH: Instant = Instant { millis: 0 };

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// The current system time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Build an instant from a `chrono::DateTime<Utc>`, truncating to the
    /// millisecond.
    pub fn from_utc(datetime: chrono::DateTime<Utc>) -> Self {
        Self::from_millis(datetime.timestamp_millis())
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    pub fn to_utc(&self) -> TimeResult<chrono::DateTime<Utc>> {
        chrono::DateTime::from_timestamp_millis(self.millis)
            .ok_or_else(|| TimeError::overflow(format!("{} ms as chrono::DateTime", self.millis)))
    }

    pub fn plus(&self, duration: Duration) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_add(self.millis, duration.millis())?))
    }

    pub fn minus(&self, duration: Duration) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_subtract(self.millis, duration.millis())?))
    }

    /// The same instant in ISO at UTC.
    pub fn to_date_time(&self) -> DateTime {
        DateTime::from_millis_in(self.millis, Chronology::iso())
    }

    /// The same instant under `chronology`.
    pub fn to_date_time_in(&self, chronology: Chronology) -> DateTime {
        DateTime::from_millis_in(self.millis, chronology)
    }

    /// The same instant in ISO at `zone`.
    pub fn in_zone(&self, zone: FixedOffset) -> DateTime {
        DateTime::from_millis_in(self.millis, Chronology::iso_in(zone))
    }
}

impl From<chrono::DateTime<Utc>> for Instant {
    fn from(datetime: chrono::DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl TimeInstant for Instant {
    #[inline]
    fn millis(&self) -> i64 {
        self.millis
    }

    fn chronology(&self) -> Chronology {
        Chronology::iso()
    }
}

impl TimeInstant for DateTime {
    #[inline]
    fn millis(&self) -> i64 {
        DateTime::millis(self)
    }

    #[inline]
    fn chronology(&self) -> Chronology {
        DateTime::chronology(self)
    }
}

impl TimeInstant for MutableDateTime {
    #[inline]
    fn millis(&self) -> i64 {
        MutableDateTime::millis(self)
    }

    #[inline]
    fn chronology(&self) -> Chronology {
        MutableDateTime::chronology(self)
    }
}

impl TimeInstant for chrono::DateTime<Utc> {
    fn millis(&self) -> i64 {
        self.timestamp_millis()
    }

    fn chronology(&self) -> Chronology {
        Chronology::iso()
    }

    fn to_utc(&self) -> Option<chrono::DateTime<Utc>> {
        Some(*self)
    }
}

/// ISO-8601 at UTC, e.g. `2002-06-09T05:06:07.008Z`.
impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_date_time(), f)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gj::MILLIS_PER_DAY;

    #[test]
    fn utc_roundtrip_keeps_millis() {
        let datetime = chrono::DateTime::from_timestamp(946_728_000, 123_000_000).unwrap();
        let instant = Instant::from_utc(datetime);
        assert_eq!(instant.millis(), 946_728_000_123);
        assert_eq!(instant.to_utc(), Ok(datetime));
        assert_eq!(TimeInstant::millis(&datetime), instant.millis());
    }

    #[test]
    fn to_utc_fails_outside_chrono_range() {
        assert!(Instant::from_millis(i64::MAX).to_utc().is_err());
        assert_eq!(TimeInstant::to_utc(&Instant::from_millis(i64::MIN)), None);
    }

    #[test]
    fn comparisons_ignore_chronology() {
        let a = Instant::from_millis(10);
        let b = DateTime::from_millis_in(10, Chronology::buddhist());
        let c = Instant::from_millis(11);
        assert!(a.is_equal(&b));
        assert!(a.is_before(&c));
        assert!(c.is_after(&b));
        assert!(a < c);
    }

    #[test]
    fn arithmetic_reports_overflow() {
        let day = Duration::from_millis(MILLIS_PER_DAY);
        assert_eq!(Instant::EPOCH.plus(day).unwrap().millis(), MILLIS_PER_DAY);
        assert_eq!(Instant::EPOCH.minus(day).unwrap().millis(), -MILLIS_PER_DAY);
        assert!(Instant::from_millis(i64::MAX).plus(day).is_err());
    }

    #[test]
    fn fields_read_in_iso_utc() {
        let t = Instant::from_millis(MILLIS_PER_DAY - 1);
        assert_eq!(t.get(DateTimeFieldType::Year), 1970);
        assert_eq!(t.get(DateTimeFieldType::HourOfDay), 23);
        assert_eq!(t.get(DateTimeFieldType::DayOfWeek), 4);
        assert_eq!(t.to_string(), "1970-01-01T23:59:59.999Z");

        let plus_two = t.in_zone(FixedOffset::east_opt(7_200).unwrap());
        assert_eq!(plus_two.day_of_month(), 2);
        assert_eq!(plus_two.to_string(), "1970-01-02T01:59:59.999+02:00");
    }
}
