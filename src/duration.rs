// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exact lengths of time.
//!
//! A [`Duration`] is a signed number of milliseconds on the absolute
//! timeline. Unlike a [`Period`] it needs no calendar to be interpreted. The
//! `standard_*` accessors assume 24-hour days, which always holds for the
//! fixed-offset chronologies of this crate.

use crate::error::{TimeError, TimeResult};
use crate::field_type::DurationFieldType;
use crate::gj::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::instant::TimeInstant;
use crate::interval::Interval;
use crate::period::Period;
use crate::safe::{safe_add, safe_multiply, safe_negate, safe_subtract, safe_to_i32};
use chrono::TimeDelta;
use qtty::{Day, Days, Seconds};
use std::fmt;

/// A length of time in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration {
    millis: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { millis: 0 };

    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub fn from_seconds(seconds: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_multiply(seconds, MILLIS_PER_SECOND)?))
    }

    pub fn standard_minutes_of(minutes: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_multiply(minutes, MILLIS_PER_MINUTE)?))
    }

    pub fn standard_hours_of(hours: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_multiply(hours, MILLIS_PER_HOUR)?))
    }

    pub fn standard_days_of(days: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_multiply(days, MILLIS_PER_DAY)?))
    }

    /// `end - start`.
    pub fn between(start: i64, end: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_subtract(end, start)?))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Whole seconds, truncated toward zero.
    pub const fn standard_seconds(&self) -> i64 {
        self.millis / MILLIS_PER_SECOND
    }

    pub const fn standard_minutes(&self) -> i64 {
        self.millis / MILLIS_PER_MINUTE
    }

    pub const fn standard_hours(&self) -> i64 {
        self.millis / MILLIS_PER_HOUR
    }

    pub const fn standard_days(&self) -> i64 {
        self.millis / MILLIS_PER_DAY
    }

    /// The length as a [`Seconds`] quantity.
    pub fn to_seconds(&self) -> Seconds {
        Seconds::new(self.millis as f64 / MILLIS_PER_SECOND as f64)
    }

    /// The length as a [`Days`] quantity.
    pub fn to_days(&self) -> Days {
        self.to_seconds().to::<Day>()
    }

    pub const fn is_longer_than(&self, other: Duration) -> bool {
        self.millis > other.millis
    }

    pub const fn is_shorter_than(&self, other: Duration) -> bool {
        self.millis < other.millis
    }

    // ── arithmetic ────────────────────────────────────────────────────

    pub fn plus(&self, other: Duration) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_add(self.millis, other.millis)?))
    }

    pub fn minus(&self, other: Duration) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_subtract(self.millis, other.millis)?))
    }

    pub fn negated(&self) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_negate(self.millis)?))
    }

    pub fn multiplied_by(&self, scalar: i64) -> TimeResult<Self> {
        Ok(Self::from_millis(safe_multiply(self.millis, scalar)?))
    }

    /// Truncating division. A zero divisor is reported as overflow.
    pub fn divided_by(&self, divisor: i64) -> TimeResult<Self> {
        self.millis
            .checked_div(divisor)
            .map(Self::from_millis)
            .ok_or_else(|| TimeError::overflow(format!("{} / {divisor}", self.millis)))
    }

    /// `self + scalar * other`.
    pub fn with_duration_added(&self, other: Duration, scalar: i64) -> TimeResult<Self> {
        if scalar == 0 {
            return Ok(*self);
        }
        let delta = safe_multiply(other.millis, scalar)?;
        Ok(Self::from_millis(safe_add(self.millis, delta)?))
    }

    // ── conversion ────────────────────────────────────────────────────

    /// The duration split into hours, minutes, seconds and millis.
    ///
    /// Days and larger units are left empty since their length is
    /// calendar dependent; the hour count may exceed 23.
    pub fn to_period(&self) -> TimeResult<Period> {
        let mut rest = self.millis;
        let mut period = Period::ZERO;
        for (unit, size) in [
            (DurationFieldType::Hours, MILLIS_PER_HOUR),
            (DurationFieldType::Minutes, MILLIS_PER_MINUTE),
            (DurationFieldType::Seconds, MILLIS_PER_SECOND),
            (DurationFieldType::Millis, 1),
        ] {
            period = period.with_field(unit, safe_to_i32(rest / size)?)?;
            rest %= size;
        }
        Ok(period)
    }

    /// The calendar period covered by this duration when it starts at
    /// `start`.
    pub fn to_period_from<T: TimeInstant + ?Sized>(&self, start: &T) -> TimeResult<Period> {
        let from = start.millis();
        let to = safe_add(from, self.millis)?;
        start
            .chronology()
            .period_values(crate::period::PeriodType::standard(), from, to)
    }

    /// The calendar period covered by this duration when it ends at `end`.
    pub fn to_period_to<T: TimeInstant + ?Sized>(&self, end: &T) -> TimeResult<Period> {
        let to = end.millis();
        let from = safe_subtract(to, self.millis)?;
        end.chronology()
            .period_values(crate::period::PeriodType::standard(), from, to)
    }

    /// `[start, start + self)`.
    pub fn to_interval_from<T: TimeInstant + ?Sized>(&self, start: &T) -> TimeResult<Interval> {
        Interval::with_start_duration(start, *self)
    }

    /// `[end - self, end)`.
    pub fn to_interval_to<T: TimeInstant + ?Sized>(&self, end: &T) -> TimeResult<Interval> {
        Interval::with_duration_end(*self, end)
    }

    /// The equivalent [`chrono::TimeDelta`].
    pub fn to_time_delta(&self) -> TimeResult<TimeDelta> {
        TimeDelta::try_milliseconds(self.millis)
            .ok_or_else(|| TimeError::overflow(format!("{} ms as TimeDelta", self.millis)))
    }
}

/// Sub-millisecond precision is truncated.
impl From<TimeDelta> for Duration {
    fn from(delta: TimeDelta) -> Self {
        Self::from_millis(delta.num_milliseconds())
    }
}

/// ISO-8601 text in seconds, e.g. `PT72.345S`.
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let abs = self.millis.unsigned_abs();
        let (seconds, millis) = (abs / 1_000, abs % 1_000);
        if millis == 0 {
            write!(f, "PT{sign}{seconds}S")
        } else {
            write!(f, "PT{sign}{seconds}.{millis:03}S")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::Chronology;
    use crate::date_time::DateTime;
    use crate::interval::ReadableInterval;
    use qtty::Second;

    #[test]
    fn standard_units_truncate_toward_zero() {
        let d = Duration::from_millis(-90_061_001);
        assert_eq!(d.standard_days(), -1);
        assert_eq!(d.standard_hours(), -25);
        assert_eq!(d.standard_seconds(), -90_061);
        assert_eq!(Duration::standard_days_of(2).unwrap().standard_hours(), 48);
        assert!(Duration::standard_days_of(i64::MAX / 1_000).is_err());
    }

    #[test]
    fn arithmetic_is_checked() {
        let a = Duration::from_millis(1_500);
        assert_eq!(a.plus(a).unwrap().millis(), 3_000);
        assert_eq!(a.minus(a), Ok(Duration::ZERO));
        assert!(Duration::from_millis(i64::MIN).negated().is_err());
        assert!(Duration::from_millis(i64::MAX).plus(a).is_err());
        assert_eq!(a.with_duration_added(a, -2).unwrap().millis(), -1_500);
        assert_eq!(a.divided_by(2).unwrap().millis(), 750);
        assert!(a.divided_by(0).is_err());
        assert!(a.is_longer_than(Duration::ZERO));
        assert!(Duration::ZERO.is_shorter_than(a));
    }

    #[test]
    fn quantities_use_physical_units() {
        let d = Duration::standard_hours_of(36).unwrap();
        assert!((d.to_days() - Days::new(1.5)).abs() < Days::new(1e-12));
        assert_eq!(d.to_seconds().to::<Second>(), Seconds::new(129_600.0));
    }

    #[test]
    fn to_period_uses_time_units_only() {
        let d = Duration::from_millis(2 * MILLIS_PER_DAY + 3 * MILLIS_PER_MINUTE + 4_005);
        let p = d.to_period().unwrap();
        assert_eq!(p.days(), 0);
        assert_eq!(p.hours(), 48);
        assert_eq!(p.minutes(), 3);
        assert_eq!(p.seconds(), 4);
        assert_eq!(p.millis(), 5);
        assert!(Duration::from_millis(i64::MAX).to_period().is_err());
    }

    #[test]
    fn anchored_conversions() {
        let start = DateTime::new_in(2004, 2, 1, 0, 0, 0, 0, Chronology::iso()).unwrap();
        let d = Duration::standard_days_of(29).unwrap();
        assert_eq!(d.to_period_from(&start), Ok(Period::of_months(1)));

        let interval = d.to_interval_from(&start).unwrap();
        assert_eq!(interval.start_millis(), start.millis());
        assert_eq!(interval.to_duration(), Ok(d));
        assert_eq!(d.to_interval_to(&start).unwrap().end_millis(), start.millis());
        assert!(Duration::from_millis(-1).to_interval_from(&start).is_err());
    }

    #[test]
    fn time_delta_round_trip() {
        let delta = TimeDelta::milliseconds(-1_234);
        let d = Duration::from(delta);
        assert_eq!(d.millis(), -1_234);
        assert_eq!(d.to_time_delta(), Ok(delta));
        assert!(Duration::from_millis(i64::MIN).to_time_delta().is_err());
    }

    #[test]
    fn display_is_iso_seconds() {
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert_eq!(Duration::from_millis(72_345).to_string(), "PT72.345S");
        assert_eq!(Duration::from_millis(-500).to_string(), "PT-0.500S");
        assert_eq!(Duration::from_millis(60_000).to_string(), "PT60S");
    }
}
