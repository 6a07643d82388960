// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time of day without a date or offset.

use crate::chronology::Chronology;
use crate::error::{TimeError, TimeResult};
use crate::field_type::{DateTimeFieldType, DurationFieldType};
use crate::gj::MILLIS_PER_DAY;
use crate::instant::{Instant, TimeInstant};
use crate::period::Period;
use std::cmp::Ordering;
use std::fmt;

/// A wall-clock time between `00:00:00.000` and `23:59:59.999`.
///
/// Held as milliseconds of the day under the UTC variant of a chronology;
/// arithmetic wraps around midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LocalTime {
    millis_of_day: i32,
    chronology: Chronology,
}

const fn is_time_field(field_type: DateTimeFieldType) -> bool {
    matches!(
        field_type,
        DateTimeFieldType::HourOfDay
            | DateTimeFieldType::MinuteOfDay
            | DateTimeFieldType::MinuteOfHour
            | DateTimeFieldType::SecondOfDay
            | DateTimeFieldType::SecondOfMinute
            | DateTimeFieldType::MillisOfDay
            | DateTimeFieldType::MillisOfSecond
    )
}

impl LocalTime {
    pub fn midnight() -> Self {
        Self::from_millis_of_day(0)
    }

    /// An ISO time, validated field by field.
    pub fn new(
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<Self> {
        Self::new_in(
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
            Chronology::iso(),
        )
    }

    pub fn new_in(
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
        chronology: Chronology,
    ) -> TimeResult<Self> {
        let c = chronology.with_utc();
        let mut instant = c.hour_of_day().set(0, hour_of_day)?;
        instant = c.minute_of_hour().set(instant, minute_of_hour)?;
        instant = c.second_of_minute().set(instant, second_of_minute)?;
        instant = c.millis_of_second().set(instant, millis_of_second)?;
        Ok(Self::from_millis_of_day_in(instant, c))
    }

    /// Wraps `millis` into a single day, so `-1` is `23:59:59.999`.
    pub fn from_millis_of_day(millis: i64) -> Self {
        Self::from_millis_of_day_in(millis, Chronology::iso())
    }

    pub fn from_millis_of_day_in(millis: i64, chronology: Chronology) -> Self {
        // always in [0, MILLIS_PER_DAY)
        let millis_of_day = millis.rem_euclid(MILLIS_PER_DAY) as i32;
        Self {
            millis_of_day,
            chronology: chronology.with_utc(),
        }
    }

    /// The local time of day of `instant` in its own chronology.
    pub fn from_instant<T: TimeInstant + ?Sized>(instant: &T) -> Self {
        let chronology = instant.chronology();
        let millis_of_day = chronology.millis_of_day().get(instant.millis());
        Self::from_millis_of_day_in(i64::from(millis_of_day), chronology)
    }

    /// The current time of day at UTC.
    pub fn now() -> Self {
        Self::from_instant(&Instant::now())
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub const fn chronology(&self) -> Chronology {
        self.chronology
    }

    pub const fn millis_of_day(&self) -> i32 {
        self.millis_of_day
    }

    /// The value of a time-of-day field; date fields are unsupported.
    pub fn get(&self, field_type: DateTimeFieldType) -> TimeResult<i32> {
        if !is_time_field(field_type) {
            return Err(TimeError::unsupported(field_type.name(), "LocalTime::get"));
        }
        Ok(self
            .chronology
            .field(field_type)
            .get(i64::from(self.millis_of_day)))
    }

    fn time_value(&self, field_type: DateTimeFieldType) -> i32 {
        self.chronology
            .field(field_type)
            .get(i64::from(self.millis_of_day))
    }

    pub fn hour_of_day(&self) -> i32 {
        self.time_value(DateTimeFieldType::HourOfDay)
    }

    pub fn minute_of_hour(&self) -> i32 {
        self.time_value(DateTimeFieldType::MinuteOfHour)
    }

    pub fn second_of_minute(&self) -> i32 {
        self.time_value(DateTimeFieldType::SecondOfMinute)
    }

    pub fn millis_of_second(&self) -> i32 {
        self.time_value(DateTimeFieldType::MillisOfSecond)
    }

    // ── copies ────────────────────────────────────────────────────────

    /// A copy with one time-of-day field replaced.
    pub fn with_field(&self, field_type: DateTimeFieldType, value: i32) -> TimeResult<Self> {
        if !is_time_field(field_type) {
            return Err(TimeError::unsupported(field_type.name(), "LocalTime::with_field"));
        }
        let millis = self
            .chronology
            .field(field_type)
            .set(i64::from(self.millis_of_day), value)?;
        Ok(Self::from_millis_of_day_in(millis, self.chronology))
    }

    pub fn with_hour_of_day(&self, hour: i32) -> TimeResult<Self> {
        self.with_field(DateTimeFieldType::HourOfDay, hour)
    }

    pub fn with_minute_of_hour(&self, minute: i32) -> TimeResult<Self> {
        self.with_field(DateTimeFieldType::MinuteOfHour, minute)
    }

    pub fn with_second_of_minute(&self, second: i32) -> TimeResult<Self> {
        self.with_field(DateTimeFieldType::SecondOfMinute, second)
    }

    pub fn with_millis_of_second(&self, millis: i32) -> TimeResult<Self> {
        self.with_field(DateTimeFieldType::MillisOfSecond, millis)
    }

    fn plus_unit(&self, unit: DurationFieldType, amount: i64) -> TimeResult<Self> {
        let instant = self
            .chronology
            .duration_field(unit)
            .add(i64::from(self.millis_of_day), amount)?;
        Ok(Self::from_millis_of_day_in(instant, self.chronology))
    }

    pub fn plus_hours(&self, hours: i64) -> TimeResult<Self> {
        self.plus_unit(DurationFieldType::Hours, hours)
    }

    pub fn plus_minutes(&self, minutes: i64) -> TimeResult<Self> {
        self.plus_unit(DurationFieldType::Minutes, minutes)
    }

    pub fn plus_seconds(&self, seconds: i64) -> TimeResult<Self> {
        self.plus_unit(DurationFieldType::Seconds, seconds)
    }

    pub fn plus_millis(&self, millis: i64) -> TimeResult<Self> {
        self.plus_unit(DurationFieldType::Millis, millis)
    }

    /// Adds `scalar` times `period`; whole days fall away.
    pub fn with_period_added(&self, period: &Period, scalar: i32) -> TimeResult<Self> {
        let instant = self
            .chronology
            .add_period(period, i64::from(self.millis_of_day), scalar)?;
        Ok(Self::from_millis_of_day_in(instant, self.chronology))
    }
}

/// Ordered by time of day; times under different calendars do not compare.
impl PartialOrd for LocalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.chronology != other.chronology {
            return None;
        }
        Some(self.millis_of_day.cmp(&other.millis_of_day))
    }
}

/// `HH:MM:SS.mmm`.
impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour_of_day(),
            self.minute_of_hour(),
            self.second_of_minute(),
            self.millis_of_second()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_time::DateTime;
    use chrono::FixedOffset;

    #[test]
    fn constructor_validates_each_field() {
        let t = LocalTime::new(10, 20, 30, 40).unwrap();
        assert_eq!(t.hour_of_day(), 10);
        assert_eq!(t.minute_of_hour(), 20);
        assert_eq!(t.second_of_minute(), 30);
        assert_eq!(t.millis_of_second(), 40);
        assert_eq!(t.to_string(), "10:20:30.040");
        assert!(LocalTime::new(24, 0, 0, 0).is_err());
        assert!(LocalTime::new(0, 60, 0, 0).is_err());
        assert!(LocalTime::new(0, 0, 0, 1_000).is_err());
    }

    #[test]
    fn millis_of_day_wraps() {
        assert_eq!(LocalTime::from_millis_of_day(-1).to_string(), "23:59:59.999");
        assert_eq!(LocalTime::from_millis_of_day(MILLIS_PER_DAY), LocalTime::midnight());
    }

    #[test]
    fn from_instant_reads_local_time() {
        let utc = DateTime::new_in(2002, 6, 9, 23, 30, 0, 0, Chronology::iso()).unwrap();
        let plus_one = utc.with_zone(FixedOffset::east_opt(3_600).unwrap());
        assert_eq!(LocalTime::from_instant(&plus_one).to_string(), "00:30:00.000");
        assert_eq!(plus_one.to_local_time().chronology(), Chronology::iso());
    }

    #[test]
    fn only_time_fields_are_available() {
        let t = LocalTime::new(1, 2, 3, 4).unwrap();
        assert_eq!(t.get(DateTimeFieldType::MinuteOfDay), Ok(62));
        assert!(matches!(
            t.get(DateTimeFieldType::Year),
            Err(TimeError::UnsupportedOperation { field: "year", .. })
        ));
        assert!(t.with_field(DateTimeFieldType::DayOfMonth, 1).is_err());
        assert_eq!(t.with_hour_of_day(23).unwrap().hour_of_day(), 23);
        assert!(t.with_minute_of_hour(60).is_err());
    }

    #[test]
    fn arithmetic_wraps_midnight() {
        let t = LocalTime::new(23, 0, 0, 0).unwrap();
        assert_eq!(t.plus_hours(2).unwrap().to_string(), "01:00:00.000");
        assert_eq!(t.plus_minutes(-24 * 60).unwrap(), t);
        assert_eq!(t.plus_millis(-1).unwrap().to_string(), "22:59:59.999");
        let p = Period::new(0, 1, 0, 3, 1, 30, 0, 0);
        assert_eq!(t.with_period_added(&p, 1).unwrap().to_string(), "00:30:00.000");
    }

    #[test]
    fn ordering_within_one_calendar() {
        let a = LocalTime::new(1, 0, 0, 0).unwrap();
        let b = LocalTime::new(2, 0, 0, 0).unwrap();
        assert!(a < b);
        let c = LocalTime::new_in(1, 0, 0, 0, Chronology::buddhist()).unwrap();
        assert_eq!(a.partial_cmp(&c), None);
    }
}
