// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-aware instants.
//!
//! - [`DateTime`]: an immutable `(instant, chronology)` pair. Every "with" or
//!   "plus" method returns a new value.
//! - [`MutableDateTime`]: the same pair, updated in place. Each mutator
//!   computes the full result first and only commits it once it is known to
//!   be valid, so a failed call leaves the value exactly as it was.
//! - [`Property`]: one field of a [`DateTime`], bound for reading and for
//!   producing modified copies.
//!
//! Fields are read in the local time of the chronology's offset; the
//! instant itself always stays on the UTC timeline.

use crate::chronology::Chronology;
use crate::duration::Duration;
use crate::duration_field::DurationField;
use crate::error::TimeResult;
use crate::field::DateTimeField;
use crate::field_type::{DateTimeFieldType, DurationFieldType};
use crate::gj::{self, MILLIS_PER_DAY};
use crate::instant::TimeInstant;
use crate::local_time::LocalTime;
use crate::period::Period;
use crate::safe::{safe_add, safe_multiply, safe_subtract};
use chrono::{FixedOffset, Utc};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// Writes `instant` as ISO-8601 in the local time of `chronology`.
fn write_iso(f: &mut fmt::Formatter<'_>, chronology: Chronology, instant: i64) -> fmt::Result {
    let year = chronology.year().get(instant);
    if year < 0 {
        write!(f, "-{:04}", year.unsigned_abs())?;
    } else if year > 9_999 {
        write!(f, "+{year}")?;
    } else {
        write!(f, "{year:04}")?;
    }
    write!(
        f,
        "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        chronology.month_of_year().get(instant),
        chronology.day_of_month().get(instant),
        chronology.hour_of_day().get(instant),
        chronology.minute_of_hour().get(instant),
        chronology.second_of_minute().get(instant),
        chronology.millis_of_second().get(instant),
    )?;
    if chronology.offset_millis() == 0 {
        f.write_str("Z")
    } else {
        write!(f, "{}", chronology.zone())
    }
}

/// `instant` moved so that its local fields read the same at `to` as they
/// did at `from`.
fn retain_fields(instant: i64, from: Chronology, to: Chronology) -> TimeResult<i64> {
    safe_subtract(safe_add(instant, from.offset_millis())?, to.offset_millis())
}

// ═══════════════════════════════════════════════════════════════════════════
// Rounding
// ═══════════════════════════════════════════════════════════════════════════

/// How an instant snaps to a field boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rounding {
    Floor,
    Ceiling,
    HalfFloor,
    HalfCeiling,
    HalfEven,
}

impl Rounding {
    pub fn apply(self, field: &dyn DateTimeField, instant: i64) -> TimeResult<i64> {
        match self {
            Self::Floor => field.round_floor(instant),
            Self::Ceiling => field.round_ceiling(instant),
            Self::HalfFloor => field.round_half_floor(instant),
            Self::HalfCeiling => field.round_half_ceiling(instant),
            Self::HalfEven => field.round_half_even(instant),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DateTime
// ═══════════════════════════════════════════════════════════════════════════

/// An immutable instant read through a chronology.
///
/// Equality compares the instant and the chronology; use
/// [`is_equal`](TimeInstant::is_equal) to compare instants only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    millis: i64,
    chronology: Chronology,
}

impl DateTime {
    // ── constructors ──────────────────────────────────────────────────

    /// The instant at which the default chronology reads the given fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<Self> {
        Self::new_in(
            year,
            month_of_year,
            day_of_month,
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
            Chronology::default_configured(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_in(
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
        chronology: Chronology,
    ) -> TimeResult<Self> {
        let millis = chronology.date_time_millis(
            year,
            month_of_year,
            day_of_month,
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
        )?;
        Ok(Self { millis, chronology })
    }

    pub fn from_millis(millis: i64) -> Self {
        Self::from_millis_in(millis, Chronology::default_configured())
    }

    #[inline]
    pub const fn from_millis_in(millis: i64, chronology: Chronology) -> Self {
        Self { millis, chronology }
    }

    pub fn from_utc(datetime: chrono::DateTime<Utc>) -> Self {
        Self::from_millis(datetime.timestamp_millis())
    }

    pub fn from_utc_in(datetime: chrono::DateTime<Utc>, chronology: Chronology) -> Self {
        Self::from_millis_in(datetime.timestamp_millis(), chronology)
    }

    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn now_in(chronology: Chronology) -> Self {
        Self::from_utc_in(Utc::now(), chronology)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    #[inline]
    pub const fn chronology(&self) -> Chronology {
        self.chronology
    }

    pub fn zone(&self) -> FixedOffset {
        self.chronology.zone()
    }

    fn value(&self, field_type: DateTimeFieldType) -> i32 {
        self.chronology.field(field_type).get(self.millis)
    }

    pub fn era(&self) -> i32 {
        self.value(DateTimeFieldType::Era)
    }

    pub fn year_of_era(&self) -> i32 {
        self.value(DateTimeFieldType::YearOfEra)
    }

    pub fn year(&self) -> i32 {
        self.value(DateTimeFieldType::Year)
    }

    pub fn weekyear(&self) -> i32 {
        self.value(DateTimeFieldType::Weekyear)
    }

    pub fn week_of_weekyear(&self) -> i32 {
        self.value(DateTimeFieldType::WeekOfWeekyear)
    }

    pub fn month_of_year(&self) -> i32 {
        self.value(DateTimeFieldType::MonthOfYear)
    }

    pub fn day_of_month(&self) -> i32 {
        self.value(DateTimeFieldType::DayOfMonth)
    }

    pub fn day_of_year(&self) -> i32 {
        self.value(DateTimeFieldType::DayOfYear)
    }

    /// ISO day of week, Monday = 1 … Sunday = 7.
    pub fn day_of_week(&self) -> i32 {
        self.value(DateTimeFieldType::DayOfWeek)
    }

    pub fn hour_of_day(&self) -> i32 {
        self.value(DateTimeFieldType::HourOfDay)
    }

    pub fn minute_of_day(&self) -> i32 {
        self.value(DateTimeFieldType::MinuteOfDay)
    }

    pub fn minute_of_hour(&self) -> i32 {
        self.value(DateTimeFieldType::MinuteOfHour)
    }

    pub fn second_of_day(&self) -> i32 {
        self.value(DateTimeFieldType::SecondOfDay)
    }

    pub fn second_of_minute(&self) -> i32 {
        self.value(DateTimeFieldType::SecondOfMinute)
    }

    pub fn millis_of_day(&self) -> i32 {
        self.value(DateTimeFieldType::MillisOfDay)
    }

    pub fn millis_of_second(&self) -> i32 {
        self.value(DateTimeFieldType::MillisOfSecond)
    }

    /// `field_type` bound to this value.
    pub fn property(&self, field_type: DateTimeFieldType) -> Property {
        Property::new(*self, field_type)
    }

    // ── copies ────────────────────────────────────────────────────────

    pub const fn with_millis(&self, millis: i64) -> Self {
        Self::from_millis_in(millis, self.chronology)
    }

    /// The same instant under another chronology.
    pub const fn with_chronology(&self, chronology: Chronology) -> Self {
        Self::from_millis_in(self.millis, chronology)
    }

    /// The same instant read at another offset.
    pub fn with_zone(&self, zone: FixedOffset) -> Self {
        self.with_chronology(self.chronology.with_zone(zone))
    }

    /// The same local fields at another offset, which moves the instant.
    pub fn with_zone_retain_fields(&self, zone: FixedOffset) -> TimeResult<Self> {
        let chronology = self.chronology.with_zone(zone);
        let millis = retain_fields(self.millis, self.chronology, chronology)?;
        Ok(Self::from_millis_in(millis, chronology))
    }

    /// A copy with `field_type` set to `value`.
    pub fn with_field(&self, field_type: DateTimeFieldType, value: i32) -> TimeResult<Self> {
        let millis = self.chronology.field(field_type).set(self.millis, value)?;
        Ok(self.with_millis(millis))
    }

    /// A copy with `amount` units of `unit` added.
    pub fn with_field_added(&self, unit: DurationFieldType, amount: i32) -> TimeResult<Self> {
        if amount == 0 {
            return Ok(*self);
        }
        let millis = self
            .chronology
            .duration_field(unit)
            .add(self.millis, i64::from(amount))?;
        Ok(self.with_millis(millis))
    }

    /// A copy with the local date replaced and the time of day kept.
    pub fn with_date(&self, year: i32, month_of_year: i32, day_of_month: i32) -> TimeResult<Self> {
        let millis = self.chronology.date_millis(
            year,
            month_of_year,
            day_of_month,
            self.millis_of_day(),
        )?;
        Ok(self.with_millis(millis))
    }

    /// A copy with the local time of day replaced and the date kept.
    pub fn with_time(
        &self,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<Self> {
        let c = self.chronology;
        let mut millis = c.hour_of_day().set(self.millis, hour_of_day)?;
        millis = c.minute_of_hour().set(millis, minute_of_hour)?;
        millis = c.second_of_minute().set(millis, second_of_minute)?;
        millis = c.millis_of_second().set(millis, millis_of_second)?;
        Ok(self.with_millis(millis))
    }

    pub fn with_period_added(&self, period: &Period, scalar: i32) -> TimeResult<Self> {
        let millis = self.chronology.add_period(period, self.millis, scalar)?;
        Ok(self.with_millis(millis))
    }

    pub fn with_duration_added(&self, duration: Duration, scalar: i32) -> TimeResult<Self> {
        let millis = self
            .chronology
            .add_duration(self.millis, duration.millis(), scalar)?;
        Ok(self.with_millis(millis))
    }

    pub fn plus(&self, period: &Period) -> TimeResult<Self> {
        self.with_period_added(period, 1)
    }

    pub fn minus(&self, period: &Period) -> TimeResult<Self> {
        self.with_period_added(period, -1)
    }

    pub fn plus_duration(&self, duration: Duration) -> TimeResult<Self> {
        self.with_duration_added(duration, 1)
    }

    pub fn minus_duration(&self, duration: Duration) -> TimeResult<Self> {
        self.with_duration_added(duration, -1)
    }

    pub fn plus_years(&self, years: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Years, years)
    }

    pub fn plus_months(&self, months: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Months, months)
    }

    pub fn plus_weeks(&self, weeks: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Weeks, weeks)
    }

    pub fn plus_days(&self, days: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Days, days)
    }

    pub fn plus_hours(&self, hours: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Hours, hours)
    }

    pub fn plus_minutes(&self, minutes: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Minutes, minutes)
    }

    pub fn plus_seconds(&self, seconds: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Seconds, seconds)
    }

    pub fn plus_millis(&self, millis: i32) -> TimeResult<Self> {
        self.with_field_added(DurationFieldType::Millis, millis)
    }

    // ── conversion ────────────────────────────────────────────────────

    pub fn to_mutable(&self) -> MutableDateTime {
        MutableDateTime::from_millis_in(self.millis, self.chronology)
    }

    /// The local time of day.
    pub fn to_local_time(&self) -> LocalTime {
        LocalTime::from_instant(self)
    }
}

/// ISO-8601 in local time, e.g. `2002-06-09T05:06:07.008+02:00`.
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_iso(f, self.chronology, self.millis)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MutableDateTime
// ═══════════════════════════════════════════════════════════════════════════

/// A date-time updated in place.
///
/// Optionally carries a rounding rule: once set with
/// [`set_rounding`](Self::set_rounding), every new instant is snapped to the
/// named field before it is stored.
///
/// Not synchronised; share it across threads only behind a lock.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutableDateTime {
    millis: i64,
    chronology: Chronology,
    rounding: Option<(DateTimeFieldType, Rounding)>,
}

impl MutableDateTime {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<Self> {
        DateTime::new(
            year,
            month_of_year,
            day_of_month,
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
        )
        .map(|dt| dt.to_mutable())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self::from_millis_in(millis, Chronology::default_configured())
    }

    pub const fn from_millis_in(millis: i64, chronology: Chronology) -> Self {
        Self {
            millis,
            chronology,
            rounding: None,
        }
    }

    pub fn now() -> Self {
        DateTime::now().to_mutable()
    }

    #[inline]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    #[inline]
    pub const fn chronology(&self) -> Chronology {
        self.chronology
    }

    pub const fn rounding(&self) -> Option<(DateTimeFieldType, Rounding)> {
        self.rounding
    }

    /// Stores `result` (after rounding) or reports why it was refused.
    fn commit(&mut self, operation: &'static str, result: TimeResult<i64>) -> TimeResult<()> {
        let rounded = result.and_then(|millis| match self.rounding {
            Some((field_type, mode)) => mode.apply(self.chronology.field(field_type), millis),
            None => Ok(millis),
        });
        match rounded {
            Ok(millis) => {
                self.millis = millis;
                Ok(())
            }
            Err(err) => {
                trace!(operation, millis = self.millis, %err, "mutation rejected");
                Err(err)
            }
        }
    }

    // ── rounding ──────────────────────────────────────────────────────

    /// Rounds the current instant now, and every future one, to
    /// `field_type` using `mode`.
    pub fn set_rounding(&mut self, field_type: DateTimeFieldType, mode: Rounding) -> TimeResult<()> {
        let previous = self.rounding.replace((field_type, mode));
        let result = self.commit("set_rounding", Ok(self.millis));
        if result.is_err() {
            self.rounding = previous;
        }
        result
    }

    pub fn clear_rounding(&mut self) {
        self.rounding = None;
    }

    // ── whole-value setters ───────────────────────────────────────────

    pub fn set_millis(&mut self, millis: i64) -> TimeResult<()> {
        self.commit("set_millis", Ok(millis))
    }

    pub fn set_instant<T: TimeInstant + ?Sized>(&mut self, instant: &T) -> TimeResult<()> {
        self.set_millis(instant.millis())
    }

    /// Reads the same instant under `chronology`.
    pub fn set_chronology(&mut self, chronology: Chronology) {
        self.chronology = chronology;
    }

    /// Reads the same instant at another offset.
    pub fn set_zone(&mut self, zone: FixedOffset) {
        self.chronology = self.chronology.with_zone(zone);
    }

    /// Keeps the local fields and moves the instant to `zone`.
    pub fn set_zone_retain_fields(&mut self, zone: FixedOffset) -> TimeResult<()> {
        let previous = self.chronology;
        self.chronology = previous.with_zone(zone);
        let result = self.commit(
            "set_zone_retain_fields",
            retain_fields(self.millis, previous, self.chronology),
        );
        if result.is_err() {
            self.chronology = previous;
        }
        result
    }

    // ── field setters ─────────────────────────────────────────────────

    pub fn set(&mut self, field_type: DateTimeFieldType, value: i32) -> TimeResult<()> {
        let result = self.chronology.field(field_type).set(self.millis, value);
        self.commit(field_type.name(), result)
    }

    pub fn set_text(&mut self, field_type: DateTimeFieldType, text: &str) -> TimeResult<()> {
        let result = self.chronology.field(field_type).set_text(self.millis, text);
        self.commit(field_type.name(), result)
    }

    pub fn add(&mut self, unit: DurationFieldType, amount: i64) -> TimeResult<()> {
        let result = self.chronology.duration_field(unit).add(self.millis, amount);
        self.commit(unit.name(), result)
    }

    pub fn add_wrapped(&mut self, field_type: DateTimeFieldType, amount: i32) -> TimeResult<()> {
        let result = self
            .chronology
            .field(field_type)
            .add_wrapped(self.millis, amount);
        self.commit(field_type.name(), result)
    }

    pub fn set_era(&mut self, era: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::Era, era)
    }

    pub fn set_year_of_era(&mut self, year_of_era: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::YearOfEra, year_of_era)
    }

    pub fn set_year(&mut self, year: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::Year, year)
    }

    pub fn set_weekyear(&mut self, weekyear: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::Weekyear, weekyear)
    }

    pub fn set_week_of_weekyear(&mut self, week: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::WeekOfWeekyear, week)
    }

    pub fn set_month_of_year(&mut self, month: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::MonthOfYear, month)
    }

    pub fn set_day_of_month(&mut self, day: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::DayOfMonth, day)
    }

    pub fn set_day_of_year(&mut self, day: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::DayOfYear, day)
    }

    pub fn set_day_of_week(&mut self, day: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::DayOfWeek, day)
    }

    pub fn set_hour_of_day(&mut self, hour: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::HourOfDay, hour)
    }

    pub fn set_minute_of_day(&mut self, minute: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::MinuteOfDay, minute)
    }

    pub fn set_minute_of_hour(&mut self, minute: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::MinuteOfHour, minute)
    }

    pub fn set_second_of_day(&mut self, second: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::SecondOfDay, second)
    }

    pub fn set_second_of_minute(&mut self, second: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::SecondOfMinute, second)
    }

    pub fn set_millis_of_day(&mut self, millis: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::MillisOfDay, millis)
    }

    pub fn set_millis_of_second(&mut self, millis: i32) -> TimeResult<()> {
        self.set(DateTimeFieldType::MillisOfSecond, millis)
    }

    pub fn add_years(&mut self, years: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Years, years)
    }

    pub fn add_weekyears(&mut self, weekyears: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Weekyears, weekyears)
    }

    pub fn add_months(&mut self, months: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Months, months)
    }

    pub fn add_weeks(&mut self, weeks: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Weeks, weeks)
    }

    pub fn add_days(&mut self, days: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Days, days)
    }

    pub fn add_hours(&mut self, hours: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Hours, hours)
    }

    pub fn add_minutes(&mut self, minutes: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Minutes, minutes)
    }

    pub fn add_seconds(&mut self, seconds: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Seconds, seconds)
    }

    pub fn add_millis(&mut self, millis: i64) -> TimeResult<()> {
        self.add(DurationFieldType::Millis, millis)
    }

    // ── date and time ─────────────────────────────────────────────────

    /// Replaces the local date, keeping the time of day.
    pub fn set_date(&mut self, year: i32, month_of_year: i32, day_of_month: i32) -> TimeResult<()> {
        let result = self.to_date_time().with_date(year, month_of_year, day_of_month);
        self.commit("set_date", result.map(|dt| dt.millis()))
    }

    /// Copies the local date of `instant`, read in its own chronology,
    /// keeping this value's time of day.
    pub fn set_date_from<T: TimeInstant + ?Sized>(&mut self, instant: &T) -> TimeResult<()> {
        let result = (|| {
            let source = safe_add(instant.millis(), instant.chronology().offset_millis())?;
            let local = safe_add(self.millis, self.chronology.offset_millis())?;
            let day_start = safe_multiply(gj::epoch_day(source), MILLIS_PER_DAY)?;
            let moved = safe_add(day_start, gj::time_only_millis(local))?;
            safe_subtract(moved, self.chronology.offset_millis())
        })();
        self.commit("set_date_from", result)
    }

    /// Replaces the local time of day, keeping the date.
    pub fn set_time(
        &mut self,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<()> {
        let result = self.to_date_time().with_time(
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
        );
        self.commit("set_time", result.map(|dt| dt.millis()))
    }

    /// Copies the local time of day of `instant`, read in its own
    /// chronology, keeping this value's date.
    pub fn set_time_from<T: TimeInstant + ?Sized>(&mut self, instant: &T) -> TimeResult<()> {
        let result = (|| {
            let source = safe_add(instant.millis(), instant.chronology().offset_millis())?;
            let local = safe_add(self.millis, self.chronology.offset_millis())?;
            let day_start = safe_subtract(local, gj::time_only_millis(local))?;
            let moved = safe_add(day_start, gj::time_only_millis(source))?;
            safe_subtract(moved, self.chronology.offset_millis())
        })();
        self.commit("set_time_from", result)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_date_time(
        &mut self,
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<()> {
        let result = self.chronology.date_time_millis(
            year,
            month_of_year,
            day_of_month,
            hour_of_day,
            minute_of_hour,
            second_of_minute,
            millis_of_second,
        );
        self.commit("set_date_time", result)
    }

    // ── periods and durations ─────────────────────────────────────────

    pub fn add_duration(&mut self, duration: Duration) -> TimeResult<()> {
        self.add_duration_scaled(duration, 1)
    }

    pub fn add_duration_scaled(&mut self, duration: Duration, scalar: i32) -> TimeResult<()> {
        let result = self
            .chronology
            .add_duration(self.millis, duration.millis(), scalar);
        self.commit("add_duration", result)
    }

    pub fn add_period(&mut self, period: &Period) -> TimeResult<()> {
        self.add_period_scaled(period, 1)
    }

    pub fn add_period_scaled(&mut self, period: &Period, scalar: i32) -> TimeResult<()> {
        let result = self.chronology.add_period(period, self.millis, scalar);
        self.commit("add_period", result)
    }

    // ── conversion ────────────────────────────────────────────────────

    pub fn to_date_time(&self) -> DateTime {
        DateTime::from_millis_in(self.millis, self.chronology)
    }

    /// `field_type` bound to a snapshot of the current value.
    pub fn property(&self, field_type: DateTimeFieldType) -> Property {
        self.to_date_time().property(field_type)
    }
}

impl From<DateTime> for MutableDateTime {
    fn from(date_time: DateTime) -> Self {
        date_time.to_mutable()
    }
}

impl fmt::Display for MutableDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_iso(f, self.chronology, self.millis)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Property
// ═══════════════════════════════════════════════════════════════════════════

/// A single field of a [`DateTime`].
#[derive(Debug, Copy, Clone)]
pub struct Property {
    date_time: DateTime,
    field: &'static dyn DateTimeField,
}

impl Property {
    pub fn new(date_time: DateTime, field_type: DateTimeFieldType) -> Self {
        Self {
            date_time,
            field: date_time.chronology().field(field_type),
        }
    }

    pub fn date_time(&self) -> DateTime {
        self.date_time
    }

    pub fn field(&self) -> &'static dyn DateTimeField {
        self.field
    }

    pub fn field_type(&self) -> DateTimeFieldType {
        self.field.field_type()
    }

    pub fn name(&self) -> &'static str {
        self.field.name()
    }

    // ── reading ───────────────────────────────────────────────────────

    pub fn get(&self) -> i32 {
        self.field.get(self.date_time.millis())
    }

    pub fn as_text(&self) -> String {
        self.field.as_text(self.date_time.millis())
    }

    /// Lowest valid value at this instant.
    pub fn minimum_value(&self) -> i32 {
        self.field.minimum_value_at(self.date_time.millis())
    }

    /// Highest valid value at this instant.
    pub fn maximum_value(&self) -> i32 {
        self.field.maximum_value_at(self.date_time.millis())
    }

    pub fn minimum_value_overall(&self) -> i32 {
        self.field.minimum_value()
    }

    pub fn maximum_value_overall(&self) -> i32 {
        self.field.maximum_value()
    }

    pub fn maximum_text_length(&self) -> usize {
        self.field.maximum_text_length()
    }

    pub fn is_leap(&self) -> bool {
        self.field.is_leap(self.date_time.millis())
    }

    pub fn leap_amount(&self) -> i32 {
        self.field.leap_amount(self.date_time.millis())
    }

    pub fn duration_field(&self) -> &'static dyn DurationField {
        self.field.duration_field()
    }

    pub fn range_duration_field(&self) -> Option<&'static dyn DurationField> {
        self.field.range_duration_field()
    }

    pub fn leap_duration_field(&self) -> Option<&'static dyn DurationField> {
        self.field.leap_duration_field()
    }

    /// Milliseconds since the floor of this field.
    pub fn remainder(&self) -> TimeResult<i64> {
        self.field.remainder(self.date_time.millis())
    }

    /// Compares this field's value with the same field read at `instant`.
    pub fn compare_to<T: TimeInstant + ?Sized>(&self, instant: &T) -> Ordering {
        self.get().cmp(&self.field.get(instant.millis()))
    }

    // ── modified copies ───────────────────────────────────────────────

    fn copy_with(&self, millis: TimeResult<i64>) -> TimeResult<DateTime> {
        millis.map(|m| self.date_time.with_millis(m))
    }

    pub fn set(&self, value: i32) -> TimeResult<DateTime> {
        self.copy_with(self.field.set(self.date_time.millis(), value))
    }

    pub fn set_text(&self, text: &str) -> TimeResult<DateTime> {
        self.copy_with(self.field.set_text(self.date_time.millis(), text))
    }

    pub fn add(&self, value: i64) -> TimeResult<DateTime> {
        self.copy_with(self.field.add(self.date_time.millis(), value))
    }

    pub fn add_wrapped(&self, value: i32) -> TimeResult<DateTime> {
        self.copy_with(self.field.add_wrapped(self.date_time.millis(), value))
    }

    pub fn with_maximum_value(&self) -> TimeResult<DateTime> {
        self.set(self.maximum_value())
    }

    pub fn with_minimum_value(&self) -> TimeResult<DateTime> {
        self.set(self.minimum_value())
    }

    pub fn round(&self, mode: Rounding) -> TimeResult<DateTime> {
        self.copy_with(mode.apply(self.field, self.date_time.millis()))
    }

    pub fn round_floor(&self) -> TimeResult<DateTime> {
        self.round(Rounding::Floor)
    }

    pub fn round_ceiling(&self) -> TimeResult<DateTime> {
        self.round(Rounding::Ceiling)
    }

    pub fn round_half_floor(&self) -> TimeResult<DateTime> {
        self.round(Rounding::HalfFloor)
    }

    pub fn round_half_ceiling(&self) -> TimeResult<DateTime> {
        self.round(Rounding::HalfCeiling)
    }

    pub fn round_half_even(&self) -> TimeResult<DateTime> {
        self.round(Rounding::HalfEven)
    }
}

/// Two properties are equal when they name the same field type of equal
/// date-times.
impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.date_time == other.date_time && self.field_type() == other.field_type()
    }
}

impl Eq for Property {}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;
    use crate::gj::{MILLIS_PER_HOUR, MILLIS_PER_MINUTE};

    fn iso(y: i32, mo: i32, d: i32, h: i32, mi: i32, s: i32, ms: i32) -> DateTime {
        DateTime::new_in(y, mo, d, h, mi, s, ms, Chronology::iso()).unwrap()
    }

    fn plus_hours(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3_600).unwrap()
    }

    #[test]
    fn getters_read_every_field() {
        let dt = iso(2002, 6, 9, 5, 6, 7, 8);
        assert_eq!(dt.era(), gj::AD);
        assert_eq!(dt.year(), 2002);
        assert_eq!(dt.year_of_era(), 2002);
        assert_eq!(dt.weekyear(), 2002);
        assert_eq!(dt.week_of_weekyear(), 23);
        assert_eq!(dt.month_of_year(), 6);
        assert_eq!(dt.day_of_month(), 9);
        assert_eq!(dt.day_of_year(), 160);
        assert_eq!(dt.day_of_week(), 7);
        assert_eq!(dt.hour_of_day(), 5);
        assert_eq!(dt.minute_of_day(), 306);
        assert_eq!(dt.minute_of_hour(), 6);
        assert_eq!(dt.second_of_day(), 5 * 3_600 + 6 * 60 + 7);
        assert_eq!(dt.second_of_minute(), 7);
        assert_eq!(dt.millis_of_second(), 8);
        assert_eq!(dt.to_string(), "2002-06-09T05:06:07.008Z");
    }

    #[test]
    fn display_handles_zones_and_extreme_years() {
        let dt = iso(2002, 6, 9, 0, 0, 0, 0).with_zone(plus_hours(-5));
        assert_eq!(dt.to_string(), "2002-06-08T19:00:00.000-05:00");
        assert_eq!(iso(-1, 1, 1, 0, 0, 0, 0).to_string(), "-0001-01-01T00:00:00.000Z");
        assert_eq!(iso(12345, 1, 1, 0, 0, 0, 0).to_string(), "+12345-01-01T00:00:00.000Z");
    }

    #[test]
    fn zone_changes_keep_instant_or_fields() {
        let dt = iso(2002, 6, 9, 12, 0, 0, 0);
        let same_instant = dt.with_zone(plus_hours(2));
        assert_eq!(same_instant.millis(), dt.millis());
        assert_eq!(same_instant.hour_of_day(), 14);

        let same_fields = dt.with_zone_retain_fields(plus_hours(2)).unwrap();
        assert_eq!(same_fields.hour_of_day(), 12);
        assert_eq!(same_fields.millis(), dt.millis() - 2 * MILLIS_PER_HOUR);
    }

    #[test]
    fn with_date_and_time_keep_the_other_half() {
        let dt = iso(2002, 6, 9, 5, 6, 7, 8);
        let moved = dt.with_date(2004, 2, 29).unwrap();
        assert_eq!(moved, iso(2004, 2, 29, 5, 6, 7, 8));
        assert!(dt.with_date(2003, 2, 29).is_err());

        let retimed = dt.with_time(23, 59, 59, 999).unwrap();
        assert_eq!(retimed, iso(2002, 6, 9, 23, 59, 59, 999));
        assert!(matches!(
            dt.with_time(24, 0, 0, 0),
            Err(TimeError::FieldOutOfRange { field: "hourOfDay", .. })
        ));
    }

    #[test]
    fn plus_methods_carry() {
        let dt = iso(2004, 1, 31, 23, 0, 0, 0);
        assert_eq!(dt.plus_months(1).unwrap(), iso(2004, 2, 29, 23, 0, 0, 0));
        assert_eq!(dt.plus_hours(1).unwrap(), iso(2004, 2, 1, 0, 0, 0, 0));
        assert_eq!(dt.plus_years(1).unwrap().year(), 2005);
        assert_eq!(dt.plus_weeks(-1).unwrap().day_of_month(), 24);
        assert_eq!(dt.plus_minutes(0).unwrap(), dt);

        let p = Period::new(1, 1, 0, 1, 1, 0, 0, 0);
        assert_eq!(dt.plus(&p).unwrap(), iso(2005, 3, 2, 0, 0, 0, 0));
        assert_eq!(
            dt.minus_duration(Duration::from_millis(MILLIS_PER_MINUTE)).unwrap(),
            iso(2004, 1, 31, 22, 59, 0, 0)
        );
        assert!(DateTime::from_millis_in(i64::MAX, Chronology::iso())
            .plus_millis(1)
            .is_err());
    }

    #[test]
    fn property_reads_bounds_and_leaps() {
        let dt = iso(2004, 2, 10, 0, 0, 0, 0);
        let day = dt.property(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.get(), 10);
        assert_eq!(day.maximum_value(), 29);
        assert_eq!(day.maximum_value_overall(), 31);
        assert_eq!(day.minimum_value(), 1);
        assert!(day.is_leap());
        assert_eq!(day.with_maximum_value().unwrap(), iso(2004, 2, 29, 0, 0, 0, 0));
        assert_eq!(day.name(), "dayOfMonth");
        assert_eq!(
            day.range_duration_field().map(|d| d.field_type()),
            Some(DurationFieldType::Months)
        );

        let era = dt.property(DateTimeFieldType::Era);
        assert_eq!(era.as_text(), "AD");
        assert_eq!(era.maximum_text_length(), 2);
    }

    #[test]
    fn property_copies_leave_the_source_alone() {
        let dt = iso(2002, 12, 15, 10, 0, 0, 0);
        let month = dt.property(DateTimeFieldType::MonthOfYear);
        assert_eq!(month.add_wrapped(1).unwrap(), iso(2002, 1, 15, 10, 0, 0, 0));
        assert_eq!(month.add(1).unwrap(), iso(2003, 1, 15, 10, 0, 0, 0));
        assert_eq!(month.set_text("3").unwrap(), iso(2002, 3, 15, 10, 0, 0, 0));
        assert!(month.set(13).is_err());
        assert_eq!(month.date_time(), dt);

        let day = dt.property(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.round_floor().unwrap(), iso(2002, 12, 15, 0, 0, 0, 0));
        assert_eq!(day.round_ceiling().unwrap(), iso(2002, 12, 16, 0, 0, 0, 0));
        assert_eq!(day.round_half_floor().unwrap(), iso(2002, 12, 15, 0, 0, 0, 0));
        assert_eq!(day.remainder(), Ok(10 * MILLIS_PER_HOUR));
        assert_eq!(day.compare_to(&iso(2002, 1, 20, 0, 0, 0, 0)), Ordering::Less);
    }

    #[test]
    fn half_rounding_breaks_ties() {
        let noon = iso(2002, 12, 15, 12, 0, 0, 0);
        let day = noon.property(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.round_half_floor().unwrap().day_of_month(), 15);
        assert_eq!(day.round_half_ceiling().unwrap().day_of_month(), 16);
        assert_eq!(day.round_half_even().unwrap().day_of_month(), 16);
        let noon = iso(2002, 12, 16, 12, 0, 0, 0);
        let day = noon.property(DateTimeFieldType::DayOfMonth);
        assert_eq!(day.round_half_even().unwrap().day_of_month(), 16);
    }

    #[test]
    fn mutable_failures_leave_state_intact() {
        let mut mdt = iso(2002, 6, 9, 5, 6, 7, 8).to_mutable();
        let before = mdt.clone();

        assert!(mdt.set_month_of_year(13).is_err());
        assert!(mdt.set_day_of_month(31).is_err());
        assert!(mdt.set_date(2003, 2, 29).is_err());
        assert!(mdt.set_time(5, 60, 0, 0).is_err());
        assert!(mdt.set_text(DateTimeFieldType::Era, "XX").is_err());
        assert!(mdt.add(DurationFieldType::Eras, 1).is_err());
        assert_eq!(mdt, before);

        mdt.set_year(2004).unwrap();
        mdt.add_months(-4).unwrap();
        mdt.add_wrapped(DateTimeFieldType::HourOfDay, 20).unwrap();
        assert_eq!(mdt.to_date_time(), iso(2004, 2, 9, 1, 6, 7, 8));
    }

    #[test]
    fn mutable_date_and_time_from_other_instants() {
        let mut mdt = iso(2002, 6, 9, 5, 6, 7, 8).to_mutable();
        let other = iso(2010, 1, 2, 22, 30, 0, 0).with_zone(plus_hours(3));
        // other reads 2010-01-03T01:30+03:00 locally
        mdt.set_date_from(&other).unwrap();
        assert_eq!(mdt.to_date_time(), iso(2010, 1, 3, 5, 6, 7, 8));
        mdt.set_time_from(&other).unwrap();
        assert_eq!(mdt.to_date_time(), iso(2010, 1, 3, 1, 30, 0, 0));

        mdt.set_date_time(2000, 2, 29, 0, 0, 0, 1).unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::MillisOfDay).get(), 1);
    }

    #[test]
    fn retaining_fields_across_zones_applies_rounding() {
        let mut mdt = iso(2002, 6, 9, 10, 0, 0, 0).to_mutable();
        mdt.set_rounding(DateTimeFieldType::HourOfDay, Rounding::Floor)
            .unwrap();
        mdt.set_zone(FixedOffset::east_opt(5 * 3_600 + 30 * 60).unwrap());
        assert_eq!(mdt.property(DateTimeFieldType::MinuteOfHour).get(), 30);

        // 15:30 local is kept at UTC, then floored to the hour.
        mdt.set_zone_retain_fields(plus_hours(0)).unwrap();
        assert_eq!(mdt.chronology(), Chronology::iso());
        assert_eq!(mdt.to_date_time(), iso(2002, 6, 9, 15, 0, 0, 0));
    }

    #[test]
    fn retaining_fields_past_the_timeline_changes_nothing() {
        let mut mdt = MutableDateTime::from_millis_in(i64::MIN, Chronology::iso());
        let before = mdt.clone();
        assert!(matches!(
            mdt.set_zone_retain_fields(plus_hours(1)),
            Err(TimeError::Overflow { .. })
        ));
        assert_eq!(mdt, before);
        assert_eq!(mdt.chronology(), Chronology::iso());
    }

    #[test]
    fn mutable_zones_and_rounding() {
        let mut mdt = iso(2002, 6, 9, 5, 6, 7, 8).to_mutable();
        mdt.set_zone(plus_hours(1));
        assert_eq!(mdt.property(DateTimeFieldType::HourOfDay).get(), 6);
        mdt.set_zone_retain_fields(plus_hours(-1)).unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::HourOfDay).get(), 6);
        mdt.set_chronology(Chronology::iso());

        mdt.set_rounding(DateTimeFieldType::HourOfDay, Rounding::Floor)
            .unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::MinuteOfHour).get(), 0);
        mdt.add_minutes(59).unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::MinuteOfHour).get(), 0);
        mdt.add_minutes(61).unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::HourOfDay).get(), 8);

        mdt.clear_rounding();
        mdt.add_period(&Period::of_seconds(30)).unwrap();
        assert_eq!(mdt.property(DateTimeFieldType::SecondOfMinute).get(), 30);
        assert!(mdt.add_duration_scaled(Duration::from_millis(i64::MAX), 2).is_err());
    }
}
