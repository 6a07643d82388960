// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar periods.
//!
//! A [`Period`] is a list of field counts ("1 year, 2 months and 3 days"). It
//! has no fixed length in milliseconds: one month after January 31 is not
//! the same span as one month after March 31. A period only becomes a
//! [`Duration`] once it is anchored at an instant and resolved by a
//! [`Chronology`](crate::Chronology).
//!
//! Which units a period may hold is fixed by its [`PeriodType`]:
//!
//! | Type | Units |
//! |------|-------|
//! | [`standard`](PeriodType::standard) | years, months, weeks, days, hours, minutes, seconds, millis |
//! | [`year_month_day_time`](PeriodType::year_month_day_time) | standard without weeks |
//! | [`year_week_day_time`](PeriodType::year_week_day_time) | standard without months |
//! | [`year_day_time`](PeriodType::year_day_time) | years, days and the time units |
//! | [`day_time`](PeriodType::day_time) | days and the time units |
//! | [`time`](PeriodType::time) | hours, minutes, seconds, millis |
//!
//! plus one single-unit type per unit.

use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::field_type::DurationFieldType;
use crate::gj::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK};
use crate::instant::TimeInstant;
use crate::safe::{safe_add, safe_add_i32, safe_multiply, safe_multiply_i32};
use std::fmt;

/// Units a period can hold, largest first. Bit `i` of a type mask refers to
/// `UNITS[i]`.
const UNITS: [DurationFieldType; 8] = [
    DurationFieldType::Years,
    DurationFieldType::Months,
    DurationFieldType::Weeks,
    DurationFieldType::Days,
    DurationFieldType::Hours,
    DurationFieldType::Minutes,
    DurationFieldType::Seconds,
    DurationFieldType::Millis,
];

const fn slot(unit: DurationFieldType) -> Option<usize> {
    match unit {
        DurationFieldType::Years => Some(0),
        DurationFieldType::Months => Some(1),
        DurationFieldType::Weeks => Some(2),
        DurationFieldType::Days => Some(3),
        DurationFieldType::Hours => Some(4),
        DurationFieldType::Minutes => Some(5),
        DurationFieldType::Seconds => Some(6),
        DurationFieldType::Millis => Some(7),
        DurationFieldType::Eras | DurationFieldType::Weekyears => None,
    }
}

const YEARS: u8 = 1 << 0;
const MONTHS: u8 = 1 << 1;
const WEEKS: u8 = 1 << 2;
const DAYS: u8 = 1 << 3;
const HOURS: u8 = 1 << 4;
const MINUTES: u8 = 1 << 5;
const SECONDS: u8 = 1 << 6;
const MILLIS: u8 = 1 << 7;
const TIME: u8 = HOURS | MINUTES | SECONDS | MILLIS;

// ═══════════════════════════════════════════════════════════════════════════
// PeriodType
// ═══════════════════════════════════════════════════════════════════════════

/// The set of units a [`Period`] may hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PeriodType {
    name: &'static str,
    mask: u8,
}

impl PeriodType {
    const fn of(name: &'static str, mask: u8) -> Self {
        Self { name, mask }
    }

    /// Every unit from years down to millis.
    pub const fn standard() -> Self {
        Self::of("Standard", YEARS | MONTHS | WEEKS | DAYS | TIME)
    }

    pub const fn year_month_day_time() -> Self {
        Self::of("YearMonthDayTime", YEARS | MONTHS | DAYS | TIME)
    }

    pub const fn year_week_day_time() -> Self {
        Self::of("YearWeekDayTime", YEARS | WEEKS | DAYS | TIME)
    }

    pub const fn year_day_time() -> Self {
        Self::of("YearDayTime", YEARS | DAYS | TIME)
    }

    pub const fn day_time() -> Self {
        Self::of("DayTime", DAYS | TIME)
    }

    pub const fn time() -> Self {
        Self::of("Time", TIME)
    }

    pub const fn years() -> Self {
        Self::of("Years", YEARS)
    }

    pub const fn months() -> Self {
        Self::of("Months", MONTHS)
    }

    pub const fn weeks() -> Self {
        Self::of("Weeks", WEEKS)
    }

    pub const fn days() -> Self {
        Self::of("Days", DAYS)
    }

    pub const fn hours() -> Self {
        Self::of("Hours", HOURS)
    }

    pub const fn minutes() -> Self {
        Self::of("Minutes", MINUTES)
    }

    pub const fn seconds() -> Self {
        Self::of("Seconds", SECONDS)
    }

    pub const fn millis() -> Self {
        Self::of("Millis", MILLIS)
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn is_supported(&self, unit: DurationFieldType) -> bool {
        match slot(unit) {
            Some(i) => self.mask & (1 << i) != 0,
            None => false,
        }
    }

    /// Number of units in the type.
    pub const fn size(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// The supported units, largest first.
    pub fn fields(&self) -> impl Iterator<Item = DurationFieldType> {
        let mask = self.mask;
        UNITS
            .into_iter()
            .enumerate()
            .filter(move |(i, _)| mask & (1 << i) != 0)
            .map(|(_, unit)| unit)
    }
}

impl Default for PeriodType {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeriodType[{}]", self.name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Period
// ═══════════════════════════════════════════════════════════════════════════

/// An immutable span of calendar units.
///
/// Equality compares the type as well as the values, so a one-day period of
/// type [`days`](PeriodType::days) is not equal to a one-day standard period.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    values: [i32; 8],
    period_type: PeriodType,
}

impl Period {
    /// The empty standard period.
    pub const ZERO: Period = Period::zero_of(PeriodType::standard());

    // ── constructors ──────────────────────────────────────────────────

    /// A standard period from all eight unit counts.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        years: i32,
        months: i32,
        weeks: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: i32,
        millis: i32,
    ) -> Self {
        Self {
            values: [years, months, weeks, days, hours, minutes, seconds, millis],
            period_type: PeriodType::standard(),
        }
    }

    /// An empty period of the given type.
    pub const fn zero_of(period_type: PeriodType) -> Self {
        Self {
            values: [0; 8],
            period_type,
        }
    }

    const fn single(index: usize, value: i32) -> Self {
        let mut values = [0; 8];
        values[index] = value;
        Self {
            values,
            period_type: PeriodType::standard(),
        }
    }

    pub const fn of_years(years: i32) -> Self {
        Self::single(0, years)
    }

    pub const fn of_months(months: i32) -> Self {
        Self::single(1, months)
    }

    pub const fn of_weeks(weeks: i32) -> Self {
        Self::single(2, weeks)
    }

    pub const fn of_days(days: i32) -> Self {
        Self::single(3, days)
    }

    pub const fn of_hours(hours: i32) -> Self {
        Self::single(4, hours)
    }

    pub const fn of_minutes(minutes: i32) -> Self {
        Self::single(5, minutes)
    }

    pub const fn of_seconds(seconds: i32) -> Self {
        Self::single(6, seconds)
    }

    pub const fn of_millis(millis: i32) -> Self {
        Self::single(7, millis)
    }

    /// The standard period from `start` to `end`, resolved in the
    /// chronology of `start`.
    pub fn between<A, B>(start: &A, end: &B) -> TimeResult<Self>
    where
        A: TimeInstant + ?Sized,
        B: TimeInstant + ?Sized,
    {
        Self::between_as(start, end, PeriodType::standard())
    }

    /// Like [`between`](Self::between) restricted to the units of
    /// `period_type`.
    ///
    /// Adding the result to `start` gives back `end` exactly.
    pub fn between_as<A, B>(start: &A, end: &B, period_type: PeriodType) -> TimeResult<Self>
    where
        A: TimeInstant + ?Sized,
        B: TimeInstant + ?Sized,
    {
        start
            .chronology()
            .period_values(period_type, start.millis(), end.millis())
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// The count for `unit`, zero when the type does not hold it.
    pub const fn get(&self, unit: DurationFieldType) -> i32 {
        match slot(unit) {
            Some(i) => self.values[i],
            None => 0,
        }
    }

    pub const fn years(&self) -> i32 {
        self.values[0]
    }

    pub const fn months(&self) -> i32 {
        self.values[1]
    }

    pub const fn weeks(&self) -> i32 {
        self.values[2]
    }

    pub const fn days(&self) -> i32 {
        self.values[3]
    }

    pub const fn hours(&self) -> i32 {
        self.values[4]
    }

    pub const fn minutes(&self) -> i32 {
        self.values[5]
    }

    pub const fn seconds(&self) -> i32 {
        self.values[6]
    }

    pub const fn millis(&self) -> i32 {
        self.values[7]
    }

    /// The units of the type with their counts, largest first.
    pub fn iter(&self) -> impl Iterator<Item = (DurationFieldType, i32)> + '_ {
        self.period_type
            .fields()
            .map(move |unit| (unit, self.get(unit)))
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0)
    }

    // ── derived periods ───────────────────────────────────────────────

    /// A copy with the count for `unit` replaced.
    pub fn with_field(&self, unit: DurationFieldType, value: i32) -> TimeResult<Self> {
        let index = self.checked_slot(unit, "with_field")?;
        let mut copy = *self;
        copy.values[index] = value;
        Ok(copy)
    }

    /// A copy with `amount` added to the count for `unit`.
    pub fn with_field_added(&self, unit: DurationFieldType, amount: i32) -> TimeResult<Self> {
        let index = self.checked_slot(unit, "with_field_added")?;
        let mut copy = *self;
        copy.values[index] = safe_add_i32(copy.values[index], amount)?;
        Ok(copy)
    }

    /// The same counts under another type.
    ///
    /// Fails if a non-zero count has no place in `period_type`.
    pub fn with_period_type(&self, period_type: PeriodType) -> TimeResult<Self> {
        let mut copy = Self::zero_of(period_type);
        for (i, unit) in UNITS.into_iter().enumerate() {
            let value = self.values[i];
            if value != 0 {
                copy = copy.with_field(unit, value)?;
            }
        }
        Ok(copy)
    }

    /// Unit-wise sum. The result keeps the type of `self`.
    pub fn plus(&self, other: &Period) -> TimeResult<Self> {
        self.combine(other, 1)
    }

    /// Unit-wise difference. The result keeps the type of `self`.
    pub fn minus(&self, other: &Period) -> TimeResult<Self> {
        self.combine(other, -1)
    }

    pub fn negated(&self) -> TimeResult<Self> {
        self.multiplied_by(-1)
    }

    pub fn multiplied_by(&self, scalar: i32) -> TimeResult<Self> {
        let mut copy = *self;
        for value in copy.values.iter_mut() {
            *value = safe_multiply_i32(*value, scalar)?;
        }
        Ok(copy)
    }

    fn combine(&self, other: &Period, sign: i32) -> TimeResult<Self> {
        let mut copy = *self;
        for (unit, value) in other.iter() {
            if value != 0 {
                let delta = safe_multiply_i32(value, sign)?;
                copy = copy.with_field_added(unit, delta)?;
            }
        }
        Ok(copy)
    }

    fn checked_slot(&self, unit: DurationFieldType, operation: &'static str) -> TimeResult<usize> {
        match slot(unit) {
            Some(i) if self.period_type.is_supported(unit) => Ok(i),
            _ => Err(TimeError::unsupported(unit.name(), operation)),
        }
    }

    // ── conversion ────────────────────────────────────────────────────

    /// The length of the period assuming weeks of 7 days and days of 24
    /// hours.
    ///
    /// Years and months have no standard length; a period holding either
    /// fails with [`UnsupportedOperation`](TimeError::UnsupportedOperation).
    pub fn to_standard_duration(&self) -> TimeResult<Duration> {
        if self.years() != 0 {
            return Err(TimeError::unsupported("years", "to_standard_duration"));
        }
        if self.months() != 0 {
            return Err(TimeError::unsupported("months", "to_standard_duration"));
        }
        let parts = [
            (self.weeks(), MILLIS_PER_WEEK),
            (self.days(), MILLIS_PER_DAY),
            (self.hours(), MILLIS_PER_HOUR),
            (self.minutes(), MILLIS_PER_MINUTE),
            (self.seconds(), MILLIS_PER_SECOND),
            (self.millis(), 1),
        ];
        let mut total = 0_i64;
        for (count, unit) in parts {
            total = safe_add(total, safe_multiply(i64::from(count), unit)?)?;
        }
        Ok(Duration::from_millis(total))
    }

    /// The exact length of the period when it starts at `start`.
    pub fn to_duration_from<T: TimeInstant + ?Sized>(&self, start: &T) -> TimeResult<Duration> {
        let from = start.millis();
        let to = start.chronology().add_period(self, from, 1)?;
        Duration::between(from, to)
    }

    /// The exact length of the period when it ends at `end`.
    pub fn to_duration_to<T: TimeInstant + ?Sized>(&self, end: &T) -> TimeResult<Duration> {
        let to = end.millis();
        let from = end.chronology().add_period(self, to, -1)?;
        Duration::between(from, to)
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::ZERO
    }
}

/// ISO-8601 period text, e.g. `P1Y2M3W4DT5H6M7.008S`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        for (value, suffix) in [
            (self.years(), 'Y'),
            (self.months(), 'M'),
            (self.weeks(), 'W'),
            (self.days(), 'D'),
        ] {
            if value != 0 {
                write!(f, "{value}{suffix}")?;
            }
        }

        let seconds = i64::from(self.seconds()) * 1_000 + i64::from(self.millis());
        if self.hours() == 0 && self.minutes() == 0 && seconds == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        if self.hours() != 0 {
            write!(f, "{}H", self.hours())?;
        }
        if self.minutes() != 0 {
            write!(f, "{}M", self.minutes())?;
        }
        if seconds != 0 {
            let sign = if seconds < 0 { "-" } else { "" };
            let abs = seconds.unsigned_abs();
            write!(f, "{sign}{}", abs / 1_000)?;
            if abs % 1_000 != 0 {
                write!(f, ".{:03}", abs % 1_000)?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}
