// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # GJ calendar engine
//!
//! Converts a millisecond instant (already adjusted to local time) into the
//! two decompositions used by every calendar field:
//!
//! ```text
//! instant ─┬─▶ (year, monthOfYear, dayOfMonth, dayOfYear)
//!          └─▶ (weekyear, weekOfWeekyear, dayOfWeek)
//! ```
//!
//! and back again. The rules are those of the proleptic Gregorian calendar
//! for every year, positive and negative (astronomical numbering, so year `0`
//! exists), with ISO-8601 week numbering: week 1 of a weekyear is the week
//! containing the year's first Thursday, weeks start on Monday, and a
//! weekyear has 52 or 53 weeks.
//!
//! Fields never re-derive calendar math on their own; they call into the
//! functions below so that, say, `dayOfYear`'s maximum always agrees with
//! `year`'s leap status.

pub(crate) mod durations;
pub(crate) mod fields;

use crate::duration_field::{DurationField, DAYS, ERAS, HOURS, MILLIS, MINUTES, SECONDS, WEEKS};
use crate::error::{TimeError, TimeResult};
use crate::field::{DateTimeField, PreciseDateTimeField};
use crate::field_type::DateTimeFieldType;
use crate::safe::{safe_add, safe_multiply, safe_subtract, verify_value_bounds};
use std::sync::Arc;

pub use durations::CalendarDurationField;
pub use fields::{
    GjDayOfMonthField, GjDayOfWeekField, GjDayOfYearField, GjEraField, GjMonthOfYearField,
    GjWeekOfWeekyearField, GjWeekyearField, GjYearField, GjYearOfEraField,
};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Year of the earliest instant, `i64::MIN`. Only its tail is representable.
pub const MIN_YEAR: i32 = -292_275_055;
/// Year of the latest instant, `i64::MAX`. Only its head is representable.
pub const MAX_YEAR: i32 = 292_278_994;

/// Era value for years `<= 0`.
pub const BC: i32 = 0;
/// Era value for years `>= 1`.
pub const AD: i32 = 1;

/// Days from 0000-03-01 to 1970-01-01.
const DAYS_FROM_0000_03_01_TO_EPOCH: i64 = 719_468;
/// Days in a 400-year Gregorian cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

/// Calendar-date decomposition of an instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct YearMonthDay {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub day_of_year: i32,
}

/// ISO week-date decomposition of an instant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IsoWeekDate {
    pub weekyear: i32,
    pub week: i32,
    /// `1` = Monday … `7` = Sunday.
    pub day_of_week: i32,
}

// ---------------------------------------------------------------------------
// Day-level primitives
// ---------------------------------------------------------------------------

/// Whole days since 1970-01-01 (floored, so negative instants round down).
#[inline]
pub fn epoch_day(instant: i64) -> i64 {
    instant.div_euclid(MILLIS_PER_DAY)
}

/// The sub-day remainder of `instant`, always in `[0, MILLIS_PER_DAY)`.
///
/// Used when a date-only field is replaced but the time of day must survive.
#[inline]
pub fn time_only_millis(instant: i64) -> i64 {
    instant.rem_euclid(MILLIS_PER_DAY)
}

#[inline]
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
pub fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Length of `month` (1-based) in `year`.
#[inline]
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days since the epoch of a calendar date. Inputs are not validated.
pub fn days_from_civil(year: i32, month: i32, day: i32) -> i64 {
    // ref: http://howardhinnant.github.io/date_algorithms.html
    let y = i64::from(year) - i64::from(month <= 2);
    let cycle = y.div_euclid(400);
    let year_of_cycle = y.rem_euclid(400);
    let shifted_month = (i64::from(month) + 9) % 12;
    let day_of_shifted_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_cycle =
        year_of_cycle * 365 + year_of_cycle / 4 - year_of_cycle / 100 + day_of_shifted_year;
    cycle * DAYS_PER_CYCLE + day_of_cycle - DAYS_FROM_0000_03_01_TO_EPOCH
}

/// Calendar date `(year, month, day)` of a day count since the epoch.
pub fn civil_from_days(days: i64) -> (i32, i32, i32) {
    let z = days + DAYS_FROM_0000_03_01_TO_EPOCH;
    let cycle = z.div_euclid(DAYS_PER_CYCLE);
    let day_of_cycle = z.rem_euclid(DAYS_PER_CYCLE);
    let year_of_cycle = (day_of_cycle - day_of_cycle / 1_460 + day_of_cycle / 36_524
        - day_of_cycle / (DAYS_PER_CYCLE - 1))
        / 365;
    let day_of_shifted_year =
        day_of_cycle - (365 * year_of_cycle + year_of_cycle / 4 - year_of_cycle / 100);
    let shifted_month = (5 * day_of_shifted_year + 2) / 153;
    let day = day_of_shifted_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_cycle + cycle * 400 + i64::from(month <= 2);
    // Any i64 millisecond instant lies within ±292 million years, so the
    // narrowing below is lossless.
    (year as i32, month as i32, day as i32)
}

/// ISO day of week of a day count: `1` = Monday … `7` = Sunday.
#[inline]
pub fn day_of_week_from_days(days: i64) -> i32 {
    // 1970-01-01 was a Thursday.
    ((days + 3).rem_euclid(7) + 1) as i32
}

// ---------------------------------------------------------------------------
// Instant → fields
// ---------------------------------------------------------------------------

/// The calendar year containing `instant`.
#[inline]
pub fn year(instant: i64) -> i32 {
    civil_from_days(epoch_day(instant)).0
}

/// `(year, monthOfYear, dayOfMonth, dayOfYear)` of `instant`.
pub fn ymd_from_millis(instant: i64) -> YearMonthDay {
    let days = epoch_day(instant);
    let (year, month, day) = civil_from_days(days);
    let day_of_year = (days - days_from_civil(year, 1, 1)) as i32 + 1;
    YearMonthDay {
        year,
        month,
        day,
        day_of_year,
    }
}

/// ISO day of week of `instant`.
#[inline]
pub fn day_of_week(instant: i64) -> i32 {
    day_of_week_from_days(epoch_day(instant))
}

/// Epoch day of the Monday starting week 1 of `weekyear`.
fn weekyear_start_days(weekyear: i32) -> i64 {
    // Week 1 is the week holding January 4th.
    let jan_4 = days_from_civil(weekyear, 1, 4);
    jan_4 - i64::from(day_of_week_from_days(jan_4) - 1)
}

/// Number of ISO weeks (52 or 53) in `weekyear`.
pub fn weeks_in_weekyear(weekyear: i32) -> i32 {
    let span = weekyear_start_days(weekyear + 1) - weekyear_start_days(weekyear);
    (span / 7) as i32
}

/// `(weekyear, weekOfWeekyear, dayOfWeek)` of `instant`.
pub fn iso_from_millis(instant: i64) -> IsoWeekDate {
    let days = epoch_day(instant);
    let (calendar_year, _, _) = civil_from_days(days);

    let weekyear = if days >= weekyear_start_days(calendar_year + 1) {
        calendar_year + 1
    } else if days < weekyear_start_days(calendar_year) {
        calendar_year - 1
    } else {
        calendar_year
    };

    let week = (days - weekyear_start_days(weekyear)) / 7 + 1;
    IsoWeekDate {
        weekyear,
        week: week as i32,
        day_of_week: day_of_week_from_days(days),
    }
}

// ---------------------------------------------------------------------------
// Fields → instant
// ---------------------------------------------------------------------------

fn verify_year(field: &'static str, year: i32) -> TimeResult<()> {
    verify_value_bounds(
        field,
        i64::from(year),
        i64::from(MIN_YEAR),
        i64::from(MAX_YEAR),
    )
}

/// Midnight starting `day` in the given epoch-day count, checked.
#[inline]
fn millis_from_days(days: i64) -> TimeResult<i64> {
    safe_multiply(days, MILLIS_PER_DAY)
}

/// Midnight of the calendar date `year-month-day`.
pub fn millis_from_ymd(year: i32, month: i32, day: i32) -> TimeResult<i64> {
    verify_year("year", year)?;
    verify_value_bounds("monthOfYear", i64::from(month), 1, 12)?;
    verify_value_bounds(
        "dayOfMonth",
        i64::from(day),
        1,
        i64::from(days_in_month(year, month)),
    )?;
    millis_from_days(days_from_civil(year, month, day))
}

/// Midnight of January 1st of `year`.
pub fn year_start_millis(year: i32) -> TimeResult<i64> {
    millis_from_ymd(year, 1, 1)
}

/// Midnight of the given ISO week date.
///
/// `week` may be `53` even when `weekyear` only has 52 weeks; the result is
/// then the matching day of week 1 of the following weekyear. The weekyear
/// field relies on this to detect targets lacking a 53rd week.
pub fn millis_from_iso(weekyear: i32, week: i32, day_of_week: i32) -> TimeResult<i64> {
    verify_year("weekyear", weekyear)?;
    verify_value_bounds("weekOfWeekyear", i64::from(week), 1, 53)?;
    verify_value_bounds("dayOfWeek", i64::from(day_of_week), 1, 7)?;
    let days = weekyear_start_days(weekyear)
        + i64::from(week - 1) * 7
        + i64::from(day_of_week - 1);
    millis_from_days(days)
}

/// Moves `instant` into `year`, keeping month, time of day and (where the
/// target month allows it) day of month. February 29th becomes the 28th in
/// a common year.
pub fn set_year(instant: i64, year: i32) -> TimeResult<i64> {
    verify_year("year", year)?;
    let ymd = ymd_from_millis(instant);
    let day = ymd.day.min(days_in_month(year, ymd.month));
    let midnight = millis_from_ymd(year, ymd.month, day)?;
    safe_add(midnight, time_only_millis(instant))
}

/// Moves `instant` into `weekyear`, keeping week number, day of week and
/// time of day.
///
/// If the source lies in week 53 and the target weekyear has only 52 weeks,
/// the naive mapping spills into week 1 of the next weekyear; the result is
/// then moved back by exactly one week so it lands in week 52 of the target.
pub fn set_weekyear(instant: i64, weekyear: i32) -> TimeResult<i64> {
    let iso = iso_from_millis(instant);
    let midnight = millis_from_iso(weekyear, iso.week, iso.day_of_week)?;
    let mut millis = safe_add(midnight, time_only_millis(instant))?;
    if iso.week == 53 && iso_from_millis(millis).weekyear != weekyear {
        millis = safe_subtract(millis, MILLIS_PER_WEEK)?;
    }
    Ok(millis)
}

/// Start of the weekyear containing `instant` (Monday of week 1, 00:00).
pub fn weekyear_start_millis(weekyear: i32) -> TimeResult<i64> {
    millis_from_iso(weekyear, 1, 1)
}

/// January 1st of the year of some instant, saturating at `i64::MIN` when
/// that midnight precedes the timeline.
pub(crate) fn year_floor_millis(year: i32) -> i64 {
    days_from_civil(year, 1, 1).saturating_mul(MILLIS_PER_DAY)
}

/// Weekyear counterpart of [`year_floor_millis`].
pub(crate) fn weekyear_floor_millis(weekyear: i32) -> i64 {
    weekyear_start_days(weekyear).saturating_mul(MILLIS_PER_DAY)
}

/// Fails with [`TimeError::Overflow`] when a carried year leaves the
/// representable range.
pub(crate) fn carry_year(operation: &'static str, year: i64) -> TimeResult<i32> {
    if year < i64::from(MIN_YEAR) || year > i64::from(MAX_YEAR) {
        return Err(TimeError::overflow(format!("{operation}: year {year}")));
    }
    Ok(year as i32)
}

// ---------------------------------------------------------------------------
// Field set
// ---------------------------------------------------------------------------

/// The ISO duration fields, indexed by [`DurationFieldType`](crate::DurationFieldType) order.
pub(crate) fn iso_durations() -> Vec<Arc<dyn DurationField>> {
    vec![
        Arc::new(ERAS),
        Arc::new(durations::YEARS),
        Arc::new(durations::WEEKYEARS),
        Arc::new(durations::MONTHS),
        Arc::new(WEEKS),
        Arc::new(DAYS),
        Arc::new(HOURS),
        Arc::new(MINUTES),
        Arc::new(SECONDS),
        Arc::new(MILLIS),
    ]
}

/// The ISO date-time fields, indexed by [`DateTimeFieldType`] order.
pub(crate) fn iso_fields() -> Vec<Arc<dyn DateTimeField>> {
    vec![
        Arc::new(GjEraField),
        Arc::new(GjYearOfEraField),
        Arc::new(GjYearField),
        Arc::new(GjWeekyearField),
        Arc::new(GjWeekOfWeekyearField),
        Arc::new(GjMonthOfYearField),
        Arc::new(GjDayOfMonthField),
        Arc::new(GjDayOfYearField),
        Arc::new(GjDayOfWeekField),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::HourOfDay, &HOURS, &DAYS)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::MinuteOfDay, &MINUTES, &DAYS)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::MinuteOfHour, &MINUTES, &HOURS)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::SecondOfDay, &SECONDS, &DAYS)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::SecondOfMinute, &SECONDS, &MINUTES)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::MillisOfDay, &MILLIS, &DAYS)),
        Arc::new(PreciseDateTimeField::new(DateTimeFieldType::MillisOfSecond, &MILLIS, &SECONDS)),
    ]
}
