// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Imprecise calendar units: months, years and weekyears.

use super::{
    carry_year, days_in_month, is_leap_year, iso_from_millis, millis_from_ymd, set_weekyear,
    set_year, time_only_millis, weekyear_start_millis, weeks_in_weekyear, year_start_millis,
    ymd_from_millis, MILLIS_PER_DAY, MILLIS_PER_WEEK,
};
use crate::duration_field::DurationField;
use crate::error::{TimeError, TimeResult};
use crate::field_type::DurationFieldType;
use crate::safe::{safe_add, safe_negate, safe_subtract};

/// Milliseconds from January 1st to February 29th of a leap year.
const FEB_29: i64 = (31 + 28) * MILLIS_PER_DAY;
/// Milliseconds from the start of a weekyear to the start of its week 53.
const WEEK_53: i64 = 52 * MILLIS_PER_WEEK;

/// Average Gregorian year: 365.2425 days.
const AVERAGE_YEAR_MILLIS: i64 = 31_556_952_000;
const AVERAGE_MONTH_MILLIS: i64 = AVERAGE_YEAR_MILLIS / 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum CalendarUnit {
    Months,
    Years,
    Weekyears,
}

/// A unit whose length depends on where in the calendar it is applied.
///
/// Adding keeps the smaller fields where possible: day-of-month is clamped to
/// the target month's length, and a week-53 date moved into a 52-week
/// weekyear lands in week 52.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CalendarDurationField {
    unit: CalendarUnit,
}

pub(crate) static MONTHS: CalendarDurationField = CalendarDurationField {
    unit: CalendarUnit::Months,
};
pub(crate) static YEARS: CalendarDurationField = CalendarDurationField {
    unit: CalendarUnit::Years,
};
pub(crate) static WEEKYEARS: CalendarDurationField = CalendarDurationField {
    unit: CalendarUnit::Weekyears,
};

impl CalendarDurationField {
    fn add_months(instant: i64, months: i64) -> TimeResult<i64> {
        let ymd = ymd_from_millis(instant);
        let total = (i64::from(ymd.year) * 12 + i64::from(ymd.month - 1))
            .checked_add(months)
            .ok_or_else(|| TimeError::overflow(format!("{instant} + {months} months")))?;
        let year = carry_year("add months", total.div_euclid(12))?;
        let month = total.rem_euclid(12) as i32 + 1;
        let day = ymd.day.min(days_in_month(year, month));
        safe_add(millis_from_ymd(year, month, day)?, time_only_millis(instant))
    }

    fn add_years(instant: i64, years: i64) -> TimeResult<i64> {
        let target = i64::from(ymd_from_millis(instant).year).saturating_add(years);
        set_year(instant, carry_year("add years", target)?)
    }

    fn add_weekyears(instant: i64, weekyears: i64) -> TimeResult<i64> {
        let target = i64::from(iso_from_millis(instant).weekyear).saturating_add(weekyears);
        set_weekyear(instant, carry_year("add weekyears", target)?)
    }

    /// Whole months from `subtrahend` to `minuend`, where `minuend >= subtrahend`.
    fn month_difference(minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        let m = ymd_from_millis(minuend);
        let s = ymd_from_millis(subtrahend);
        let mut difference =
            (i64::from(m.year) - i64::from(s.year)) * 12 + i64::from(m.month - s.month);

        // A month-end minuend counts as a full month from any later day,
        // mirroring the clamping done by `add_months`.
        let mut subtrahend = subtrahend;
        if m.day == days_in_month(m.year, m.month) && s.day > m.day {
            subtrahend = safe_subtract(subtrahend, i64::from(s.day - m.day) * MILLIS_PER_DAY)?;
        }

        let minuend_rem = minuend - millis_from_ymd(m.year, m.month, 1)?;
        let subtrahend_rem = subtrahend - millis_from_ymd(s.year, s.month, 1)?;
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }

    fn year_difference(minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        let minuend_year = ymd_from_millis(minuend).year;
        let subtrahend_year = ymd_from_millis(subtrahend).year;
        let mut minuend_rem = minuend - year_start_millis(minuend_year)?;
        let mut subtrahend_rem = subtrahend - year_start_millis(subtrahend_year)?;

        // Balance leap-day offsets so that Mar 1 -> Mar 1 is a full year.
        if subtrahend_rem >= FEB_29 {
            if is_leap_year(subtrahend_year) {
                if !is_leap_year(minuend_year) {
                    subtrahend_rem -= MILLIS_PER_DAY;
                }
            } else if minuend_rem >= FEB_29 && is_leap_year(minuend_year) {
                minuend_rem -= MILLIS_PER_DAY;
            }
        }

        let mut difference = i64::from(minuend_year) - i64::from(subtrahend_year);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }

    fn weekyear_difference(minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        let minuend_weekyear = iso_from_millis(minuend).weekyear;
        let subtrahend_weekyear = iso_from_millis(subtrahend).weekyear;
        let minuend_rem = minuend - weekyear_start_millis(minuend_weekyear)?;
        let mut subtrahend_rem = subtrahend - weekyear_start_millis(subtrahend_weekyear)?;

        if subtrahend_rem >= WEEK_53 && weeks_in_weekyear(minuend_weekyear) <= 52 {
            subtrahend_rem -= MILLIS_PER_WEEK;
        }

        let mut difference = i64::from(minuend_weekyear) - i64::from(subtrahend_weekyear);
        if minuend_rem < subtrahend_rem {
            difference -= 1;
        }
        Ok(difference)
    }
}

impl DurationField for CalendarDurationField {
    fn field_type(&self) -> DurationFieldType {
        match self.unit {
            CalendarUnit::Months => DurationFieldType::Months,
            CalendarUnit::Years => DurationFieldType::Years,
            CalendarUnit::Weekyears => DurationFieldType::Weekyears,
        }
    }

    fn is_precise(&self) -> bool {
        false
    }

    fn unit_millis(&self) -> i64 {
        match self.unit {
            CalendarUnit::Months => AVERAGE_MONTH_MILLIS,
            CalendarUnit::Years | CalendarUnit::Weekyears => AVERAGE_YEAR_MILLIS,
        }
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        if value == 0 {
            return Ok(instant);
        }
        match self.unit {
            CalendarUnit::Months => Self::add_months(instant, value),
            CalendarUnit::Years => Self::add_years(instant, value),
            CalendarUnit::Weekyears => Self::add_weekyears(instant, value),
        }
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        if minuend < subtrahend {
            return safe_negate(self.difference(subtrahend, minuend)?);
        }
        match self.unit {
            CalendarUnit::Months => Self::month_difference(minuend, subtrahend),
            CalendarUnit::Years => Self::year_difference(minuend, subtrahend),
            CalendarUnit::Weekyears => Self::weekyear_difference(minuend, subtrahend),
        }
    }
}
