// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date fields backed by the GJ engine.
//!
//! Each field is a zero-sized handle: all state comes from the instant and
//! all calendar math from the parent module.

use super::durations::{MONTHS, WEEKYEARS, YEARS};
use super::{
    day_of_week, days_in_month, days_in_year, epoch_day, is_leap_year, iso_from_millis,
    millis_from_ymd, set_weekyear, set_year, time_only_millis, weekyear_floor_millis,
    weeks_in_weekyear, year, year_floor_millis, year_start_millis, ymd_from_millis, AD, BC,
    MAX_YEAR, MILLIS_PER_DAY, MILLIS_PER_WEEK, MIN_YEAR,
};
use crate::duration_field::{DurationField, DAYS, ERAS, WEEKS};
use crate::error::{TimeError, TimeResult};
use crate::field::DateTimeField;
use crate::field_type::DateTimeFieldType;
use crate::safe::{safe_add, safe_multiply, verify_value_bounds};

/// Shifts `instant` by whole days so a day-granular field moves from
/// `current` to `value`.
fn shift_days(instant: i64, current: i32, value: i32) -> TimeResult<i64> {
    let delta = i64::from(value) - i64::from(current);
    safe_add(instant, safe_multiply(delta, MILLIS_PER_DAY)?)
}

fn day_floor(instant: i64) -> TimeResult<i64> {
    safe_multiply(epoch_day(instant), MILLIS_PER_DAY)
}

fn verify(field: &dyn DateTimeField, value: i32, lower: i32, upper: i32) -> TimeResult<()> {
    verify_value_bounds(
        field.name(),
        i64::from(value),
        i64::from(lower),
        i64::from(upper),
    )
}

// ---------------------------------------------------------------------------
// Era and years
// ---------------------------------------------------------------------------

/// `BC` (0) for years `<= 0`, `AD` (1) otherwise.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjEraField;

impl DateTimeField for GjEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn get(&self, instant: i64) -> i32 {
        if year(instant) <= 0 {
            BC
        } else {
            AD
        }
    }

    fn value_as_text(&self, value: i32) -> String {
        let text = if value == BC { "BC" } else { "AD" };
        text.to_owned()
    }

    /// Switching era mirrors the year around year 1, so year-of-era is kept.
    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, BC, AD)?;
        if self.get(instant) == value {
            return Ok(instant);
        }
        set_year(instant, 1 - year(instant))
    }

    fn set_text(&self, instant: i64, text: &str) -> TimeResult<i64> {
        let era = match text.trim() {
            "BC" | "BCE" => BC,
            "AD" | "CE" => AD,
            _ => return Err(TimeError::invalid_text(self.name(), text)),
        };
        self.set(instant, era)
    }

    fn add(&self, _instant: i64, _value: i64) -> TimeResult<i64> {
        Err(TimeError::unsupported(self.name(), "add"))
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> TimeResult<i64> {
        Err(TimeError::unsupported(self.name(), "difference"))
    }

    fn duration_field(&self) -> &dyn DurationField {
        &ERAS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn minimum_value(&self) -> i32 {
        BC
    }

    fn maximum_value(&self) -> i32 {
        AD
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        if self.get(instant) == AD {
            year_start_millis(1)
        } else {
            Ok(i64::MIN)
        }
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        if self.get(instant) == BC {
            year_start_millis(1)
        } else {
            Ok(i64::MAX)
        }
    }

    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }

    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        self.round_floor(instant)
    }
}

/// Proleptic year, with year `0` before year `1`.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjYearField;

impl DateTimeField for GjYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Year
    }

    fn get(&self, instant: i64) -> i32 {
        year(instant)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, MIN_YEAR, MAX_YEAR)?;
        set_year(instant, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &YEARS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&DAYS)
    }

    fn is_leap(&self, instant: i64) -> bool {
        is_leap_year(year(instant))
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
    }

    fn minimum_value(&self) -> i32 {
        MIN_YEAR
    }

    fn maximum_value(&self) -> i32 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(year_floor_millis(year(instant)))
    }
}

/// Year counted within its era: `1` is both 1 AD and 1 BC.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjYearOfEraField;

impl DateTimeField for GjYearOfEraField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::YearOfEra
    }

    fn get(&self, instant: i64) -> i32 {
        let year = year(instant);
        if year <= 0 {
            1 - year
        } else {
            year
        }
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, 1, self.maximum_value())?;
        if year(instant) <= 0 {
            set_year(instant, 1 - value)
        } else {
            set_year(instant, value)
        }
    }

    fn duration_field(&self) -> &dyn DurationField {
        &YEARS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&ERAS)
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&DAYS)
    }

    fn is_leap(&self, instant: i64) -> bool {
        is_leap_year(year(instant))
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(year_floor_millis(year(instant)))
    }
}

// ---------------------------------------------------------------------------
// ISO week date
// ---------------------------------------------------------------------------

/// ISO week-based year. Setting it keeps week and day of week, backing off
/// one week when the target has no week 53.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjWeekyearField;

impl DateTimeField for GjWeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Weekyear
    }

    fn get(&self, instant: i64) -> i32 {
        iso_from_millis(instant).weekyear
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, MIN_YEAR, MAX_YEAR)?;
        set_weekyear(instant, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &WEEKYEARS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&WEEKS)
    }

    fn is_leap(&self, instant: i64) -> bool {
        weeks_in_weekyear(self.get(instant)) > 52
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        weeks_in_weekyear(self.get(instant)) - 52
    }

    fn minimum_value(&self) -> i32 {
        MIN_YEAR
    }

    fn maximum_value(&self) -> i32 {
        MAX_YEAR
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        Ok(weekyear_floor_millis(self.get(instant)))
    }
}

/// ISO week number, 1 to 52 or 53.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjWeekOfWeekyearField;

impl DateTimeField for GjWeekOfWeekyearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::WeekOfWeekyear
    }

    fn get(&self, instant: i64) -> i32 {
        iso_from_millis(instant).week
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, 1, self.maximum_value_at(instant))?;
        let delta = i64::from(value) - i64::from(self.get(instant));
        safe_add(instant, safe_multiply(delta, MILLIS_PER_WEEK)?)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &WEEKS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&WEEKYEARS)
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        53
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        weeks_in_weekyear(iso_from_millis(instant).weekyear)
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        let monday = epoch_day(instant) - i64::from(day_of_week(instant) - 1);
        safe_multiply(monday, MILLIS_PER_DAY)
    }
}

/// ISO day of week: `1` = Monday … `7` = Sunday.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjDayOfWeekField;

impl DateTimeField for GjDayOfWeekField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfWeek
    }

    fn get(&self, instant: i64) -> i32 {
        day_of_week(instant)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, 1, 7)?;
        shift_days(instant, self.get(instant), value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &DAYS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&WEEKS)
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        7
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        day_floor(instant)
    }
}

// ---------------------------------------------------------------------------
// Month and day
// ---------------------------------------------------------------------------

/// Month of year, 1 to 12. Setting clamps day-of-month to the new month.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjMonthOfYearField;

impl DateTimeField for GjMonthOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::MonthOfYear
    }

    fn get(&self, instant: i64) -> i32 {
        ymd_from_millis(instant).month
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify(self, value, 1, 12)?;
        let ymd = ymd_from_millis(instant);
        let day = ymd.day.min(days_in_month(ymd.year, value));
        safe_add(
            millis_from_ymd(ymd.year, value, day)?,
            time_only_millis(instant),
        )
    }

    fn duration_field(&self) -> &dyn DurationField {
        &MONTHS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&YEARS)
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&DAYS)
    }

    /// February of a leap year.
    fn is_leap(&self, instant: i64) -> bool {
        let ymd = ymd_from_millis(instant);
        ymd.month == 2 && is_leap_year(ymd.year)
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        12
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        let ymd = ymd_from_millis(instant);
        millis_from_ymd(ymd.year, ymd.month, 1)
    }
}

/// Day of month, 1 to the month's length.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjDayOfMonthField;

impl DateTimeField for GjDayOfMonthField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfMonth
    }

    fn get(&self, instant: i64) -> i32 {
        ymd_from_millis(instant).day
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let ymd = ymd_from_millis(instant);
        verify(self, value, 1, days_in_month(ymd.year, ymd.month))?;
        shift_days(instant, ymd.day, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &DAYS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&MONTHS)
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&DAYS)
    }

    /// The month is February of a leap year.
    fn is_leap(&self, instant: i64) -> bool {
        let ymd = ymd_from_millis(instant);
        ymd.month == 2 && is_leap_year(ymd.year)
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        31
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        let ymd = ymd_from_millis(instant);
        days_in_month(ymd.year, ymd.month)
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        day_floor(instant)
    }
}

/// Day of year, 1 to 365 or 366.
#[derive(Debug, Copy, Clone, Default)]
pub struct GjDayOfYearField;

impl DateTimeField for GjDayOfYearField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::DayOfYear
    }

    fn get(&self, instant: i64) -> i32 {
        ymd_from_millis(instant).day_of_year
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let ymd = ymd_from_millis(instant);
        verify(self, value, 1, days_in_year(ymd.year))?;
        shift_days(instant, ymd.day_of_year, value)
    }

    fn duration_field(&self) -> &dyn DurationField {
        &DAYS
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&YEARS)
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        Some(&DAYS)
    }

    /// The year has 366 days.
    fn is_leap(&self, instant: i64) -> bool {
        is_leap_year(year(instant))
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        i32::from(self.is_leap(instant))
    }

    fn minimum_value(&self) -> i32 {
        1
    }

    fn maximum_value(&self) -> i32 {
        366
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        days_in_year(year(instant))
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        day_floor(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        Ok(time_only_millis(instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: i32, d: i32) -> i64 {
        millis_from_ymd(y, m, d).unwrap()
    }

    // 2002-06-09T05:06:07.008 (Sunday)
    fn june_9() -> i64 {
        ymd(2002, 6, 9) + 5 * 3_600_000 + 6 * 60_000 + 7_008
    }

    #[test]
    fn reads_calendar_date() {
        let t = june_9();
        assert_eq!(GjYearField.get(t), 2002);
        assert_eq!(GjMonthOfYearField.get(t), 6);
        assert_eq!(GjDayOfMonthField.get(t), 9);
        assert_eq!(GjDayOfYearField.get(t), 160);
        assert_eq!(GjWeekyearField.get(t), 2002);
        assert_eq!(GjWeekOfWeekyearField.get(t), 23);
        assert_eq!(GjDayOfWeekField.get(t), 7);
        assert_eq!(GjEraField.get(t), AD);
        assert_eq!(GjYearOfEraField.get(t), 2002);
    }

    #[test]
    fn setting_week_date_fields() {
        let t = june_9();
        let time = time_only_millis(t);
        assert_eq!(GjWeekyearField.set(t, 2001), Ok(ymd(2001, 6, 10) + time));
        assert_eq!(GjWeekOfWeekyearField.set(t, 2), Ok(ymd(2002, 1, 13) + time));
        assert_eq!(GjDayOfWeekField.set(t, 5), Ok(ymd(2002, 6, 7) + time));
        assert!(GjWeekOfWeekyearField.set(t, 53).is_err());
        assert!(GjDayOfWeekField.set(t, 8).is_err());
    }

    #[test]
    fn setting_date_fields_validates_against_context() {
        let t = june_9();
        assert!(GjMonthOfYearField.set(t, 13).is_err());
        assert!(GjDayOfMonthField.set(t, 31).is_err());
        assert!(GjDayOfYearField.set(t, 366).is_err());
        assert!(GjDayOfYearField.set(ymd(2004, 1, 1), 366).is_ok());
        assert_eq!(
            GjMonthOfYearField.set(ymd(2002, 5, 31), 6),
            Ok(ymd(2002, 6, 30))
        );
    }

    #[test]
    fn weekyear_set_backs_off_from_week_53() {
        let t = ymd(2004, 12, 31);
        let moved = GjWeekyearField.set(t, 2005).unwrap();
        assert_eq!(GjWeekyearField.get(moved), 2005);
        assert_eq!(GjWeekOfWeekyearField.get(moved), 52);
        assert_eq!(GjDayOfWeekField.get(moved), 5);
    }

    #[test]
    fn weekyear_leap_and_floor() {
        let t = ymd(2004, 7, 1);
        assert!(GjWeekyearField.is_leap(t));
        assert_eq!(GjWeekyearField.leap_amount(t), 1);
        assert!(!GjWeekyearField.is_leap(ymd(2005, 7, 1)));
        // week 1 of 2004 starts on Monday 2003-12-29
        assert_eq!(GjWeekyearField.round_floor(t), Ok(ymd(2003, 12, 29)));
        assert_eq!(GjWeekyearField.remainder(ymd(2003, 12, 30)), Ok(MILLIS_PER_DAY));
        assert_eq!(GjWeekOfWeekyearField.maximum_value_at(t), 53);
        assert_eq!(GjWeekOfWeekyearField.maximum_value_at(ymd(2005, 7, 1)), 52);
    }

    #[test]
    fn year_fields_cover_the_whole_timeline() {
        let fields: [&dyn DateTimeField; 3] = [&GjYearField, &GjYearOfEraField, &GjWeekyearField];
        for field in fields {
            for instant in [i64::MIN, i64::MIN + 1, i64::MAX - 1, i64::MAX] {
                let value = field.get(instant);
                assert!(
                    (field.minimum_value()..=field.maximum_value()).contains(&value),
                    "{:?} at {instant} read {value}",
                    field.field_type()
                );
                let floor = field.round_floor(instant).unwrap();
                assert!(floor <= instant);
                assert!(field.remainder(instant).is_ok());
            }
        }

        assert_eq!(GjYearField.get(i64::MAX), MAX_YEAR);
        assert_eq!(GjYearField.get(i64::MIN), MIN_YEAR);
        assert_eq!(GjYearField.round_floor(i64::MAX), year_start_millis(MAX_YEAR));
        assert_eq!(GjYearOfEraField.round_floor(i64::MAX), year_start_millis(MAX_YEAR));
        // January 1st of the earliest year precedes the timeline.
        assert_eq!(GjYearField.round_floor(i64::MIN + 1), Ok(i64::MIN));
        assert!(GjYearField.round_ceiling(i64::MAX).is_err());
        assert!(GjYearField.set(i64::MAX, MAX_YEAR + 1).is_err());
    }

    #[test]
    fn era_switch_keeps_year_of_era() {
        let t = ymd(2000, 3, 15);
        let bc = GjEraField.set(t, BC).unwrap();
        assert_eq!(GjYearField.get(bc), -1999);
        assert_eq!(GjYearOfEraField.get(bc), 2000);
        assert_eq!(GjEraField.as_text(bc), "BC");
        assert_eq!(GjEraField.set_text(bc, "AD"), Ok(t));
        assert!(GjEraField.set(t, 2).is_err());
        assert!(GjEraField.set_text(t, "XX").is_err());
    }

    #[test]
    fn year_of_era_in_bc() {
        let t = ymd(0, 6, 1);
        assert_eq!(GjYearOfEraField.get(t), 1);
        assert_eq!(GjEraField.get(t), BC);
        let moved = GjYearOfEraField.set(t, 5).unwrap();
        assert_eq!(GjYearField.get(moved), -4);
        assert!(GjYearOfEraField.set(t, 0).is_err());
    }

    #[test]
    fn era_rounding() {
        assert_eq!(GjEraField.round_floor(ymd(2000, 1, 1)), year_start_millis(1));
        assert_eq!(GjEraField.round_floor(ymd(-5, 1, 1)), Ok(i64::MIN));
        assert_eq!(GjEraField.round_ceiling(ymd(-5, 1, 1)), year_start_millis(1));
        assert_eq!(GjEraField.round_ceiling(ymd(5, 1, 1)), Ok(i64::MAX));
    }

    #[test]
    fn wrapped_add_stays_in_range() {
        let t = ymd(2002, 11, 15);
        let wrapped = GjMonthOfYearField.add_wrapped(t, 3).unwrap();
        assert_eq!(wrapped, ymd(2002, 2, 15));

        let last = ymd(2002, 12, 31);
        assert_eq!(GjDayOfYearField.add_wrapped(last, 1), Ok(ymd(2002, 1, 1)));
        assert_eq!(GjDayOfWeekField.add_wrapped(june_9(), 1).map(day_of_week), Ok(1));
    }

    #[test]
    fn leap_reporting() {
        assert!(GjYearField.is_leap(ymd(2004, 5, 1)));
        assert!(!GjYearField.is_leap(ymd(1900, 5, 1)));
        assert!(GjMonthOfYearField.is_leap(ymd(2004, 2, 3)));
        assert!(!GjMonthOfYearField.is_leap(ymd(2004, 3, 3)));
        assert!(GjDayOfYearField.is_leap(ymd(2004, 12, 31)));
        assert_eq!(GjDayOfYearField.maximum_value_at(ymd(2004, 1, 1)), 366);
        assert_eq!(GjDayOfMonthField.maximum_value_at(ymd(2003, 2, 1)), 28);
    }

    #[test]
    fn rounding_date_fields() {
        let t = june_9();
        assert_eq!(GjYearField.round_floor(t), Ok(ymd(2002, 1, 1)));
        assert_eq!(GjYearField.round_ceiling(t), Ok(ymd(2003, 1, 1)));
        assert_eq!(GjMonthOfYearField.round_floor(t), Ok(ymd(2002, 6, 1)));
        assert_eq!(GjMonthOfYearField.round_ceiling(t), Ok(ymd(2002, 7, 1)));
        assert_eq!(GjDayOfMonthField.round_floor(t), Ok(ymd(2002, 6, 9)));
        assert_eq!(GjDayOfMonthField.round_half_floor(t), Ok(ymd(2002, 6, 9)));
        assert_eq!(GjWeekOfWeekyearField.round_floor(t), Ok(ymd(2002, 6, 3)));
        assert_eq!(GjDayOfYearField.remainder(t), Ok(time_only_millis(t)));
    }
}
