// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Names of the calendar axes and units a chronology can provide.
//!
//! A [`DateTimeFieldType`] or [`DurationFieldType`] is only an identifier; the
//! arithmetic lives in the field objects a [`Chronology`](crate::Chronology)
//! hands out for it.

use std::fmt;

/// A unit of calendar duration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationFieldType {
    Eras,
    Years,
    Weekyears,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl DurationFieldType {
    /// Every unit, largest first.
    pub const ALL: [DurationFieldType; 10] = [
        Self::Eras,
        Self::Years,
        Self::Weekyears,
        Self::Months,
        Self::Weeks,
        Self::Days,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::Millis,
    ];

    /// The conventional lower-camel-case unit name, e.g. `"weekyears"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eras => "eras",
            Self::Years => "years",
            Self::Weekyears => "weekyears",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Millis => "millis",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DurationFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A calendar-relative axis such as year or day-of-week.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeFieldType {
    Era,
    YearOfEra,
    Year,
    Weekyear,
    WeekOfWeekyear,
    MonthOfYear,
    DayOfMonth,
    DayOfYear,
    DayOfWeek,
    HourOfDay,
    MinuteOfDay,
    MinuteOfHour,
    SecondOfDay,
    SecondOfMinute,
    MillisOfDay,
    MillisOfSecond,
}

impl DateTimeFieldType {
    /// Every field type, in registry order.
    pub const ALL: [DateTimeFieldType; 16] = [
        Self::Era,
        Self::YearOfEra,
        Self::Year,
        Self::Weekyear,
        Self::WeekOfWeekyear,
        Self::MonthOfYear,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::DayOfWeek,
        Self::HourOfDay,
        Self::MinuteOfDay,
        Self::MinuteOfHour,
        Self::SecondOfDay,
        Self::SecondOfMinute,
        Self::MillisOfDay,
        Self::MillisOfSecond,
    ];

    /// The conventional lower-camel-case field name, e.g. `"dayOfYear"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Era => "era",
            Self::YearOfEra => "yearOfEra",
            Self::Year => "year",
            Self::Weekyear => "weekyear",
            Self::WeekOfWeekyear => "weekOfWeekyear",
            Self::MonthOfYear => "monthOfYear",
            Self::DayOfMonth => "dayOfMonth",
            Self::DayOfYear => "dayOfYear",
            Self::DayOfWeek => "dayOfWeek",
            Self::HourOfDay => "hourOfDay",
            Self::MinuteOfDay => "minuteOfDay",
            Self::MinuteOfHour => "minuteOfHour",
            Self::SecondOfDay => "secondOfDay",
            Self::SecondOfMinute => "secondOfMinute",
            Self::MillisOfDay => "millisOfDay",
            Self::MillisOfSecond => "millisOfSecond",
        }
    }

    /// The unit this field counts in.
    pub const fn duration_type(self) -> DurationFieldType {
        match self {
            Self::Era => DurationFieldType::Eras,
            Self::YearOfEra | Self::Year => DurationFieldType::Years,
            Self::Weekyear => DurationFieldType::Weekyears,
            Self::WeekOfWeekyear => DurationFieldType::Weeks,
            Self::MonthOfYear => DurationFieldType::Months,
            Self::DayOfMonth | Self::DayOfYear | Self::DayOfWeek => DurationFieldType::Days,
            Self::HourOfDay => DurationFieldType::Hours,
            Self::MinuteOfDay | Self::MinuteOfHour => DurationFieldType::Minutes,
            Self::SecondOfDay | Self::SecondOfMinute => DurationFieldType::Seconds,
            Self::MillisOfDay | Self::MillisOfSecond => DurationFieldType::Millis,
        }
    }

    /// The unit one level up, if the field has a bounded range.
    pub const fn range_type(self) -> Option<DurationFieldType> {
        match self {
            Self::Era | Self::Year | Self::Weekyear => None,
            Self::YearOfEra => Some(DurationFieldType::Eras),
            Self::WeekOfWeekyear => Some(DurationFieldType::Weekyears),
            Self::MonthOfYear | Self::DayOfYear => Some(DurationFieldType::Years),
            Self::DayOfMonth => Some(DurationFieldType::Months),
            Self::DayOfWeek => Some(DurationFieldType::Weeks),
            Self::HourOfDay | Self::MinuteOfDay | Self::SecondOfDay | Self::MillisOfDay => {
                Some(DurationFieldType::Days)
            }
            Self::MinuteOfHour => Some(DurationFieldType::Hours),
            Self::SecondOfMinute => Some(DurationFieldType::Minutes),
            Self::MillisOfSecond => Some(DurationFieldType::Seconds),
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DateTimeFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_camel_case() {
        assert_eq!(DateTimeFieldType::WeekOfWeekyear.name(), "weekOfWeekyear");
        assert_eq!(DurationFieldType::Weekyears.to_string(), "weekyears");
    }

    #[test]
    fn units_are_ordered_largest_first() {
        let mut sorted = DurationFieldType::ALL;
        sorted.sort();
        assert_eq!(sorted, DurationFieldType::ALL);
        assert!(DurationFieldType::Years < DurationFieldType::Millis);
    }

    #[test]
    fn index_matches_registry_order() {
        for (i, ty) in DateTimeFieldType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
        }
        for (i, ty) in DurationFieldType::ALL.iter().enumerate() {
            assert_eq!(ty.index(), i);
        }
    }

    #[test]
    fn range_is_one_level_up() {
        assert_eq!(
            DateTimeFieldType::DayOfMonth.range_type(),
            Some(DurationFieldType::Months)
        );
        assert_eq!(DateTimeFieldType::Weekyear.range_type(), None);
        assert_eq!(
            DateTimeFieldType::WeekOfWeekyear.duration_type(),
            DurationFieldType::Weeks
        );
    }
}
