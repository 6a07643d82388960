// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Duration fields: units of calendar length.
//!
//! A [`DurationField`] adds whole units to an instant and measures how many
//! whole units separate two instants. Precise units (millis up to weeks) have
//! a fixed length; calendar units (months, years, weekyears) vary with the
//! instant they are applied to and are provided by the [`gj`](crate::gj)
//! engine. Eras have no duration arithmetic at all.

use crate::error::{TimeError, TimeResult};
use crate::field_type::DurationFieldType;
use crate::gj::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, MILLIS_PER_WEEK,
};
use crate::safe::{safe_add, safe_multiply, safe_subtract};
use std::fmt;

/// A unit of time that instants can be shifted and measured by.
///
/// For every supported field and in-range inputs:
///
/// ```text
/// difference(add(t, v), t) == v
/// ```
///
/// `difference` truncates toward zero, so a partial unit never counts.
pub trait DurationField: fmt::Debug + Send + Sync {
    fn field_type(&self) -> DurationFieldType;

    fn name(&self) -> &'static str {
        self.field_type().name()
    }

    fn is_supported(&self) -> bool {
        true
    }

    /// `true` when every unit has the same length in milliseconds.
    fn is_precise(&self) -> bool;

    /// Length of one unit in milliseconds; an average for imprecise units.
    fn unit_millis(&self) -> i64;

    /// `instant` shifted by `value` units.
    fn add(&self, instant: i64, value: i64) -> TimeResult<i64>;

    /// Whole units from `subtrahend` to `minuend`, truncated toward zero.
    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64>;

    /// Milliseconds spanned by `value` units starting at `instant`.
    fn millis_at(&self, value: i64, instant: i64) -> TimeResult<i64> {
        let end = self.add(instant, value)?;
        safe_subtract(end, instant)
    }

    /// Whole units contained in `duration` milliseconds starting at `instant`.
    fn value_at(&self, duration: i64, instant: i64) -> TimeResult<i64> {
        let end = safe_add(instant, duration)?;
        self.difference(end, instant)
    }
}

/// A unit with a fixed millisecond length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PreciseDurationField {
    field_type: DurationFieldType,
    unit_millis: i64,
}

impl PreciseDurationField {
    pub const fn new(field_type: DurationFieldType, unit_millis: i64) -> Self {
        Self {
            field_type,
            unit_millis,
        }
    }
}

impl DurationField for PreciseDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        self.unit_millis
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        safe_add(instant, safe_multiply(value, self.unit_millis)?)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        Ok(safe_subtract(minuend, subtrahend)? / self.unit_millis)
    }

    fn millis_at(&self, value: i64, _instant: i64) -> TimeResult<i64> {
        safe_multiply(value, self.unit_millis)
    }

    fn value_at(&self, duration: i64, _instant: i64) -> TimeResult<i64> {
        Ok(duration / self.unit_millis)
    }
}

/// A unit the chronology does not model. Every arithmetic call fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnsupportedDurationField {
    field_type: DurationFieldType,
}

impl UnsupportedDurationField {
    pub const fn new(field_type: DurationFieldType) -> Self {
        Self { field_type }
    }

    fn fail<T>(&self, operation: &'static str) -> TimeResult<T> {
        Err(TimeError::unsupported(self.field_type.name(), operation))
    }
}

impl DurationField for UnsupportedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.field_type
    }

    fn is_supported(&self) -> bool {
        false
    }

    // Nothing varies, so it is trivially precise.
    fn is_precise(&self) -> bool {
        true
    }

    fn unit_millis(&self) -> i64 {
        0
    }

    fn add(&self, _instant: i64, _value: i64) -> TimeResult<i64> {
        self.fail("add")
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> TimeResult<i64> {
        self.fail("difference")
    }

    fn millis_at(&self, _value: i64, _instant: i64) -> TimeResult<i64> {
        self.fail("millis")
    }

    fn value_at(&self, _duration: i64, _instant: i64) -> TimeResult<i64> {
        self.fail("value")
    }
}

pub(crate) static MILLIS: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Millis, 1);
pub(crate) static SECONDS: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Seconds, MILLIS_PER_SECOND);
pub(crate) static MINUTES: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Minutes, MILLIS_PER_MINUTE);
pub(crate) static HOURS: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Hours, MILLIS_PER_HOUR);
pub(crate) static DAYS: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Days, MILLIS_PER_DAY);
pub(crate) static WEEKS: PreciseDurationField =
    PreciseDurationField::new(DurationFieldType::Weeks, MILLIS_PER_WEEK);
pub(crate) static ERAS: UnsupportedDurationField =
    UnsupportedDurationField::new(DurationFieldType::Eras);
