// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date-time fields: calendar axes read from and written to an instant.
//!
//! A [`DateTimeField`] projects a millisecond instant onto one axis (the
//! year, the day of the week, the second of the minute …) and writes a new
//! value back. Implementations only supply the axis-specific pieces
//! (`get`, `set`, bounds and `round_floor`); wrapped addition, ceiling and
//! half-way rounding, text handling and remainders are derived here.
//!
//! Generic strategies live in this module:
//!
//! - [`PreciseDateTimeField`]: fixed-length unit within a fixed-length range
//!   (time of day).
//! - [`OffsetDateTimeField`]: another field shifted by a constant, used for
//!   the Buddhist year numbering.
//! - [`FixedEraDateTimeField`]: a calendar with a single era.
//!
//! Calendar-backed fields are in [`gj`](crate::gj) and zone decorators in
//! [`zone`](crate::zone).

use crate::duration_field::{DurationField, PreciseDurationField, UnsupportedDurationField};
use crate::error::{TimeError, TimeResult};
use crate::field_type::{DateTimeFieldType, DurationFieldType};
use crate::safe::{safe_add, safe_multiply, safe_subtract, verify_value_bounds, wrap_value};
use std::fmt;
use std::sync::Arc;

/// A calendar axis over millisecond instants.
///
/// For any supported field, instant `t` and in-range value `v`:
///
/// - `minimum_value_at(t) <= get(t) <= maximum_value_at(t)`
/// - `get(set(t, v)?) == v`
/// - `round_floor(t)? <= t <= round_ceiling(t)?`
/// - `remainder(t)? == t - round_floor(t)?`
///
/// Values outside the bounds are rejected with
/// [`TimeError::FieldOutOfRange`]; no field is lenient.
pub trait DateTimeField: fmt::Debug + Send + Sync {
    fn field_type(&self) -> DateTimeFieldType;

    fn name(&self) -> &'static str {
        self.field_type().name()
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn is_lenient(&self) -> bool {
        false
    }

    // ---------------------------------------------------------------------
    // Reading
    // ---------------------------------------------------------------------

    /// The field value at `instant`.
    fn get(&self, instant: i64) -> i32;

    /// Text for an arbitrary value of this field.
    fn value_as_text(&self, value: i32) -> String {
        value.to_string()
    }

    /// Text for the field value at `instant`.
    fn as_text(&self, instant: i64) -> String {
        self.value_as_text(self.get(instant))
    }

    // ---------------------------------------------------------------------
    // Writing
    // ---------------------------------------------------------------------

    /// `instant` with this field replaced by `value`. Larger fields are
    /// kept; smaller fields are kept where the new value allows it.
    fn set(&self, instant: i64, value: i32) -> TimeResult<i64>;

    /// Parses `text` and sets it. Numeric by default.
    fn set_text(&self, instant: i64, text: &str) -> TimeResult<i64> {
        let value = text
            .trim()
            .parse::<i32>()
            .map_err(|_| TimeError::invalid_text(self.name(), text))?;
        self.set(instant, value)
    }

    /// Adds `value` units of this field's duration, carrying into larger
    /// fields.
    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.duration_field().add(instant, value)
    }

    /// Adds `value` units without carrying: the field value wraps around
    /// within its bounds and no other field changes.
    fn add_wrapped(&self, instant: i64, value: i32) -> TimeResult<i64> {
        let current = i64::from(self.get(instant));
        let wrapped = wrap_value(
            current + i64::from(value),
            i64::from(self.minimum_value_at(instant)),
            i64::from(self.maximum_value_at(instant)),
        );
        // wrapped lies within the field's i32 bounds
        self.set(instant, wrapped as i32)
    }

    /// Whole units of this field's duration from `subtrahend` to `minuend`.
    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.duration_field().difference(minuend, subtrahend)
    }

    // ---------------------------------------------------------------------
    // Structure
    // ---------------------------------------------------------------------

    /// The unit this field counts in.
    fn duration_field(&self) -> &dyn DurationField;

    /// The unit bounding this field's range, if any.
    fn range_duration_field(&self) -> Option<&dyn DurationField>;

    /// The unit a leap adds, if this field has leaps.
    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    /// Whether the field is longer than nominal at `instant`.
    fn is_leap(&self, _instant: i64) -> bool {
        false
    }

    /// How many leap units apply at `instant`.
    fn leap_amount(&self, _instant: i64) -> i32 {
        0
    }

    fn minimum_value(&self) -> i32;

    fn minimum_value_at(&self, _instant: i64) -> i32 {
        self.minimum_value()
    }

    fn maximum_value(&self) -> i32;

    fn maximum_value_at(&self, _instant: i64) -> i32 {
        self.maximum_value()
    }

    /// Widest text produced by [`value_as_text`](Self::value_as_text).
    fn maximum_text_length(&self) -> usize {
        let min = self.value_as_text(self.minimum_value()).len();
        let max = self.value_as_text(self.maximum_value()).len();
        min.max(max)
    }

    // ---------------------------------------------------------------------
    // Rounding
    // ---------------------------------------------------------------------

    /// Largest instant `<= instant` at which every smaller field is at its
    /// minimum.
    fn round_floor(&self, instant: i64) -> TimeResult<i64>;

    /// Smallest instant `>= instant` at which every smaller field is at its
    /// minimum.
    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        let floor = self.round_floor(instant)?;
        if floor == instant {
            return Ok(instant);
        }
        self.add(floor, 1)
    }

    /// Nearest of floor and ceiling; ties go to the floor.
    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        let (floor, ceiling, below, above) = half_bounds(self, instant)?;
        Ok(if above < below { ceiling } else { floor })
    }

    /// Nearest of floor and ceiling; ties go to the ceiling.
    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        let (floor, ceiling, below, above) = half_bounds(self, instant)?;
        Ok(if below < above { floor } else { ceiling })
    }

    /// Nearest of floor and ceiling; ties go to whichever gives an even
    /// field value.
    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        let (floor, ceiling, below, above) = half_bounds(self, instant)?;
        Ok(match below.cmp(&above) {
            std::cmp::Ordering::Less => floor,
            std::cmp::Ordering::Greater => ceiling,
            std::cmp::Ordering::Equal if self.get(ceiling) & 1 == 0 => ceiling,
            std::cmp::Ordering::Equal => floor,
        })
    }

    /// `instant - round_floor(instant)`.
    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        safe_subtract(instant, self.round_floor(instant)?)
    }
}

/// `(floor, ceiling, instant - floor, ceiling - instant)`.
fn half_bounds<F: DateTimeField + ?Sized>(
    field: &F,
    instant: i64,
) -> TimeResult<(i64, i64, i64, i64)> {
    let floor = field.round_floor(instant)?;
    let ceiling = field.round_ceiling(instant)?;
    Ok((
        floor,
        ceiling,
        safe_subtract(instant, floor)?,
        safe_subtract(ceiling, instant)?,
    ))
}

// ---------------------------------------------------------------------------
// Precise time-of-day fields
// ---------------------------------------------------------------------------

/// A field counting fixed-length units inside a fixed-length range, e.g.
/// minute-of-hour. Values run from `0` to `range / unit - 1`.
#[derive(Debug, Copy, Clone)]
pub struct PreciseDateTimeField {
    field_type: DateTimeFieldType,
    unit: &'static PreciseDurationField,
    range: &'static PreciseDurationField,
}

impl PreciseDateTimeField {
    pub const fn new(
        field_type: DateTimeFieldType,
        unit: &'static PreciseDurationField,
        range: &'static PreciseDurationField,
    ) -> Self {
        Self {
            field_type,
            unit,
            range,
        }
    }

    fn unit_millis(&self) -> i64 {
        self.unit.unit_millis()
    }

    fn units_per_range(&self) -> i64 {
        self.range.unit_millis() / self.unit_millis()
    }
}

impl DateTimeField for PreciseDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i32 {
        (instant.rem_euclid(self.range.unit_millis()) / self.unit_millis()) as i32
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_value_bounds(
            self.name(),
            i64::from(value),
            0,
            i64::from(self.maximum_value()),
        )?;
        let delta = i64::from(value) - i64::from(self.get(instant));
        safe_add(instant, safe_multiply(delta, self.unit_millis())?)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.unit
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        Some(self.range)
    }

    fn minimum_value(&self) -> i32 {
        0
    }

    fn maximum_value(&self) -> i32 {
        (self.units_per_range() - 1) as i32
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        safe_subtract(instant, instant.rem_euclid(self.unit_millis()))
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        Ok(instant.rem_euclid(self.unit_millis()))
    }
}

// ---------------------------------------------------------------------------
// Offset fields
// ---------------------------------------------------------------------------

/// Another field's values shifted by a constant.
///
/// Used to renumber years for calendars that share the Gregorian structure
/// but count from a different epoch year.
#[derive(Debug, Clone)]
pub struct OffsetDateTimeField {
    inner: Arc<dyn DateTimeField>,
    field_type: DateTimeFieldType,
    offset: i32,
    min: i32,
    max: i32,
}

impl OffsetDateTimeField {
    /// Shifts `inner` by `offset`, with bounds following the inner field's.
    pub fn new(inner: Arc<dyn DateTimeField>, field_type: DateTimeFieldType, offset: i32) -> Self {
        Self::with_bounds(inner, field_type, offset, i32::MIN, i32::MAX)
    }

    /// Shifts `inner` by `offset` and narrows the bounds to `[min, max]`.
    /// Bounds never extend past the shifted inner bounds.
    pub fn with_bounds(
        inner: Arc<dyn DateTimeField>,
        field_type: DateTimeFieldType,
        offset: i32,
        min: i32,
        max: i32,
    ) -> Self {
        let inner_min = inner.minimum_value().saturating_add(offset);
        let inner_max = inner.maximum_value().saturating_add(offset);
        Self {
            inner,
            field_type,
            offset,
            min: min.max(inner_min),
            max: max.min(inner_max),
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }
}

impl DateTimeField for OffsetDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.field_type
    }

    fn get(&self, instant: i64) -> i32 {
        self.inner.get(instant).saturating_add(self.offset)
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_value_bounds(
            self.name(),
            i64::from(value),
            i64::from(self.min),
            i64::from(self.max),
        )?;
        let inner_value = value
            .checked_sub(self.offset)
            .ok_or_else(|| TimeError::overflow(format!("{value} - {}", self.offset)))?;
        self.inner.set(instant, inner_value)
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.inner.add(instant, value)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.inner.difference(minuend, subtrahend)
    }

    fn duration_field(&self) -> &dyn DurationField {
        self.inner.duration_field()
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        self.inner.range_duration_field()
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        self.inner.leap_duration_field()
    }

    fn is_leap(&self, instant: i64) -> bool {
        self.inner.is_leap(instant)
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        self.inner.leap_amount(instant)
    }

    fn minimum_value(&self) -> i32 {
        self.min
    }

    fn maximum_value(&self) -> i32 {
        self.max
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.inner.round_floor(instant)
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.inner.round_ceiling(instant)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.inner.remainder(instant)
    }
}

// ---------------------------------------------------------------------------
// Single-era field
// ---------------------------------------------------------------------------

/// The era of a calendar that only has one.
///
/// `get` is constant, `set` accepts only that era and leaves the instant
/// untouched, and there is no era arithmetic. Rounding sends every instant
/// to the start or end of time: the whole timeline is one era.
#[derive(Debug, Copy, Clone)]
pub struct FixedEraDateTimeField {
    era: i32,
    text: &'static str,
    duration: UnsupportedDurationField,
}

impl FixedEraDateTimeField {
    pub const fn new(era: i32, text: &'static str) -> Self {
        Self {
            era,
            text,
            duration: UnsupportedDurationField::new(DurationFieldType::Eras),
        }
    }
}

impl DateTimeField for FixedEraDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        DateTimeFieldType::Era
    }

    fn get(&self, _instant: i64) -> i32 {
        self.era
    }

    fn value_as_text(&self, _value: i32) -> String {
        self.text.to_owned()
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        verify_value_bounds(
            self.name(),
            i64::from(value),
            i64::from(self.era),
            i64::from(self.era),
        )?;
        Ok(instant)
    }

    fn set_text(&self, instant: i64, text: &str) -> TimeResult<i64> {
        if text != self.text {
            return Err(TimeError::invalid_text(self.name(), text));
        }
        Ok(instant)
    }

    fn add(&self, _instant: i64, _value: i64) -> TimeResult<i64> {
        Err(TimeError::unsupported(self.name(), "add"))
    }

    fn add_wrapped(&self, _instant: i64, _value: i32) -> TimeResult<i64> {
        Err(TimeError::unsupported(self.name(), "add_wrapped"))
    }

    fn difference(&self, _minuend: i64, _subtrahend: i64) -> TimeResult<i64> {
        Err(TimeError::unsupported(self.name(), "difference"))
    }

    fn duration_field(&self) -> &dyn DurationField {
        &self.duration
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        None
    }

    fn minimum_value(&self) -> i32 {
        self.era
    }

    fn maximum_value(&self) -> i32 {
        self.era
    }

    fn maximum_text_length(&self) -> usize {
        self.text.len()
    }

    fn round_floor(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_ceiling(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MAX)
    }

    fn round_half_floor(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_ceiling(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn round_half_even(&self, _instant: i64) -> TimeResult<i64> {
        Ok(i64::MIN)
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        safe_subtract(instant, i64::MIN)
    }
}
