// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fixed-offset zone decorators.
//!
//! Calendar fields compute on *local* milliseconds. A zoned chronology wraps
//! each field so that callers keep passing UTC instants:
//!
//! ```text
//! utc ──(+ offset)──▶ local ──field──▶ local' ──(- offset)──▶ utc'
//! ```
//!
//! Only fixed offsets are modelled ([`chrono::FixedOffset`]), so the
//! conversion is a constant shift and never ambiguous. Reads saturate at the
//! ends of the timeline; writes report [`Overflow`](crate::TimeError::Overflow).

use crate::duration_field::DurationField;
use crate::error::TimeResult;
use crate::field::DateTimeField;
use crate::field_type::{DateTimeFieldType, DurationFieldType};
use crate::safe::{safe_add, safe_subtract};
use chrono::FixedOffset;
use std::sync::Arc;

/// Offset of `zone` east of UTC, in milliseconds.
#[inline]
pub fn offset_millis(zone: FixedOffset) -> i64 {
    i64::from(zone.local_minus_utc()) * 1_000
}

/// An imprecise unit evaluated in local time.
#[derive(Debug, Clone)]
pub struct ZonedDurationField {
    inner: Arc<dyn DurationField>,
    offset: i64,
}

impl ZonedDurationField {
    /// Wraps `inner` unless it is precise, in which case the offset cannot
    /// affect it and `inner` is returned as-is.
    pub fn wrap(inner: Arc<dyn DurationField>, offset: i64) -> Arc<dyn DurationField> {
        if offset == 0 || inner.is_precise() {
            return inner;
        }
        Arc::new(Self { inner, offset })
    }
}

impl DurationField for ZonedDurationField {
    fn field_type(&self) -> DurationFieldType {
        self.inner.field_type()
    }

    fn is_supported(&self) -> bool {
        self.inner.is_supported()
    }

    fn is_precise(&self) -> bool {
        self.inner.is_precise()
    }

    fn unit_millis(&self) -> i64 {
        self.inner.unit_millis()
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        let local = safe_add(instant, self.offset)?;
        safe_subtract(self.inner.add(local, value)?, self.offset)
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.inner.difference(
            safe_add(minuend, self.offset)?,
            safe_add(subtrahend, self.offset)?,
        )
    }
}

/// A date-time field evaluated in local time.
#[derive(Debug, Clone)]
pub struct ZonedDateTimeField {
    inner: Arc<dyn DateTimeField>,
    offset: i64,
    duration: Arc<dyn DurationField>,
    range: Option<Arc<dyn DurationField>>,
    leap: Option<Arc<dyn DurationField>>,
}

impl ZonedDateTimeField {
    /// Wraps `inner`; the duration fields must already be zoned.
    pub fn new(
        inner: Arc<dyn DateTimeField>,
        offset: i64,
        duration: Arc<dyn DurationField>,
        range: Option<Arc<dyn DurationField>>,
        leap: Option<Arc<dyn DurationField>>,
    ) -> Self {
        Self {
            inner,
            offset,
            duration,
            range,
            leap,
        }
    }

    #[inline]
    fn local(&self, instant: i64) -> i64 {
        instant.saturating_add(self.offset)
    }

    #[inline]
    fn checked_local(&self, instant: i64) -> TimeResult<i64> {
        safe_add(instant, self.offset)
    }

    #[inline]
    fn to_utc(&self, local: i64) -> TimeResult<i64> {
        safe_subtract(local, self.offset)
    }

    /// Runs a local-time transform on a UTC instant.
    fn through_local(
        &self,
        instant: i64,
        op: impl FnOnce(i64) -> TimeResult<i64>,
    ) -> TimeResult<i64> {
        let local = self.checked_local(instant)?;
        self.to_utc(op(local)?)
    }
}

impl DateTimeField for ZonedDateTimeField {
    fn field_type(&self) -> DateTimeFieldType {
        self.inner.field_type()
    }

    fn is_supported(&self) -> bool {
        self.inner.is_supported()
    }

    fn get(&self, instant: i64) -> i32 {
        self.inner.get(self.local(instant))
    }

    fn value_as_text(&self, value: i32) -> String {
        self.inner.value_as_text(value)
    }

    fn as_text(&self, instant: i64) -> String {
        self.inner.as_text(self.local(instant))
    }

    fn set(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.set(local, value))
    }

    fn set_text(&self, instant: i64, text: &str) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.set_text(local, text))
    }

    fn add(&self, instant: i64, value: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.add(local, value))
    }

    fn add_wrapped(&self, instant: i64, value: i32) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.add_wrapped(local, value))
    }

    fn difference(&self, minuend: i64, subtrahend: i64) -> TimeResult<i64> {
        self.inner.difference(
            self.checked_local(minuend)?,
            self.checked_local(subtrahend)?,
        )
    }

    fn duration_field(&self) -> &dyn DurationField {
        &*self.duration
    }

    fn range_duration_field(&self) -> Option<&dyn DurationField> {
        self.range.as_deref()
    }

    fn leap_duration_field(&self) -> Option<&dyn DurationField> {
        self.leap.as_deref()
    }

    fn is_leap(&self, instant: i64) -> bool {
        self.inner.is_leap(self.local(instant))
    }

    fn leap_amount(&self, instant: i64) -> i32 {
        self.inner.leap_amount(self.local(instant))
    }

    fn minimum_value(&self) -> i32 {
        self.inner.minimum_value()
    }

    fn minimum_value_at(&self, instant: i64) -> i32 {
        self.inner.minimum_value_at(self.local(instant))
    }

    fn maximum_value(&self) -> i32 {
        self.inner.maximum_value()
    }

    fn maximum_value_at(&self, instant: i64) -> i32 {
        self.inner.maximum_value_at(self.local(instant))
    }

    fn maximum_text_length(&self) -> usize {
        self.inner.maximum_text_length()
    }

    fn round_floor(&self, instant: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.round_floor(local))
    }

    fn round_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.round_ceiling(local))
    }

    fn round_half_floor(&self, instant: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.round_half_floor(local))
    }

    fn round_half_ceiling(&self, instant: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.round_half_ceiling(local))
    }

    fn round_half_even(&self, instant: i64) -> TimeResult<i64> {
        self.through_local(instant, |local| self.inner.round_half_even(local))
    }

    fn remainder(&self, instant: i64) -> TimeResult<i64> {
        self.inner.remainder(self.checked_local(instant)?)
    }
}

/// Rewrites a UTC field set in place so every field and unit reads local
/// time at `zone`.
pub(crate) fn localize(
    fields: &mut [Arc<dyn DateTimeField>],
    durations: &mut [Arc<dyn DurationField>],
    zone: FixedOffset,
) {
    let offset = offset_millis(zone);
    if offset == 0 {
        return;
    }
    for duration in durations.iter_mut() {
        *duration = ZonedDurationField::wrap(duration.clone(), offset);
    }
    // `durations` holds every unit, in `DurationFieldType::ALL` order.
    let zoned = |unit: &dyn DurationField| durations[unit.field_type().index()].clone();
    for field in fields.iter_mut() {
        let duration = zoned(field.duration_field());
        let range = field.range_duration_field().map(zoned);
        let leap = field.leap_duration_field().map(zoned);
        *field = Arc::new(ZonedDateTimeField::new(
            field.clone(),
            offset,
            duration,
            range,
            leap,
        ));
    }
}
