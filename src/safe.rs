// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Overflow-checked integer arithmetic.
//!
//! Every instant/duration combination in the crate is routed through these
//! helpers. A result that does not fit is reported as
//! [`TimeError::Overflow`]; nothing ever wraps silently.

use crate::error::{TimeError, TimeResult};

/// `a + b`, or [`TimeError::Overflow`].
#[inline]
pub fn safe_add(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_add(b)
        .ok_or_else(|| TimeError::overflow(format!("{a} + {b}")))
}

/// `a - b`, or [`TimeError::Overflow`].
#[inline]
pub fn safe_subtract(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_sub(b)
        .ok_or_else(|| TimeError::overflow(format!("{a} - {b}")))
}

/// `a * b`, or [`TimeError::Overflow`].
#[inline]
pub fn safe_multiply(a: i64, b: i64) -> TimeResult<i64> {
    a.checked_mul(b)
        .ok_or_else(|| TimeError::overflow(format!("{a} * {b}")))
}

/// `-a`, or [`TimeError::Overflow`] for `i64::MIN`.
#[inline]
pub fn safe_negate(a: i64) -> TimeResult<i64> {
    a.checked_neg()
        .ok_or_else(|| TimeError::overflow(format!("-({a})")))
}

/// `a + b` over 32-bit field values.
#[inline]
pub fn safe_add_i32(a: i32, b: i32) -> TimeResult<i32> {
    a.checked_add(b)
        .ok_or_else(|| TimeError::overflow(format!("{a} + {b}")))
}

/// `a * b` over 32-bit field values.
#[inline]
pub fn safe_multiply_i32(a: i32, b: i32) -> TimeResult<i32> {
    a.checked_mul(b)
        .ok_or_else(|| TimeError::overflow(format!("{a} * {b}")))
}

/// Narrows a 64-bit count to a 32-bit field value.
#[inline]
pub fn safe_to_i32(value: i64) -> TimeResult<i32> {
    i32::try_from(value).map_err(|_| TimeError::overflow(format!("{value} as i32")))
}

/// Checks `lower <= value <= upper` for the named field.
#[inline]
pub fn verify_value_bounds(field: &'static str, value: i64, lower: i64, upper: i64) -> TimeResult<()> {
    if value < lower || value > upper {
        return Err(TimeError::out_of_range(field, value, lower, upper));
    }
    Ok(())
}

/// Wraps `value` into `[min, max]` as a ring of `max - min + 1` slots.
///
/// Used by wrapped addition: `13` in `[1, 12]` becomes `1`, `0` becomes `12`.
#[inline]
pub fn wrap_value(value: i64, min: i64, max: i64) -> i64 {
    let span = max - min + 1;
    (value - min).rem_euclid(span) + min
}
