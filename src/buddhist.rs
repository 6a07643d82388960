// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Buddhist (Thai solar) calendar.
//!
//! Same structure as ISO: months, days and weeks are untouched. Only the
//! year numbering changes: BE = ISO + 543, and the calendar has a single
//! era, `BE`.

use crate::field::{DateTimeField, FixedEraDateTimeField, OffsetDateTimeField};
use crate::field_type::DateTimeFieldType;
use crate::gj::MAX_YEAR;
use std::sync::Arc;

/// The only era value of the Buddhist calendar.
pub const BE: i32 = 1;

/// Years added to the ISO year to obtain the Buddhist year.
pub const BUDDHIST_OFFSET: i32 = 543;

/// The Buddhist era field: always `BE`, textual form `"BE"`.
pub static BUDDHIST_ERA: FixedEraDateTimeField = FixedEraDateTimeField::new(BE, "BE");

/// Replaces the year-numbering fields of an ISO field set.
pub(crate) fn renumber(fields: &mut [Arc<dyn DateTimeField>]) {
    let iso_year = fields[DateTimeFieldType::Year.index()].clone();
    let iso_weekyear = fields[DateTimeFieldType::Weekyear.index()].clone();

    fields[DateTimeFieldType::Era.index()] = Arc::new(BUDDHIST_ERA);
    fields[DateTimeFieldType::Year.index()] = Arc::new(OffsetDateTimeField::new(
        iso_year.clone(),
        DateTimeFieldType::Year,
        BUDDHIST_OFFSET,
    ));
    fields[DateTimeFieldType::YearOfEra.index()] = Arc::new(OffsetDateTimeField::with_bounds(
        iso_year,
        DateTimeFieldType::YearOfEra,
        BUDDHIST_OFFSET,
        1,
        MAX_YEAR + BUDDHIST_OFFSET,
    ));
    fields[DateTimeFieldType::Weekyear.index()] = Arc::new(OffsetDateTimeField::new(
        iso_weekyear,
        DateTimeFieldType::Weekyear,
        BUDDHIST_OFFSET,
    ));
}
