// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chronologies: complete, consistent sets of calendar fields.
//!
//! A [`Chronology`] is identified by a [`CalendarKind`] and a fixed UTC
//! offset. Each distinct pair is built once, on first use, and kept in a
//! process-wide registry for the rest of the program; a `Chronology` value is
//! a `Copy` handle into that registry.
//!
//! ```text
//! ISO fields (gj) ──▶ renumber years (Buddhist only) ──▶ localize (offset ≠ 0)
//! ```
//!
//! Every field a chronology hands out shares the same duration fields, so
//! `year().is_leap(t)` always agrees with `day_of_year().maximum_value_at(t)`.

use crate::buddhist;
use crate::config::TimeConfig;
use crate::duration_field::DurationField;
use crate::error::{TimeError, TimeResult};
use crate::field::DateTimeField;
use crate::field_type::{DateTimeFieldType, DurationFieldType};
use crate::gj;
use crate::period::{Period, PeriodType};
use crate::safe::{safe_add, safe_multiply, safe_to_i32};
use crate::zone;
use chrono::{FixedOffset, Offset, Utc};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::debug;

/// Calendar systems a [`Chronology`] can be built for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CalendarKind {
    /// Proleptic Gregorian with ISO-8601 weeks.
    #[default]
    Iso,
    /// ISO structure with Buddhist Era year numbering.
    Buddhist,
}

impl CalendarKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso => "ISO",
            Self::Buddhist => "Buddhist",
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarKind {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "buddhist" => Ok(Self::Buddhist),
            _ => Err(TimeError::invalid_text("calendar", s)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════

type RegistryKey = (CalendarKind, FixedOffset);

#[derive(Debug)]
struct ChronologyData {
    kind: CalendarKind,
    zone: FixedOffset,
    /// Indexed by [`DateTimeFieldType::index`].
    fields: Vec<Arc<dyn DateTimeField>>,
    /// Indexed by [`DurationFieldType::index`].
    durations: Vec<Arc<dyn DurationField>>,
}

impl ChronologyData {
    fn build(kind: CalendarKind, zone: FixedOffset) -> Self {
        let mut fields = gj::iso_fields();
        let mut durations = gj::iso_durations();
        if kind == CalendarKind::Buddhist {
            buddhist::renumber(&mut fields);
        }
        zone::localize(&mut fields, &mut durations, zone);
        Self {
            kind,
            zone,
            fields,
            durations,
        }
    }
}

static REGISTRY: OnceLock<RwLock<HashMap<RegistryKey, &'static ChronologyData>>> = OnceLock::new();

fn registry() -> &'static RwLock<HashMap<RegistryKey, &'static ChronologyData>> {
    REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
}

// ═══════════════════════════════════════════════════════════════════════════
// Chronology
// ═══════════════════════════════════════════════════════════════════════════

/// A calendar system at a fixed UTC offset.
///
/// Equality and hashing consider only the calendar kind and the offset.
#[derive(Copy, Clone)]
pub struct Chronology {
    data: &'static ChronologyData,
}

/// The UTC offset.
#[inline]
pub fn utc() -> FixedOffset {
    Utc.fix()
}

impl Chronology {
    // ── constructors ──────────────────────────────────────────────────

    /// The chronology for `kind` at `zone`, building it on first request.
    pub fn get(kind: CalendarKind, zone: FixedOffset) -> Self {
        let key = (kind, zone);
        let cached = registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .copied();
        if let Some(data) = cached {
            return Self { data };
        }

        let mut map = registry().write().unwrap_or_else(PoisonError::into_inner);
        let data = *map.entry(key).or_insert_with(|| {
            debug!(calendar = kind.name(), offset = %zone, "building chronology");
            let data: &'static ChronologyData =
                Box::leak(Box::new(ChronologyData::build(kind, zone)));
            data
        });
        Self { data }
    }

    /// ISO at UTC.
    pub fn iso() -> Self {
        Self::get(CalendarKind::Iso, utc())
    }

    pub fn iso_in(zone: FixedOffset) -> Self {
        Self::get(CalendarKind::Iso, zone)
    }

    /// Buddhist at UTC.
    pub fn buddhist() -> Self {
        Self::get(CalendarKind::Buddhist, utc())
    }

    pub fn buddhist_in(zone: FixedOffset) -> Self {
        Self::get(CalendarKind::Buddhist, zone)
    }

    /// The calendar and offset named by the process [`TimeConfig`].
    pub fn default_configured() -> Self {
        let config = TimeConfig::current();
        Self::get(config.calendar, config.offset)
    }

    // ── identity ──────────────────────────────────────────────────────

    pub fn kind(&self) -> CalendarKind {
        self.data.kind
    }

    pub fn zone(&self) -> FixedOffset {
        self.data.zone
    }

    /// Offset east of UTC in milliseconds.
    pub fn offset_millis(&self) -> i64 {
        zone::offset_millis(self.data.zone)
    }

    /// Same calendar at another offset.
    pub fn with_zone(&self, zone: FixedOffset) -> Self {
        Self::get(self.data.kind, zone)
    }

    /// Same calendar at UTC.
    pub fn with_utc(&self) -> Self {
        self.with_zone(utc())
    }

    // ── fields ────────────────────────────────────────────────────────

    pub fn field(&self, field_type: DateTimeFieldType) -> &'static dyn DateTimeField {
        &*self.data.fields[field_type.index()]
    }

    pub fn duration_field(&self, field_type: DurationFieldType) -> &'static dyn DurationField {
        &*self.data.durations[field_type.index()]
    }

    pub fn era(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::Era)
    }

    pub fn year_of_era(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::YearOfEra)
    }

    pub fn year(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::Year)
    }

    pub fn weekyear(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::Weekyear)
    }

    pub fn week_of_weekyear(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::WeekOfWeekyear)
    }

    pub fn month_of_year(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::MonthOfYear)
    }

    pub fn day_of_month(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::DayOfMonth)
    }

    pub fn day_of_year(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::DayOfYear)
    }

    pub fn day_of_week(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::DayOfWeek)
    }

    pub fn hour_of_day(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::HourOfDay)
    }

    pub fn minute_of_day(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::MinuteOfDay)
    }

    pub fn minute_of_hour(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::MinuteOfHour)
    }

    pub fn second_of_day(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::SecondOfDay)
    }

    pub fn second_of_minute(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::SecondOfMinute)
    }

    pub fn millis_of_day(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::MillisOfDay)
    }

    pub fn millis_of_second(&self) -> &'static dyn DateTimeField {
        self.field(DateTimeFieldType::MillisOfSecond)
    }

    pub fn eras(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Eras)
    }

    pub fn years(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Years)
    }

    pub fn weekyears(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Weekyears)
    }

    pub fn months(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Months)
    }

    pub fn weeks(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Weeks)
    }

    pub fn days(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Days)
    }

    pub fn hours(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Hours)
    }

    pub fn minutes(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Minutes)
    }

    pub fn seconds(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Seconds)
    }

    pub fn millis(&self) -> &'static dyn DurationField {
        self.duration_field(DurationFieldType::Millis)
    }

    // ── composite operations ──────────────────────────────────────────

    /// The instant at which the local calendar reads the given date and time.
    #[allow(clippy::too_many_arguments)]
    pub fn date_time_millis(
        &self,
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        hour_of_day: i32,
        minute_of_hour: i32,
        second_of_minute: i32,
        millis_of_second: i32,
    ) -> TimeResult<i64> {
        let mut instant = self.date_millis(year, month_of_year, day_of_month, 0)?;
        instant = self.hour_of_day().set(instant, hour_of_day)?;
        instant = self.minute_of_hour().set(instant, minute_of_hour)?;
        instant = self.second_of_minute().set(instant, second_of_minute)?;
        self.millis_of_second().set(instant, millis_of_second)
    }

    /// The instant at which the local calendar reads the given date and
    /// `millis_of_day`.
    pub fn date_millis(
        &self,
        year: i32,
        month_of_year: i32,
        day_of_month: i32,
        millis_of_day: i32,
    ) -> TimeResult<i64> {
        // Start from the 1st so the year and month writes cannot clamp.
        let mut instant = self.millis_of_day().set(0, 0)?;
        instant = self.day_of_month().set(instant, 1)?;
        instant = self.year().set(instant, year)?;
        instant = self.month_of_year().set(instant, month_of_year)?;
        instant = self.day_of_month().set(instant, day_of_month)?;
        self.millis_of_day().set(instant, millis_of_day)
    }

    /// `instant + scalar * period`, applying units largest first.
    pub fn add_period(&self, period: &Period, instant: i64, scalar: i32) -> TimeResult<i64> {
        if scalar == 0 {
            return Ok(instant);
        }
        let mut instant = instant;
        for (unit, value) in period.iter() {
            if value != 0 {
                let amount = safe_multiply(i64::from(value), i64::from(scalar))?;
                instant = self.duration_field(unit).add(instant, amount)?;
            }
        }
        Ok(instant)
    }

    /// `instant + scalar * duration` on the absolute timeline.
    pub fn add_duration(&self, instant: i64, duration: i64, scalar: i32) -> TimeResult<i64> {
        if duration == 0 || scalar == 0 {
            return Ok(instant);
        }
        safe_add(instant, safe_multiply(duration, i64::from(scalar))?)
    }

    /// Splits `[start, end]` into the units of `period_type`, largest first:
    /// each unit takes as many whole steps as fit, and the remainder flows
    /// to the next smaller unit.
    pub fn period_values(
        &self,
        period_type: PeriodType,
        start: i64,
        end: i64,
    ) -> TimeResult<Period> {
        let mut period = Period::zero_of(period_type);
        if start == end {
            return Ok(period);
        }
        let mut cursor = start;
        for unit in period_type.fields() {
            let field = self.duration_field(unit);
            if !field.is_supported() {
                continue;
            }
            let value = field.difference(end, cursor)?;
            cursor = field.add(cursor, value)?;
            period = period.with_field(unit, safe_to_i32(value)?)?;
        }
        Ok(period)
    }
}

impl Default for Chronology {
    fn default() -> Self {
        Self::default_configured()
    }
}

impl PartialEq for Chronology {
    fn eq(&self, other: &Self) -> bool {
        self.data.kind == other.data.kind && self.data.zone == other.data.zone
    }
}

impl Eq for Chronology {}

impl Hash for Chronology {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.kind.hash(state);
        self.data.zone.hash(state);
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.zone == utc() {
            write!(f, "{}Chronology[UTC]", self.data.kind)
        } else {
            write!(f, "{}Chronology[{}]", self.data.kind, self.data.zone)
        }
    }
}

impl fmt::Debug for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gj::{millis_from_ymd, MILLIS_PER_HOUR};

    fn plus_hours(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3_600).unwrap()
    }

    #[test]
    fn registry_hands_out_one_instance_per_key() {
        let a = Chronology::iso_in(plus_hours(4));
        let b = Chronology::get(CalendarKind::Iso, plus_hours(4));
        assert!(std::ptr::eq(a.data, b.data));
        assert_eq!(a, b);
        assert_ne!(a, Chronology::iso());
        assert_ne!(Chronology::iso(), Chronology::buddhist());
        assert_eq!(a.with_utc(), Chronology::iso());
    }

    #[test]
    fn calendar_kind_parses_case_insensitively() {
        assert_eq!("ISO".parse::<CalendarKind>(), Ok(CalendarKind::Iso));
        assert_eq!(" buddhist ".parse::<CalendarKind>(), Ok(CalendarKind::Buddhist));
        assert!(matches!(
            "julian".parse::<CalendarKind>(),
            Err(TimeError::InvalidText { .. })
        ));
    }

    #[test]
    fn display_names_calendar_and_zone() {
        assert_eq!(Chronology::iso().to_string(), "ISOChronology[UTC]");
        assert_eq!(
            Chronology::buddhist_in(plus_hours(7)).to_string(),
            "BuddhistChronology[+07:00]"
        );
    }

    #[test]
    fn date_time_millis_validates_every_field() {
        let iso = Chronology::iso();
        assert_eq!(
            iso.date_time_millis(2002, 6, 9, 5, 6, 7, 8),
            Ok(millis_from_ymd(2002, 6, 9).unwrap() + 5 * MILLIS_PER_HOUR + 6 * 60_000 + 7_008)
        );
        assert_eq!(
            iso.date_time_millis(2004, 2, 29, 0, 0, 0, 0),
            millis_from_ymd(2004, 2, 29)
        );
        assert!(iso.date_time_millis(2003, 2, 29, 0, 0, 0, 0).is_err());
        assert!(iso.date_time_millis(2003, 1, 1, 24, 0, 0, 0).is_err());
    }

    #[test]
    fn zoned_date_time_millis_is_local() {
        let plus_two = Chronology::iso_in(plus_hours(2));
        let local_midnight = plus_two.date_time_millis(2002, 6, 9, 0, 0, 0, 0).unwrap();
        assert_eq!(local_midnight, millis_from_ymd(2002, 6, 9).unwrap() - 2 * MILLIS_PER_HOUR);
        assert_eq!(plus_two.day_of_month().get(local_midnight), 9);
        assert_eq!(plus_two.hour_of_day().get(local_midnight), 0);
    }

    #[test]
    fn buddhist_years_are_offset() {
        let be = Chronology::buddhist();
        let t = be.date_time_millis(2545, 6, 9, 0, 0, 0, 0).unwrap();
        assert_eq!(t, millis_from_ymd(2002, 6, 9).unwrap());
        assert_eq!(be.year().get(t), 2545);
        assert_eq!(be.era().as_text(t), "BE");
        assert_eq!(Chronology::iso().year().get(t), 2002);
    }

    #[test]
    fn fields_share_leap_status() {
        let iso = Chronology::iso();
        for year in [1900, 2000, 2003, 2004] {
            let t = millis_from_ymd(year, 7, 1).unwrap();
            let leap = iso.year().is_leap(t);
            assert_eq!(iso.day_of_year().maximum_value_at(t) == 366, leap);
        }
    }

    #[test]
    fn period_values_and_add_period_agree() {
        let iso = Chronology::iso();
        let start = iso.date_time_millis(2004, 1, 31, 10, 0, 0, 0).unwrap();
        let end = iso.date_time_millis(2005, 3, 2, 12, 30, 0, 5).unwrap();
        let period = iso.period_values(PeriodType::standard(), start, end).unwrap();
        assert_eq!(period.years(), 1);
        assert_eq!(period.months(), 1);
        assert_eq!(period.weeks(), 0);
        assert_eq!(period.days(), 2);
        assert_eq!(period.hours(), 2);
        assert_eq!(period.minutes(), 30);
        assert_eq!(period.millis(), 5);
        assert_eq!(iso.add_period(&period, start, 1), Ok(end));
    }

    #[test]
    fn add_period_scales_and_checks() {
        let iso = Chronology::iso();
        let period = Period::of_days(1);
        assert_eq!(iso.add_period(&period, 0, -3), Ok(-3 * 86_400_000));
        assert_eq!(iso.add_period(&period, 17, 0), Ok(17));
        assert!(iso.add_period(&Period::of_millis(1), i64::MAX, 1).is_err());
        assert_eq!(iso.add_duration(10, 5, 2), Ok(20));
        assert!(iso.add_duration(i64::MAX, 1, 1).is_err());
    }

    #[test]
    fn empty_span_is_zero_period() {
        let iso = Chronology::iso();
        let period = iso.period_values(PeriodType::standard(), 42, 42).unwrap();
        assert!(period.is_zero());
    }
}
