// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::FixedOffset;
use qtty::{Day, Days};
use tempocal::buddhist::BE;
use tempocal::gj::MILLIS_PER_DAY;
use tempocal::safe::safe_add;
use tempocal::{
    complement_within, intersect_intervals, CalendarKind, Chronology, DateTime, DateTimeField,
    DateTimeFieldType, Duration, Instant, Interval, MutableDateTime, MutableInterval, Period,
    PeriodType, ReadableInterval, TimeConfig, TimeError, TimeInstant,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn iso(y: i32, mo: i32, d: i32) -> DateTime {
    DateTime::new_in(y, mo, d, 0, 0, 0, 0, Chronology::iso()).unwrap()
}

fn day(n: i64) -> i64 {
    n * MILLIS_PER_DAY
}

#[test]
fn utc_roundtrip_is_stable() {
    let datetime = chrono::DateTime::from_timestamp(946_728_000, 0).unwrap();
    let instant = Instant::from_utc(datetime);
    assert_eq!(instant.to_utc(), Ok(datetime));
    assert_eq!(instant.to_string(), "2000-01-01T12:00:00.000Z");
    assert_eq!(DateTime::from_utc(datetime).hour_of_day(), 12);
}

#[test]
fn weekyear_backs_off_a_week_when_week_53_is_missing() {
    let chronology = Chronology::iso();
    let t = iso(2004, 12, 28).millis();
    assert_eq!(chronology.weekyear().get(t), 2004);
    assert_eq!(chronology.week_of_weekyear().get(t), 53);
    assert_eq!(chronology.day_of_week().get(t), 2);

    let moved = chronology.weekyear().set(t, 2005).unwrap();
    assert_eq!(chronology.weekyear().get(moved), 2005);
    assert_eq!(chronology.week_of_weekyear().get(moved), 52);
    assert_eq!(chronology.day_of_week().get(moved), 2);
    assert_eq!(DateTime::from_millis_in(moved, chronology).to_string(), "2005-12-27T00:00:00.000Z");
}

#[test]
fn buddhist_era_is_fixed() {
    let chronology = Chronology::buddhist();
    let t = iso(2004, 6, 9).with_chronology(chronology);
    assert_eq!(t.year(), 2547);
    assert_eq!(t.era(), BE);
    assert_eq!(chronology.era().set(t.millis(), BE), Ok(t.millis()));
    assert!(matches!(
        chronology.era().set(t.millis(), 0),
        Err(TimeError::FieldOutOfRange { value: 0, .. })
    ));
    assert_eq!(chronology.kind(), CalendarKind::Buddhist);
}

#[test]
fn safe_arithmetic_detects_overflow() {
    assert_eq!(safe_add(5, 3), Ok(8));
    assert!(matches!(safe_add(i64::MAX, 1), Err(TimeError::Overflow { .. })));
    assert!(Duration::from_millis(i64::MAX).plus(Duration::from_millis(1)).is_err());
}

#[test]
fn reversed_interval_is_rejected() {
    assert_eq!(
        Interval::from_millis_in(10, 5, Chronology::iso()),
        Err(TimeError::InvalidInterval { start: 10, end: 5 })
    );
    let empty = Interval::from_millis(7, 7).unwrap();
    assert_eq!(empty.to_duration_millis(), Ok(0));
    assert!(!empty.contains(7));
    assert!(!empty.overlaps(&empty));
}

#[test]
fn interval_built_from_a_period_reports_it_back() {
    let start = iso(2004, 1, 31);
    let period = Period::new(1, 1, 0, 2, 3, 0, 0, 0);
    let interval = Interval::with_start_period(&start, &period).unwrap();
    assert_eq!(interval.end().to_string(), "2005-03-02T03:00:00.000Z");
    assert_eq!(interval.to_period().unwrap(), period);

    let days = interval.to_period_type(PeriodType::days()).unwrap();
    assert_eq!(days.days(), 396);
    assert_eq!(days.hours(), 0);
}

#[test]
fn interval_reads_durations_in_physical_units() {
    let interval = Interval::from_millis(0, day(3) / 2).unwrap();
    let duration = interval.to_duration().unwrap();
    assert_eq!(duration.standard_hours(), 36);
    assert!((duration.to_days() - Days::new(1.5)).abs() < Days::new(1e-12));
    assert!((duration.to_seconds().to::<Day>() - Days::new(1.5)).abs() < Days::new(1e-12));
}

#[test]
fn mutable_date_time_failures_leave_state_intact() {
    init_tracing();
    let mut t = MutableDateTime::from(iso(2004, 2, 29));
    let before = t.millis();

    assert!(t.set_month_of_year(13).is_err());
    assert!(t.set_day_of_month(30).is_err());
    assert!(t.add_years(i64::from(i32::MAX)).is_err());
    assert_eq!(t.millis(), before);

    t.add_years(1).unwrap();
    assert_eq!(t.to_string(), "2005-02-28T00:00:00.000Z");
    t.set(DateTimeFieldType::HourOfDay, 6).unwrap();
    assert_eq!(t.to_date_time().hour_of_day(), 6);
}

#[test]
fn mutable_interval_setters_validate_first() {
    init_tracing();
    let mut interval = MutableInterval::from_millis(day(1), day(2)).unwrap();
    assert!(interval.set_end_millis(0).is_err());
    assert_eq!((interval.start_millis(), interval.end_millis()), (day(1), day(2)));

    interval.set_period_after_start(&Period::of_weeks(1)).unwrap();
    assert_eq!(interval.to_duration().unwrap().standard_days(), 7);
    assert!(interval.set_duration_before_end(Duration::from_millis(-1)).is_err());
    assert_eq!(interval.end_millis(), day(8));
}

#[test]
fn interval_set_ops_match_expected_spans() {
    let span = |a: i64, b: i64| Interval::from_millis(day(a), day(b)).unwrap();
    let outer = span(0, 10);
    let a = vec![span(1, 3), span(5, 9)];
    let b = vec![span(2, 6), span(8, 10)];

    let gaps = complement_within(&outer, &a);
    assert_eq!(gaps, vec![span(0, 1), span(3, 5), span(9, 10)]);

    let shared = intersect_intervals(&a, &b);
    assert_eq!(shared, vec![span(2, 3), span(5, 6), span(8, 9)]);

    assert_eq!(span(1, 3).gap(&span(5, 9)), Some(span(3, 5)));
    assert_eq!(span(1, 3).overlap(&span(5, 9)), None);
    assert!(span(1, 3).abuts(&span(3, 5)));
}

#[test]
fn zone_changes_keep_the_instant() {
    let utc = iso(2002, 6, 9).with_time(23, 30, 0, 0).unwrap();
    let tokyo = utc.with_zone(FixedOffset::east_opt(9 * 3_600).unwrap());
    assert!(tokyo.is_equal(&utc));
    assert_eq!(tokyo.day_of_month(), 10);
    assert_eq!(tokyo.hour_of_day(), 8);
    assert_eq!(tokyo.to_string(), "2002-06-10T08:30:00.000+09:00");

    let kept = utc
        .with_zone_retain_fields(FixedOffset::east_opt(9 * 3_600).unwrap())
        .unwrap();
    assert_eq!(kept.hour_of_day(), 23);
    assert_eq!(utc.millis() - kept.millis(), 9 * 3_600_000);
}

#[test]
fn chronologies_are_shared_across_threads() {
    let zone = FixedOffset::east_opt(-5 * 3_600).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || Chronology::iso_in(zone)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Chronology::iso_in(zone));
    }
}

#[test]
fn config_lookup_selects_a_chronology() {
    let config = TimeConfig::from_lookup(|key| match key {
        "TEMPOCAL_CALENDAR" => Some("buddhist".to_owned()),
        "TEMPOCAL_OFFSET_SECONDS" => Some("3600".to_owned()),
        _ => None,
    });
    let chronology = config.chronology();
    assert_eq!(chronology.kind(), CalendarKind::Buddhist);
    assert_eq!(chronology.offset_millis(), 3_600_000);
    assert_eq!(DateTime::from_millis_in(0, chronology).year(), 2513);
}
