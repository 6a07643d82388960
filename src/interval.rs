// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open time intervals.
//!
//! This module provides:
//! - [`ReadableInterval`]: the queries shared by every interval type
//! - [`Interval`]: an immutable `[start, end)` span with a chronology
//! - [`MutableInterval`]: the same span updated in place
//! - [`complement_within`] and [`intersect_intervals`] over sorted lists
//!
//! Every interval includes its start and excludes its end, and
//! `start <= end` always holds. A zero-length interval is valid but contains
//! nothing.

use crate::chronology::Chronology;
use crate::date_time::DateTime;
use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::instant::{Instant, TimeInstant};
use crate::period::{Period, PeriodType};
use crate::safe::{safe_add, safe_subtract};
use std::fmt;
use tracing::trace;

/// Fails unless `start <= end`.
#[inline]
fn check_interval(start: i64, end: i64) -> TimeResult<()> {
    if end < start {
        return Err(TimeError::invalid_interval(start, end));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// ReadableInterval trait
// ═══════════════════════════════════════════════════════════════════════════

/// Queries over a half-open interval `[start, end)`.
///
/// Implementors provide the endpoints and the chronology; every query is
/// derived from those three.
pub trait ReadableInterval {
    fn start_millis(&self) -> i64;

    fn end_millis(&self) -> i64;

    fn chronology(&self) -> Chronology;

    fn start(&self) -> DateTime {
        DateTime::from_millis_in(self.start_millis(), self.chronology())
    }

    fn end(&self) -> DateTime {
        DateTime::from_millis_in(self.end_millis(), self.chronology())
    }

    // ── containment ───────────────────────────────────────────────────

    /// `start <= instant < end`.
    fn contains(&self, instant: i64) -> bool {
        instant >= self.start_millis() && instant < self.end_millis()
    }

    fn contains_instant<T: TimeInstant + ?Sized>(&self, instant: &T) -> bool {
        self.contains(instant.millis())
    }

    fn contains_now(&self) -> bool {
        self.contains(Instant::now().millis())
    }

    /// Whether `other` lies entirely inside this interval.
    ///
    /// A zero-length interval contains nothing, not even itself.
    fn contains_interval<I: ReadableInterval + ?Sized>(&self, other: &I) -> bool {
        let (start, end) = (self.start_millis(), self.end_millis());
        let (other_start, other_end) = (other.start_millis(), other.end_millis());
        other_start >= start && other_start < end && other_end <= end
    }

    /// Whether the two intervals share at least one instant.
    ///
    /// Zero-length intervals hold no instant and so overlap nothing.
    fn overlaps<I: ReadableInterval + ?Sized>(&self, other: &I) -> bool {
        let (start, end) = (self.start_millis(), self.end_millis());
        let (other_start, other_end) = (other.start_millis(), other.end_millis());
        start < end && other_start < other_end && start < other_end && other_start < end
    }

    /// Whether one interval ends exactly where the other starts.
    fn abuts<I: ReadableInterval + ?Sized>(&self, other: &I) -> bool {
        other.end_millis() == self.start_millis() || self.end_millis() == other.start_millis()
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// `end <= instant`: the interval is over by `instant`.
    fn is_before(&self, instant: i64) -> bool {
        self.end_millis() <= instant
    }

    fn is_before_instant<T: TimeInstant + ?Sized>(&self, instant: &T) -> bool {
        self.is_before(instant.millis())
    }

    fn is_before_now(&self) -> bool {
        self.is_before(Instant::now().millis())
    }

    /// `end <= other.start`.
    fn is_before_interval<I: ReadableInterval + ?Sized>(&self, other: &I) -> bool {
        self.is_before(other.start_millis())
    }

    /// `start > instant`.
    fn is_after(&self, instant: i64) -> bool {
        self.start_millis() > instant
    }

    fn is_after_instant<T: TimeInstant + ?Sized>(&self, instant: &T) -> bool {
        self.is_after(instant.millis())
    }

    fn is_after_now(&self) -> bool {
        self.is_after(Instant::now().millis())
    }

    /// `start > other.end`, i.e. [`is_after`](Self::is_after) of the other
    /// interval's end. An interval starting where `other` ends is not after it.
    fn is_after_interval<I: ReadableInterval + ?Sized>(&self, other: &I) -> bool {
        self.is_after(other.end_millis())
    }

    // ── length ────────────────────────────────────────────────────────

    fn to_duration_millis(&self) -> TimeResult<i64> {
        safe_subtract(self.end_millis(), self.start_millis())
    }

    fn to_duration(&self) -> TimeResult<Duration> {
        self.to_duration_millis().map(Duration::from_millis)
    }

    /// The standard period from start to end.
    fn to_period(&self) -> TimeResult<Period> {
        self.to_period_type(PeriodType::standard())
    }

    /// The period from start to end in the units of `period_type`.
    ///
    /// Adding the result to the start gives back the end exactly.
    fn to_period_type(&self, period_type: PeriodType) -> TimeResult<Period> {
        self.chronology()
            .period_values(period_type, self.start_millis(), self.end_millis())
    }

    // ── conversion ────────────────────────────────────────────────────

    fn to_interval(&self) -> Interval {
        Interval {
            start: self.start_millis(),
            end: self.end_millis(),
            chronology: self.chronology(),
        }
    }

    fn to_mutable_interval(&self) -> MutableInterval {
        MutableInterval {
            inner: self.to_interval(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Interval
// ═══════════════════════════════════════════════════════════════════════════

/// An immutable half-open interval `[start, end)`.
///
/// Equality compares both endpoints and the chronology.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    start: i64,
    end: i64,
    chronology: Chronology,
}

impl Interval {
    // ── constructors ──────────────────────────────────────────────────

    /// The interval between two instants, in the chronology of `start`.
    pub fn new<A, B>(start: &A, end: &B) -> TimeResult<Self>
    where
        A: TimeInstant + ?Sized,
        B: TimeInstant + ?Sized,
    {
        Self::from_millis_in(start.millis(), end.millis(), start.chronology())
    }

    /// Millisecond endpoints in the default chronology.
    pub fn from_millis(start: i64, end: i64) -> TimeResult<Self> {
        Self::from_millis_in(start, end, Chronology::default_configured())
    }

    pub fn from_millis_in(start: i64, end: i64, chronology: Chronology) -> TimeResult<Self> {
        check_interval(start, end)?;
        Ok(Self {
            start,
            end,
            chronology,
        })
    }

    /// `[start, start + duration)`.
    pub fn with_start_duration<T: TimeInstant + ?Sized>(
        start: &T,
        duration: Duration,
    ) -> TimeResult<Self> {
        let from = start.millis();
        let to = safe_add(from, duration.millis())?;
        Self::from_millis_in(from, to, start.chronology())
    }

    /// `[end - duration, end)`.
    pub fn with_duration_end<T: TimeInstant + ?Sized>(
        duration: Duration,
        end: &T,
    ) -> TimeResult<Self> {
        let to = end.millis();
        let from = safe_subtract(to, duration.millis())?;
        Self::from_millis_in(from, to, end.chronology())
    }

    /// `[start, start + period)`, the period resolved from `start`.
    pub fn with_start_period<T: TimeInstant + ?Sized>(
        start: &T,
        period: &Period,
    ) -> TimeResult<Self> {
        let chronology = start.chronology();
        let from = start.millis();
        let to = chronology.add_period(period, from, 1)?;
        Self::from_millis_in(from, to, chronology)
    }

    /// `[end - period, end)`, the period resolved backwards from `end`.
    pub fn with_period_end<T: TimeInstant + ?Sized>(
        period: &Period,
        end: &T,
    ) -> TimeResult<Self> {
        let chronology = end.chronology();
        let to = end.millis();
        let from = chronology.add_period(period, to, -1)?;
        Self::from_millis_in(from, to, chronology)
    }

    // ── copies ────────────────────────────────────────────────────────

    pub fn with_start_millis(&self, start: i64) -> TimeResult<Self> {
        Self::from_millis_in(start, self.end, self.chronology)
    }

    pub fn with_end_millis(&self, end: i64) -> TimeResult<Self> {
        Self::from_millis_in(self.start, end, self.chronology)
    }

    pub fn with_start<T: TimeInstant + ?Sized>(&self, start: &T) -> TimeResult<Self> {
        self.with_start_millis(start.millis())
    }

    pub fn with_end<T: TimeInstant + ?Sized>(&self, end: &T) -> TimeResult<Self> {
        self.with_end_millis(end.millis())
    }

    pub fn with_chronology(&self, chronology: Chronology) -> Self {
        Self { chronology, ..*self }
    }

    /// Keeps the start and moves the end to `start + duration`.
    pub fn with_duration_after_start(&self, duration: Duration) -> TimeResult<Self> {
        self.with_end_millis(safe_add(self.start, duration.millis())?)
    }

    /// Keeps the end and moves the start to `end - duration`.
    pub fn with_duration_before_end(&self, duration: Duration) -> TimeResult<Self> {
        self.with_start_millis(safe_subtract(self.end, duration.millis())?)
    }

    /// Keeps the start and moves the end to `start + period`.
    pub fn with_period_after_start(&self, period: &Period) -> TimeResult<Self> {
        self.with_end_millis(self.chronology.add_period(period, self.start, 1)?)
    }

    /// Keeps the end and moves the start to `end - period`.
    pub fn with_period_before_end(&self, period: &Period) -> TimeResult<Self> {
        self.with_start_millis(self.chronology.add_period(period, self.end, -1)?)
    }

    // ── set operations ────────────────────────────────────────────────

    /// The shared part of two intervals, if they overlap.
    pub fn overlap<I: ReadableInterval + ?Sized>(&self, other: &I) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start.max(other.start_millis());
        let end = self.end.min(other.end_millis());
        Some(Self { start, end, ..*self })
    }

    /// The span between two intervals that neither overlap nor abut.
    pub fn gap<I: ReadableInterval + ?Sized>(&self, other: &I) -> Option<Self> {
        let (other_start, other_end) = (other.start_millis(), other.end_millis());
        if self.start > other_end {
            Some(Self {
                start: other_end,
                end: self.start,
                ..*self
            })
        } else if other_start > self.end {
            Some(Self {
                start: self.end,
                end: other_start,
                ..*self
            })
        } else {
            None
        }
    }
}

impl ReadableInterval for Interval {
    #[inline]
    fn start_millis(&self) -> i64 {
        self.start
    }

    #[inline]
    fn end_millis(&self) -> i64 {
        self.end
    }

    #[inline]
    fn chronology(&self) -> Chronology {
        self.chronology
    }
}

/// `start/end` in ISO-8601, e.g. `2002-06-09T00:00:00.000Z/2002-07-09T00:00:00.000Z`.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start(), self.end())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// MutableInterval
// ═══════════════════════════════════════════════════════════════════════════

/// An interval updated in place.
///
/// Every setter checks the new endpoints before storing them; a rejected
/// update leaves the interval unchanged. Not synchronised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutableInterval {
    inner: Interval,
}

impl MutableInterval {
    pub fn new<A, B>(start: &A, end: &B) -> TimeResult<Self>
    where
        A: TimeInstant + ?Sized,
        B: TimeInstant + ?Sized,
    {
        Interval::new(start, end).map(|inner| Self { inner })
    }

    pub fn from_millis(start: i64, end: i64) -> TimeResult<Self> {
        Interval::from_millis(start, end).map(|inner| Self { inner })
    }

    pub fn from_millis_in(start: i64, end: i64, chronology: Chronology) -> TimeResult<Self> {
        Interval::from_millis_in(start, end, chronology).map(|inner| Self { inner })
    }

    fn commit(&mut self, operation: &'static str, result: TimeResult<Interval>) -> TimeResult<()> {
        match result {
            Ok(inner) => {
                self.inner = inner;
                Ok(())
            }
            Err(err) => {
                trace!(operation, interval = %self.inner, %err, "mutation rejected");
                Err(err)
            }
        }
    }

    pub fn set_interval_millis(&mut self, start: i64, end: i64) -> TimeResult<()> {
        let result = Interval::from_millis_in(start, end, self.inner.chronology);
        self.commit("set_interval", result)
    }

    /// Copies endpoints and chronology from `other`.
    pub fn set_interval<I: ReadableInterval + ?Sized>(&mut self, other: &I) {
        self.inner = other.to_interval();
    }

    pub fn set_chronology(&mut self, chronology: Chronology) {
        self.inner = self.inner.with_chronology(chronology);
    }

    pub fn set_start_millis(&mut self, start: i64) -> TimeResult<()> {
        let result = self.inner.with_start_millis(start);
        self.commit("set_start", result)
    }

    pub fn set_start<T: TimeInstant + ?Sized>(&mut self, start: &T) -> TimeResult<()> {
        self.set_start_millis(start.millis())
    }

    pub fn set_end_millis(&mut self, end: i64) -> TimeResult<()> {
        let result = self.inner.with_end_millis(end);
        self.commit("set_end", result)
    }

    pub fn set_end<T: TimeInstant + ?Sized>(&mut self, end: &T) -> TimeResult<()> {
        self.set_end_millis(end.millis())
    }

    pub fn set_duration_after_start(&mut self, duration: Duration) -> TimeResult<()> {
        let result = self.inner.with_duration_after_start(duration);
        self.commit("set_duration_after_start", result)
    }

    pub fn set_duration_before_end(&mut self, duration: Duration) -> TimeResult<()> {
        let result = self.inner.with_duration_before_end(duration);
        self.commit("set_duration_before_end", result)
    }

    pub fn set_period_after_start(&mut self, period: &Period) -> TimeResult<()> {
        let result = self.inner.with_period_after_start(period);
        self.commit("set_period_after_start", result)
    }

    pub fn set_period_before_end(&mut self, period: &Period) -> TimeResult<()> {
        let result = self.inner.with_period_before_end(period);
        self.commit("set_period_before_end", result)
    }
}

impl ReadableInterval for MutableInterval {
    #[inline]
    fn start_millis(&self) -> i64 {
        self.inner.start
    }

    #[inline]
    fn end_millis(&self) -> i64 {
        self.inner.end
    }

    #[inline]
    fn chronology(&self) -> Chronology {
        self.inner.chronology
    }
}

impl From<Interval> for MutableInterval {
    fn from(inner: Interval) -> Self {
        Self { inner }
    }
}

impl fmt::Display for MutableInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Interval lists
// ═══════════════════════════════════════════════════════════════════════════

/// Returns the gaps (complement) of `intervals` within the bounding `outer`
/// interval.
///
/// Given a sorted, non-overlapping list of sub-intervals, this returns the
/// spans of `outer` NOT covered by any of them, in chronological order. The
/// gaps take the chronology of `outer`. Single pass, O(n).
pub fn complement_within(outer: &Interval, intervals: &[Interval]) -> Vec<Interval> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for interval in intervals {
        let start = interval.start.min(outer.end);
        if start > cursor {
            gaps.push(Interval {
                start: cursor,
                end: start,
                ..*outer
            });
        }
        if interval.end > cursor {
            cursor = interval.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval {
            start: cursor,
            end: outer.end,
            ..*outer
        });
    }
    gaps
}

/// Returns the intersection of two sorted, non-overlapping interval lists.
///
/// O(n+m) merge; the results take the chronology of the `a` element they
/// came from.
pub fn intersect_intervals(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(shared) = a[i].overlap(&b[j]) {
            result.push(shared);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gj::MILLIS_PER_DAY;

    fn span(start: i64, end: i64) -> Interval {
        Interval::from_millis_in(start, end, Chronology::iso()).unwrap()
    }

    #[test]
    fn construction_checks_order() {
        assert!(matches!(
            Interval::from_millis_in(10, 5, Chronology::iso()),
            Err(TimeError::InvalidInterval { start: 10, end: 5 })
        ));
        let empty = span(7, 7);
        assert_eq!(empty.to_duration(), Ok(Duration::ZERO));
        assert!(!empty.contains(7));
    }

    #[test]
    fn half_open_containment() {
        let i = span(10, 20);
        assert!(i.contains(10));
        assert!(i.contains(19));
        assert!(!i.contains(20));
        assert!(i.contains_interval(&span(10, 20)));
        assert!(i.contains_interval(&span(15, 15)));
        assert!(!i.contains_interval(&span(20, 20)));
        assert!(!i.contains_interval(&span(5, 15)));
        assert!(!span(10, 10).contains_interval(&span(10, 10)));
    }

    #[test]
    fn overlap_and_abut() {
        let i = span(10, 20);
        assert!(i.overlaps(&i));
        assert!(i.overlaps(&span(19, 30)));
        assert!(!i.overlaps(&span(20, 30)));
        assert!(!span(15, 15).overlaps(&i));
        assert!(!span(15, 15).overlaps(&span(15, 15)));
        assert!(i.abuts(&span(20, 30)));
        assert!(i.abuts(&span(0, 10)));
        assert!(!i.abuts(&span(21, 30)));

        assert_eq!(i.overlap(&span(15, 30)), Some(span(15, 20)));
        assert_eq!(i.overlap(&span(20, 30)), None);
        assert_eq!(i.gap(&span(25, 30)), Some(span(20, 25)));
        assert_eq!(i.gap(&span(0, 5)), Some(span(5, 10)));
        assert_eq!(i.gap(&span(20, 30)), None);
    }

    #[test]
    fn before_and_after_use_exclusive_end() {
        let i = span(10, 20);
        assert!(i.is_before(20));
        assert!(!i.is_before(19));
        assert!(i.is_after(9));
        assert!(!i.is_after(10));
        assert!(i.is_before_interval(&span(20, 30)));
        assert!(!i.is_after_interval(&span(0, 10)));
        assert!(i.is_after_interval(&span(0, 9)));
        assert!(!i.is_after_interval(&span(0, 11)));
        assert!(span(i64::MIN, i64::MIN + 1).is_before_now());
        assert!(span(i64::MAX - 1, i64::MAX).is_after_now());
    }

    #[test]
    fn empty_interval_on_a_boundary() {
        let empty = span(10, 10);
        let earlier = span(0, 10);
        assert!(!empty.contains(10));
        assert!(empty.is_after(9));
        assert!(!empty.is_after(10));
        assert!(empty.is_before(10));
        assert!(!empty.is_after_interval(&earlier));
        assert!(earlier.is_before_interval(&empty));
        assert!(empty.is_before_interval(&span(10, 20)));
        assert!(!earlier.overlaps(&empty));
        assert!(earlier.abuts(&empty));
    }

    #[test]
    fn duration_is_checked() {
        assert!(span(i64::MIN, i64::MAX).to_duration().is_err());
        assert_eq!(span(-5, 5).to_duration_millis(), Ok(10));
    }

    #[test]
    fn period_constructors_round_trip() {
        let iso = Chronology::iso();
        let start = DateTime::new_in(2004, 1, 31, 0, 0, 0, 0, iso).unwrap();
        let month = Period::of_months(1);
        let i = Interval::with_start_period(&start, &month).unwrap();
        assert_eq!(i.end(), DateTime::new_in(2004, 2, 29, 0, 0, 0, 0, iso).unwrap());
        assert_eq!(i.to_period(), Ok(month));

        let back = Interval::with_period_end(&month, &i.end()).unwrap();
        assert_eq!(back.start(), DateTime::new_in(2004, 1, 29, 0, 0, 0, 0, iso).unwrap());
        assert!(Interval::with_start_period(&start, &Period::of_days(-1)).is_err());
    }

    #[test]
    fn display_uses_iso_endpoints() {
        let i = span(0, MILLIS_PER_DAY);
        assert_eq!(
            i.to_string(),
            "1970-01-01T00:00:00.000Z/1970-01-02T00:00:00.000Z"
        );
    }

    #[test]
    fn mutable_setters_validate_first() {
        let mut m = span(10, 20).to_mutable_interval();
        assert!(m.set_end_millis(5).is_err());
        assert!(m.set_start_millis(25).is_err());
        assert!(m.set_interval_millis(30, 0).is_err());
        assert!(m
            .set_duration_after_start(Duration::from_millis(-1))
            .is_err());
        assert_eq!(m.to_interval(), span(10, 20));

        m.set_start_millis(0).unwrap();
        m.set_duration_before_end(Duration::from_millis(5)).unwrap();
        assert_eq!((m.start_millis(), m.end_millis()), (15, 20));
        m.set_period_after_start(&Period::of_millis(100)).unwrap();
        assert_eq!(m.end_millis(), 115);
        m.set_interval(&span(1, 2));
        assert_eq!(m.to_interval(), span(1, 2));
    }

    #[test]
    fn complement_within_fills_the_gaps() {
        let outer = span(0, 10);
        let gaps = complement_within(&outer, &[span(1, 3), span(5, 9)]);
        assert_eq!(gaps, vec![span(0, 1), span(3, 5), span(9, 10)]);
        assert_eq!(complement_within(&outer, &[]), vec![outer]);
        assert!(complement_within(&outer, &[span(0, 10)]).is_empty());
    }

    #[test]
    fn intersect_merges_two_lists() {
        let a = [span(0, 5), span(8, 12)];
        let b = [span(3, 9), span(11, 20)];
        assert_eq!(
            intersect_intervals(&a, &b),
            vec![span(3, 5), span(8, 9), span(11, 12)]
        );
        assert!(intersect_intervals(&a, &[]).is_empty());
    }
}
