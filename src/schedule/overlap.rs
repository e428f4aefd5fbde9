//! Interval arithmetic for schedule slots.
//!
//! All program times are half-open `[start, end)` ranges: a section ending at
//! 10:00 and one starting at 10:00 do not collide.

use chrono::{DateTime, NaiveDate, Utc};

/// Half-open `[start, end)` time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeWindow { start, end }
    }

    /// Whether this window intersects `other`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Whether any part of this window falls on the given UTC calendar date.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        date >= self.start.date_naive() && date <= self.end.date_naive()
    }
}

/// Half-open interval intersection test.
///
/// Two ranges overlap iff each starts before the other ends; a shared
/// endpoint is not an overlap.
pub fn overlaps(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && end_a > start_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, hour, min, 0).unwrap()
    }

    fn window(h1: u32, m1: u32, h2: u32, m2: u32) -> TimeWindow {
        TimeWindow::new(at(h1, m1), at(h2, m2))
    }

    #[test]
    fn identical_intervals_overlap() {
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn nested_interval_overlaps() {
        assert!(overlaps(at(9, 0), at(12, 0), at(10, 0), at(11, 0)));
        assert!(overlaps(at(10, 0), at(11, 0), at(9, 0), at(12, 0)));
    }

    #[test]
    fn partial_overlap() {
        assert!(overlaps(at(9, 0), at(10, 0), at(9, 30), at(10, 30)));
        assert!(overlaps(at(9, 30), at(10, 30), at(9, 0), at(10, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(at(9, 0), at(10, 0), at(11, 0), at(12, 0)));
        assert!(!overlaps(at(11, 0), at(12, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn shared_endpoint_is_not_an_overlap() {
        // back-to-back slots
        assert!(!overlaps(at(9, 0), at(9, 30), at(9, 30), at(10, 0)));
        assert!(!overlaps(at(9, 30), at(10, 0), at(9, 0), at(9, 30)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (window(9, 0, 10, 0), window(9, 30, 10, 30)),
            (window(9, 0, 10, 0), window(10, 0, 11, 0)),
            (window(9, 0, 12, 0), window(10, 0, 11, 0)),
            (window(9, 0, 9, 30), window(14, 0, 15, 0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn covers_date_within_window() {
        let w = window(9, 0, 17, 0);
        assert!(w.covers_date(at(0, 0).date_naive()));
        assert!(!w.covers_date(at(0, 0).date_naive().succ_opt().unwrap()));
        assert!(!w.covers_date(at(0, 0).date_naive().pred_opt().unwrap()));
    }

    #[test]
    fn covers_date_spanning_midnight() {
        let w = TimeWindow::new(
            Utc.with_ymd_and_hms(2026, 6, 15, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 6, 16, 2, 0, 0).unwrap(),
        );
        assert!(w.covers_date(NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()));
        assert!(w.covers_date(NaiveDate::from_ymd_opt(2026, 6, 16).unwrap()));
        assert!(!w.covers_date(NaiveDate::from_ymd_opt(2026, 6, 17).unwrap()));
    }
}
