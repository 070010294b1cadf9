//! Inclusive calendar date intervals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pair of calendar dates, both inclusive.
///
/// `end >= start` is not enforced here; calculators that need ordered
/// intervals check it themselves.
///
/// # Example
///
/// ```
/// use settlement_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let march = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
/// );
/// assert_eq!(march.inclusive_days(), 31);
/// assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    /// First day of the interval.
    pub start: NaiveDate,
    /// Last day of the interval.
    pub end: NaiveDate,
}

impl DateInterval {
    /// Creates an interval from its two endpoints.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true when `end` is not before `start`.
    pub fn is_ordered(&self) -> bool {
        self.end >= self.start
    }

    /// Number of calendar days covered, counting both endpoints.
    ///
    /// Negative or zero for an unordered interval.
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Checks if a date falls inside the interval (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the overlap of two intervals, if any.
    pub fn intersect(&self, other: &DateInterval) -> Option<DateInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (end >= start).then_some(DateInterval { start, end })
    }

    /// Cuts the interval off at `limit`, returning `None` if nothing remains.
    pub fn clip_end(&self, limit: NaiveDate) -> Option<DateInterval> {
        let end = self.end.min(limit);
        (end >= self.start).then_some(DateInterval {
            start: self.start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_day_interval_counts_one_day() {
        let interval = DateInterval::new(date(2024, 1, 1), date(2024, 1, 1));
        assert_eq!(interval.inclusive_days(), 1);
    }

    #[test]
    fn test_unordered_interval_is_reported() {
        let interval = DateInterval::new(date(2024, 1, 10), date(2024, 1, 1));
        assert!(!interval.is_ordered());
        assert!(interval.inclusive_days() <= 0);
    }

    #[test]
    fn test_intersect_overlapping() {
        let leave = DateInterval::new(date(2024, 2, 20), date(2024, 3, 10));
        let march = DateInterval::new(date(2024, 3, 1), date(2024, 3, 31));

        let overlap = leave.intersect(&march).unwrap();
        assert_eq!(overlap, DateInterval::new(date(2024, 3, 1), date(2024, 3, 10)));
        assert_eq!(overlap.inclusive_days(), 10);
    }

    #[test]
    fn test_intersect_disjoint_is_none() {
        let a = DateInterval::new(date(2024, 1, 1), date(2024, 1, 31));
        let b = DateInterval::new(date(2024, 2, 1), date(2024, 2, 29));
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn test_clip_end() {
        let leave = DateInterval::new(date(2024, 5, 1), date(2024, 8, 31));
        let clipped = leave.clip_end(date(2024, 6, 15)).unwrap();
        assert_eq!(clipped.end, date(2024, 6, 15));
        assert!(leave.clip_end(date(2024, 4, 30)).is_none());
    }

    #[test]
    fn test_interval_serialization() {
        let interval = DateInterval::new(date(2024, 3, 5), date(2024, 3, 25));
        let json = serde_json::to_string(&interval).unwrap();
        assert_eq!(json, r#"{"start":"2024-03-05","end":"2024-03-25"}"#);
    }
}
