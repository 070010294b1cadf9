//! Date arithmetic shared by the calculators.
//!
//! All functions work on date-only values; there is no time-of-day or
//! timezone involved anywhere in the engine.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::DateInterval;

/// Counts calendar days from `start` to `end`, including both endpoints.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::inclusive_days;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(inclusive_days(start, end), 31);
/// ```
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(start, end) + 1
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Number of whole months completed between `start` and `end`.
///
/// A month is completed when its anniversary (`start` plus N calendar months,
/// clamped to the end of a shorter month) falls on or before `end`. Partial
/// months never count, and an `end` before `start` yields zero.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::completed_months;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
/// assert_eq!(completed_months(start, end), 1);
/// ```
pub fn completed_months(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }

    // Calendar month distance is an upper bound; step back until the
    // anniversary fits inside the range.
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let mut months = span.max(0) as u32;
    while months > 0 && add_months(start, months).is_none_or(|anniversary| anniversary > end) {
        months -= 1;
    }
    months
}

/// Months between two dates including the fraction of the running month.
///
/// The fraction is the number of days past the last completed anniversary
/// divided by the length of the month that follows it.
pub fn fractional_months(start: NaiveDate, end: NaiveDate) -> Decimal {
    if end < start {
        return Decimal::ZERO;
    }

    let months = completed_months(start, end);
    let whole = Decimal::from(months);
    let (Some(anchor), Some(next)) = (add_months(start, months), add_months(start, months + 1))
    else {
        return whole;
    };

    let elapsed = days_between(anchor, end);
    let month_length = days_between(anchor, next);
    if month_length <= 0 {
        return whole;
    }
    whole + Decimal::from(elapsed) / Decimal::from(month_length)
}

/// Returns the later of two dates.
pub fn later(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    a.max(b)
}

/// Returns the earlier of two dates.
pub fn earlier(a: NaiveDate, b: NaiveDate) -> NaiveDate {
    a.min(b)
}

/// Number of days in the given calendar month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    add_months(first, 1)
        .map(|next| days_between(first, next) as u32)
        .unwrap_or(31)
}

/// Splits `[start, end]` into one window per calendar month.
///
/// The first and last windows are clipped to the range, so their lengths may
/// be shorter than the calendar month. Returns an empty list when
/// `end < start`.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::month_windows;
/// use chrono::NaiveDate;
///
/// let windows = month_windows(
///     NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
/// );
/// let lengths: Vec<i64> = windows.iter().map(|w| w.inclusive_days()).collect();
/// assert_eq!(lengths, vec![12, 29, 5]);
/// ```
pub fn month_windows(start: NaiveDate, end: NaiveDate) -> Vec<DateInterval> {
    let mut windows = Vec::new();
    if end < start {
        return windows;
    }
    let Some(mut month_start) = NaiveDate::from_ymd_opt(start.year(), start.month(), 1) else {
        return windows;
    };

    while month_start <= end {
        let last_day = days_in_month(month_start.year(), month_start.month());
        let Some(month_end) = month_start.with_day(last_day) else {
            break;
        };

        windows.push(DateInterval::new(
            later(month_start, start),
            earlier(month_end, end),
        ));
        let Some(next_month) = month_end.succ_opt() else {
            break;
        };
        month_start = next_month;
    }

    windows
}

/// Merges overlapping or adjacent intervals into a sorted, disjoint list.
///
/// Unordered intervals are dropped.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::merge_intervals;
/// use settlement_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
/// let merged = merge_intervals(vec![
///     DateInterval::new(day(10), day(20)),
///     DateInterval::new(day(1), day(9)),
///     DateInterval::new(day(25), day(28)),
/// ]);
/// assert_eq!(merged, vec![DateInterval::new(day(1), day(20)), DateInterval::new(day(25), day(28))]);
/// ```
pub fn merge_intervals<I>(intervals: I) -> Vec<DateInterval>
where
    I: IntoIterator<Item = DateInterval>,
{
    let mut sorted: Vec<DateInterval> = intervals
        .into_iter()
        .filter(DateInterval::is_ordered)
        .collect();
    sorted.sort_by_key(|interval| interval.start);

    let mut merged: Vec<DateInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        match merged.last_mut() {
            Some(last) if last.end.succ_opt().is_none_or(|next| interval.start <= next) => {
                last.end = later(last.end, interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
