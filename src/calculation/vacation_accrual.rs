//! Proportional vacation accrual.
//!
//! Counts the twelfths (avos) of vacation an employee has earned between
//! admission and a reference date, one per calendar month in which at least
//! 15 days were actually worked. INSS leave days do not count as worked.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, CalculatorKind, DateInterval, Ledger, LegalBasis};

use super::date_interval::{merge_intervals, month_windows};

/// Minimum days worked in a month for it to earn a twelfth.
pub const MIN_DAYS_FOR_TWELFTH: i64 = 15;

/// Maximum twelfths in one acquisition period.
pub const MAX_TWELFTHS: u32 = 12;

/// Vacation days for a full period given the number of unjustified absences.
///
/// Follows the CLT art. 130 table: up to 5 absences keep the full 30 days,
/// more than 32 forfeit the period.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::entitled_days_for_absences;
///
/// assert_eq!(entitled_days_for_absences(0), 30);
/// assert_eq!(entitled_days_for_absences(10), 24);
/// assert_eq!(entitled_days_for_absences(40), 0);
/// ```
pub fn entitled_days_for_absences(absences: u32) -> u32 {
    match absences {
        0..=5 => 30,
        6..=14 => 24,
        15..=23 => 18,
        24..=32 => 12,
        _ => 0,
    }
}

/// Inputs for [`compute_vacation_accrual`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationAccrualInput {
    /// The employee's admission date.
    pub admission_date: NaiveDate,
    /// Cutoff date for the accrual.
    pub reference_date: NaiveDate,
    /// Periods of INSS leave, inclusive.
    #[serde(default)]
    pub leave_intervals: Vec<DateInterval>,
    /// Unjustified absences in the period.
    #[serde(default)]
    pub absences: u32,
    /// Vacation days already enjoyed.
    #[serde(default)]
    pub days_already_taken: u32,
}

impl VacationAccrualInput {
    /// Creates an input with no leave, absences or vacation taken.
    pub fn new(admission_date: NaiveDate, reference_date: NaiveDate) -> Self {
        Self {
            admission_date,
            reference_date,
            leave_intervals: Vec::new(),
            absences: 0,
            days_already_taken: 0,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if self.reference_date < self.admission_date {
            return Err(EngineError::invalid_input(
                "reference_date",
                "must not be before admission_date",
            ));
        }
        if let Some(leave) = self.leave_intervals.iter().find(|l| !l.is_ordered()) {
            return Err(EngineError::invalid_input(
                "leave_intervals",
                format!("leave ending {} starts later, on {}", leave.end, leave.start),
            ));
        }
        Ok(())
    }
}

/// The accrual evaluation for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAccrual {
    /// Month label, `YYYY-MM`.
    pub label: String,
    /// The part of the month inside [admission, reference].
    pub window: DateInterval,
    /// Calendar days in the window.
    pub days_in_scope: i64,
    /// Days of INSS leave overlapping the window.
    pub leave_days: i64,
    /// Days actually worked (never negative).
    pub days_worked: i64,
    /// Twelfths earned: 1 or 0.
    pub unit: u32,
    /// Short explanation of the unit awarded.
    pub rationale: String,
}

/// The result of a vacation accrual evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationAccrualOutcome {
    /// The employee's admission date.
    pub admission_date: NaiveDate,
    /// Cutoff date for the accrual.
    pub reference_date: NaiveDate,
    /// Every month evaluated, in order.
    pub months: Vec<MonthAccrual>,
    /// Total INSS leave days between admission and reference.
    pub leave_days: i64,
    /// Twelfths earned, capped at 12.
    pub accrued_twelfths: u32,
    /// Twelfths already used by vacation taken.
    pub consumed_twelfths: u32,
    /// Twelfths still available.
    pub available_twelfths: u32,
    /// Unjustified absences considered.
    pub absences: u32,
    /// Vacation days for a full period after the absence reduction.
    pub entitled_days: u32,
    /// Vacation days proportional to the available twelfths.
    pub proportional_days: u32,
}

/// Evaluates proportional vacation accrual month by month.
///
/// # Arguments
///
/// * `input` - Admission and reference dates, INSS leave, absences and days taken
///
/// # Returns
///
/// A [`CalculationResult`] listing every month evaluated, or `InvalidInput`
/// when the reference date precedes admission or a leave interval ends
/// before it starts.
///
/// # Legal Reference
///
/// CLT arts. 130, 133 and 146, sole paragraph.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::{compute_vacation_accrual, VacationAccrualInput};
/// use chrono::NaiveDate;
///
/// let input = VacationAccrualInput::new(
///     NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 20).unwrap(),
/// );
/// let result = compute_vacation_accrual(&input).unwrap();
/// assert_eq!(result.outcome.accrued_twelfths, 6);
/// ```
pub fn compute_vacation_accrual(
    input: &VacationAccrualInput,
) -> EngineResult<CalculationResult<VacationAccrualOutcome>> {
    input.validate()?;

    let mut ledger = Ledger::new();
    let admission = input.admission_date;
    let reference = input.reference_date;
    let period = DateInterval::new(admission, reference);

    ledger.append("Admission date", None::<String>, admission.to_string());
    ledger.append("Reference date", None::<String>, reference.to_string());

    // Overlapping leaves count each day once.
    let leaves = merge_intervals(
        input
            .leave_intervals
            .iter()
            .filter_map(|leave| leave.clip_end(reference))
            .filter_map(|leave| leave.intersect(&period)),
    );
    let leave_days: i64 = leaves.iter().map(DateInterval::inclusive_days).sum();
    let leave_formula = if input.leave_intervals.is_empty() {
        "No INSS leave".to_string()
    } else {
        input
            .leave_intervals
            .iter()
            .map(|l| format!("{} to {}", l.start, l.end))
            .collect::<Vec<_>>()
            .join("; ")
    };
    ledger.append("INSS leave days in period", Some(leave_formula), leave_days);

    let mut months = Vec::new();
    for window in month_windows(admission, reference) {
        let month = evaluate_month(window, &leaves);
        ledger.append(
            format!("Month {}", month.label),
            Some(format!(
                "{} days - {} leave days = {} worked; {}",
                month.days_in_scope, month.leave_days, month.days_worked, month.rationale
            )),
            month.unit,
        );
        months.push(month);
    }

    let earned: u32 = months.iter().map(|m| m.unit).sum();
    let accrued_twelfths = earned.min(MAX_TWELFTHS);
    ledger.append(
        "Twelfths accrued",
        Some(format!(
            "sum of {} monthly units, at most {}",
            months.len(),
            MAX_TWELFTHS
        )),
        accrued_twelfths,
    );

    // floor(days / 30 x 12), in integers so the floor is exact
    let consumed_twelfths =
        u32::try_from(u64::from(input.days_already_taken) * 12 / 30).unwrap_or(u32::MAX);
    ledger.append(
        "Twelfths used by vacation already taken",
        Some(format!("floor({} / 30 x 12)", input.days_already_taken)),
        consumed_twelfths,
    );

    let available_twelfths = accrued_twelfths.saturating_sub(consumed_twelfths);
    ledger.append_highlighted(
        "Twelfths available",
        Some(format!(
            "max(0, {} - {})",
            accrued_twelfths, consumed_twelfths
        )),
        available_twelfths,
    );

    let entitled_days = entitled_days_for_absences(input.absences);
    ledger.append(
        "Vacation days for a full period",
        Some(format!("{} unjustified absences (CLT art. 130)", input.absences)),
        entitled_days,
    );

    let proportional_days = entitled_days * available_twelfths / MAX_TWELFTHS;
    ledger.append(
        "Proportional vacation days",
        Some(format!(
            "floor({} x {} / 12)",
            entitled_days, available_twelfths
        )),
        proportional_days,
    );

    let outcome = VacationAccrualOutcome {
        admission_date: admission,
        reference_date: reference,
        months,
        leave_days,
        accrued_twelfths,
        consumed_twelfths,
        available_twelfths,
        absences: input.absences,
        entitled_days,
        proportional_days,
    };

    Ok(CalculationResult {
        calculator: CalculatorKind::VacationAccrual,
        outcome,
        ledger,
        legal_basis: LegalBasis::new(
            "Proportional vacation",
            "CLT, arts. 130, 133 and 146, sole paragraph",
            "Each month with 15 or more days worked earns one twelfth of the annual \
             vacation. INSS leave days are not counted as worked, and unjustified \
             absences reduce the vacation days of the period.",
        ),
        notes: Vec::new(),
    })
}

fn evaluate_month(window: DateInterval, leaves: &[DateInterval]) -> MonthAccrual {
    let days_in_scope = window.inclusive_days();
    let leave_days: i64 = leaves
        .iter()
        .filter_map(|leave| leave.intersect(&window))
        .map(|overlap| overlap.inclusive_days())
        .sum();
    let days_worked = (days_in_scope - leave_days).max(0);

    let (unit, rationale) = if days_worked >= MIN_DAYS_FOR_TWELFTH {
        (1, format!("{} days worked (at least 15): one twelfth", days_worked))
    } else {
        (0, format!("{} days worked (fewer than 15): no twelfth", days_worked))
    };

    MonthAccrual {
        label: format!("{:04}-{:02}", window.start.year(), window.start.month()),
        window,
        days_in_scope,
        leave_days,
        days_worked,
        unit,
        rationale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LedgerValue;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_every_month_with_15_days_earns_a_twelfth() {
        let input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 6, 20));
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        let labels: Vec<&str> = outcome.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06"]
        );
        assert_eq!(outcome.months[0].days_worked, 22);
        assert_eq!(outcome.months[5].days_worked, 20);
        assert_eq!(outcome.accrued_twelfths, 6);
        assert_eq!(outcome.available_twelfths, 6);
        assert_eq!(outcome.entitled_days, 30);
        assert_eq!(outcome.proportional_days, 15);
    }

    #[test]
    fn test_short_first_and_last_months_earn_nothing() {
        let input = VacationAccrualInput::new(date(2024, 1, 20), date(2024, 2, 10));
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months.len(), 2);
        assert_eq!(outcome.months[0].days_worked, 12);
        assert_eq!(outcome.months[0].unit, 0);
        assert_eq!(outcome.months[1].days_worked, 10);
        assert_eq!(outcome.months[1].unit, 0);
        assert_eq!(outcome.accrued_twelfths, 0);
        assert!(outcome.months[0].rationale.contains("fewer than 15"));
    }

    #[test]
    fn test_exactly_15_days_earns_a_twelfth() {
        let input = VacationAccrualInput::new(date(2024, 4, 1), date(2024, 4, 15));
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months[0].days_worked, 15);
        assert_eq!(outcome.months[0].unit, 1);
    }

    #[test]
    fn test_inss_leave_removes_worked_days() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 6, 20));
        input.leave_intervals = vec![DateInterval::new(date(2024, 3, 5), date(2024, 3, 25))];
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        let march = &outcome.months[2];
        assert_eq!(march.label, "2024-03");
        assert_eq!(march.leave_days, 21);
        assert_eq!(march.days_worked, 10);
        assert_eq!(march.unit, 0);
        assert_eq!(outcome.leave_days, 21);
        assert_eq!(outcome.accrued_twelfths, 5);
    }

    #[test]
    fn test_leave_spanning_months_is_split() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 1), date(2024, 3, 31));
        input.leave_intervals = vec![DateInterval::new(date(2024, 1, 20), date(2024, 2, 20))];
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months[0].leave_days, 12);
        assert_eq!(outcome.months[0].days_worked, 19);
        assert_eq!(outcome.months[1].leave_days, 20);
        assert_eq!(outcome.months[1].days_worked, 9);
        assert_eq!(outcome.accrued_twelfths, 2);
    }

    #[test]
    fn test_leave_beyond_reference_date_is_clipped() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 1), date(2024, 2, 10));
        input.leave_intervals = vec![DateInterval::new(date(2024, 2, 5), date(2024, 8, 31))];
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months[1].leave_days, 6);
        assert_eq!(outcome.leave_days, 6);
    }

    #[test]
    fn test_overlapping_leaves_never_make_worked_days_negative() {
        let mut input = VacationAccrualInput::new(date(2024, 5, 1), date(2024, 5, 31));
        input.leave_intervals = vec![
            DateInterval::new(date(2024, 5, 1), date(2024, 5, 31)),
            DateInterval::new(date(2024, 5, 10), date(2024, 5, 20)),
        ];
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months[0].days_worked, 0);
        assert_eq!(outcome.months[0].leave_days, 31);
        assert_eq!(outcome.leave_days, 31);
    }

    #[test]
    fn test_adjacent_leaves_are_counted_once_per_day() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 1), date(2024, 6, 30));
        input.leave_intervals = vec![
            DateInterval::new(date(2024, 3, 20), date(2024, 4, 10)),
            DateInterval::new(date(2024, 3, 1), date(2024, 3, 19)),
            DateInterval::new(date(2024, 3, 15), date(2024, 3, 25)),
        ];
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.leave_days, 41);
        assert_eq!(outcome.months[2].leave_days, 31);
        assert_eq!(outcome.months[3].leave_days, 10);
        assert_eq!(outcome.months[3].unit, 1);
    }

    #[test]
    fn test_huge_days_taken_consume_everything() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 6, 20));
        input.days_already_taken = 400_000_000;
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.consumed_twelfths, 160_000_000);
        assert_eq!(outcome.available_twelfths, 0);
        assert_eq!(outcome.proportional_days, 0);

        input.days_already_taken = u32::MAX;
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;
        assert_eq!(outcome.available_twelfths, 0);
    }

    #[test]
    fn test_accrual_is_capped_at_twelve() {
        let input = VacationAccrualInput::new(date(2022, 1, 1), date(2024, 6, 30));
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.months.len(), 30);
        assert_eq!(outcome.accrued_twelfths, 12);
    }

    #[test]
    fn test_days_taken_consume_twelfths() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 6, 20));
        input.days_already_taken = 10;
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.consumed_twelfths, 4);
        assert_eq!(outcome.available_twelfths, 2);
    }

    #[test]
    fn test_available_twelfths_never_negative() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 6, 20));
        input.days_already_taken = 30;
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.consumed_twelfths, 12);
        assert_eq!(outcome.available_twelfths, 0);
        assert_eq!(outcome.proportional_days, 0);
    }

    #[test]
    fn test_absences_reduce_entitled_days() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 1), date(2024, 12, 31));
        input.absences = 16;
        let outcome = compute_vacation_accrual(&input).unwrap().outcome;

        assert_eq!(outcome.entitled_days, 18);
        assert_eq!(outcome.proportional_days, 18);
    }

    #[test]
    fn test_absence_tier_boundaries() {
        assert_eq!(entitled_days_for_absences(5), 30);
        assert_eq!(entitled_days_for_absences(6), 24);
        assert_eq!(entitled_days_for_absences(14), 24);
        assert_eq!(entitled_days_for_absences(15), 18);
        assert_eq!(entitled_days_for_absences(23), 18);
        assert_eq!(entitled_days_for_absences(24), 12);
        assert_eq!(entitled_days_for_absences(32), 12);
        assert_eq!(entitled_days_for_absences(33), 0);
    }

    #[test]
    fn test_reference_before_admission_is_rejected() {
        let input = VacationAccrualInput::new(date(2024, 6, 1), date(2024, 1, 1));
        match compute_vacation_accrual(&input) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "reference_date"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unordered_leave_is_rejected() {
        let mut input = VacationAccrualInput::new(date(2024, 1, 1), date(2024, 6, 1));
        input.leave_intervals = vec![DateInterval::new(date(2024, 3, 10), date(2024, 3, 1))];
        match compute_vacation_accrual(&input) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "leave_intervals"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_ledger_reports_each_month() {
        let input = VacationAccrualInput::new(date(2024, 1, 10), date(2024, 3, 20));
        let result = compute_vacation_accrual(&input).unwrap();

        let month_entries: Vec<_> = result
            .ledger
            .entries()
            .iter()
            .filter(|e| e.label.starts_with("Month "))
            .collect();
        assert_eq!(month_entries.len(), 3);
        assert_eq!(month_entries[0].label, "Month 2024-01");

        let highlighted: Vec<_> = result.ledger.highlighted().collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].label, "Twelfths available");
        assert_eq!(highlighted[0].value, LedgerValue::Count(3));
    }

    proptest! {
        #[test]
        fn prop_units_follow_the_fifteen_day_rule(
            admission_offset in 0i64..400,
            span in 0i64..500,
            leave_start in 0i64..900,
            leave_len in 0i64..120,
        ) {
            let base = date(2023, 1, 1);
            let admission = base + chrono::Duration::days(admission_offset);
            let reference = admission + chrono::Duration::days(span);
            let leave_from = base + chrono::Duration::days(leave_start);
            let mut input = VacationAccrualInput::new(admission, reference);
            input.leave_intervals = vec![DateInterval::new(
                leave_from,
                leave_from + chrono::Duration::days(leave_len),
            )];

            let result = compute_vacation_accrual(&input).unwrap();
            let outcome = &result.outcome;

            for month in &outcome.months {
                prop_assert!(month.days_worked >= 0);
                let expected = if month.days_worked >= 15 { 1 } else { 0 };
                prop_assert_eq!(month.unit, expected);
            }
            prop_assert!(outcome.accrued_twelfths <= 12);
            prop_assert!(outcome.available_twelfths <= outcome.accrued_twelfths);

            let steps: Vec<u32> = result.ledger.entries().iter().map(|e| e.step).collect();
            let expected: Vec<u32> = (1..=result.ledger.len() as u32).collect();
            prop_assert_eq!(steps, expected);
            prop_assert_eq!(result.ledger.highlighted().count(), 1);
        }
    }
}
