//! Experience contract early termination.
//!
//! Computes the amounts due when an experience contract (contrato de
//! experiência) ends on a date other than the one originally agreed, and
//! attributes the breach to the employer or the employee.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, CalculatorKind, Ledger, LegalBasis};

use super::date_interval::{completed_months, days_between, inclusive_days};
use super::money::{brl, ensure_non_negative, ensure_positive, percent, round_money};

/// Days of notice paid in lieu when the employer ends the contract early.
pub const NOTICE_IN_LIEU_DAYS: u32 = 30;

/// FGTS monthly deposit rate (8%).
pub fn statutory_deposit_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// FGTS penalty rate on employer-initiated termination (40%).
pub fn deposit_penalty_rate() -> Decimal {
    Decimal::new(40, 2)
}

/// Which party broke the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachAttribution {
    /// The contract ended before the planned end date.
    Employer,
    /// The contract ended on or after the planned end date.
    Employee,
}

impl BreachAttribution {
    /// Classifies a termination against the planned end date.
    ///
    /// Every pair of dates yields exactly one attribution.
    pub fn classify(planned_end: NaiveDate, actual_end: NaiveDate) -> Self {
        if actual_end < planned_end {
            BreachAttribution::Employer
        } else {
            BreachAttribution::Employee
        }
    }

    fn describe(self) -> &'static str {
        match self {
            BreachAttribution::Employer => "Breached by employer (terminated before the planned end)",
            BreachAttribution::Employee => "Breached by employee (terminated on or after the planned end)",
        }
    }
}

/// Inputs for [`compute_experience_breach`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBreachInput {
    /// First day of the contract.
    pub start_date: NaiveDate,
    /// Last day originally agreed for the contract.
    pub planned_end_date: NaiveDate,
    /// The day the contract actually ended.
    pub actual_end_date: NaiveDate,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Average variable pay added to the salary.
    #[serde(default)]
    pub average_pay_supplement: Decimal,
}

impl ExperienceBreachInput {
    /// Creates an input with no variable pay supplement.
    pub fn new(
        start_date: NaiveDate,
        planned_end_date: NaiveDate,
        actual_end_date: NaiveDate,
        salary: Decimal,
    ) -> Self {
        Self {
            start_date,
            planned_end_date,
            actual_end_date,
            salary,
            average_pay_supplement: Decimal::ZERO,
        }
    }

    /// Sets the average variable pay supplement.
    pub fn with_supplement(mut self, supplement: Decimal) -> Self {
        self.average_pay_supplement = supplement;
        self
    }

    fn validate(&self) -> EngineResult<()> {
        ensure_positive("salary", self.salary)?;
        ensure_non_negative("average_pay_supplement", self.average_pay_supplement)?;
        if self.planned_end_date < self.start_date {
            return Err(EngineError::invalid_input(
                "planned_end_date",
                "must not be before start_date",
            ));
        }
        if self.actual_end_date < self.start_date {
            return Err(EngineError::invalid_input(
                "actual_end_date",
                "must not be before start_date",
            ));
        }
        Ok(())
    }
}

/// The amounts due on an experience contract termination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceBreachOutcome {
    /// First day of the contract.
    pub start_date: NaiveDate,
    /// Planned last day.
    pub planned_end_date: NaiveDate,
    /// Actual last day.
    pub actual_end_date: NaiveDate,
    /// Length of the contract as agreed, in days.
    pub planned_duration_days: i64,
    /// Days actually worked.
    pub worked_days: i64,
    /// Days between the actual and planned end (negative when late).
    pub days_early: i64,
    /// Party responsible for the breach.
    pub breach: BreachAttribution,
    /// Convenience flag mirroring `breach`.
    pub breached_by_employer: bool,
    /// Salary plus average variable pay.
    pub calculation_base: Decimal,
    /// Notice paid in lieu (zero unless the employer breached).
    pub notice_in_lieu: Decimal,
    /// Whole months worked.
    pub completed_months: u32,
    /// Proportional 13th salary.
    pub thirteenth_salary: Decimal,
    /// Proportional vacation days.
    pub vacation_days: u32,
    /// Value of the proportional vacation days.
    pub vacation_pay: Decimal,
    /// Constitutional one-third vacation bonus.
    pub vacation_one_third: Decimal,
    /// FGTS deposit on the calculation base.
    pub statutory_deposit: Decimal,
    /// FGTS 40% penalty (zero unless the employer breached).
    pub deposit_penalty: Decimal,
    /// Sum of all amounts due.
    pub total: Decimal,
}

/// Calculates the amounts due when an experience contract ends early or late.
///
/// # Arguments
///
/// * `input` - Contract dates, salary and variable pay supplement
///
/// # Returns
///
/// A [`CalculationResult`] with the amounts and a ledger of every step, or
/// `InvalidInput` when the salary is not positive, the supplement is
/// negative, or an end date precedes the start date.
///
/// # Legal Reference
///
/// CLT arts. 479 and 480; Lei 8.036/1990 (FGTS), art. 18.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::{compute_experience_breach, ExperienceBreachInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = ExperienceBreachInput::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
///     Decimal::from(3000),
/// );
///
/// let result = compute_experience_breach(&input).unwrap();
/// assert!(result.outcome.breached_by_employer);
/// assert_eq!(result.outcome.total.to_string(), "3852.67");
/// ```
pub fn compute_experience_breach(
    input: &ExperienceBreachInput,
) -> EngineResult<CalculationResult<ExperienceBreachOutcome>> {
    input.validate()?;

    let mut ledger = Ledger::new();
    let start = input.start_date;
    let planned_end = input.planned_end_date;
    let actual_end = input.actual_end_date;

    ledger.append("Contract start date", None::<String>, start.to_string());
    ledger.append("Planned end date", None::<String>, planned_end.to_string());
    ledger.append("Actual termination date", None::<String>, actual_end.to_string());

    let planned_duration_days = inclusive_days(start, planned_end);
    let worked_days = inclusive_days(start, actual_end);
    let days_early = days_between(actual_end, planned_end);

    ledger.append(
        "Planned contract duration (days)",
        Some(format!("{} - {} + 1", planned_end, start)),
        planned_duration_days,
    );
    ledger.append(
        "Days worked",
        Some(format!("{} - {} + 1", actual_end, start)),
        worked_days,
    );
    ledger.append(
        "Days before planned end",
        Some(format!("{} - {}", planned_end, actual_end)),
        days_early,
    );

    let breach = BreachAttribution::classify(planned_end, actual_end);
    let breached_by_employer = breach == BreachAttribution::Employer;
    ledger.append("Breach attribution", None::<String>, breach.describe());

    let calculation_base = input.salary + input.average_pay_supplement;
    ledger.append(
        "Calculation base",
        Some(format!(
            "{} salary + {} average variable pay",
            brl(input.salary),
            brl(input.average_pay_supplement)
        )),
        round_money(calculation_base),
    );

    let notice_in_lieu = if breached_by_employer {
        calculation_base
    } else {
        Decimal::ZERO
    };
    let notice_formula = if breached_by_employer {
        format!(
            "{} / 30 x {} days",
            brl(calculation_base),
            NOTICE_IN_LIEU_DAYS
        )
    } else {
        "Not due: the employee ended the contract".to_string()
    };
    ledger.append("Notice in lieu", Some(notice_formula), round_money(notice_in_lieu));

    let months = completed_months(start, actual_end);
    ledger.append(
        "Completed months worked",
        Some(format!("whole months from {} to {}", start, actual_end)),
        months,
    );

    let thirteenth_salary = calculation_base / Decimal::from(12) * Decimal::from(months);
    ledger.append(
        "Proportional 13th salary",
        Some(format!("{} / 12 x {}", brl(calculation_base), months)),
        round_money(thirteenth_salary),
    );

    // floor(30 / 12 x m), kept in integers so the floor is exact
    let vacation_days = 30 * months / 12;
    ledger.append(
        "Proportional vacation days",
        Some(format!("floor(30 / 12 x {})", months)),
        vacation_days,
    );

    let vacation_pay = calculation_base / Decimal::from(30) * Decimal::from(vacation_days);
    ledger.append(
        "Proportional vacation pay",
        Some(format!("{} / 30 x {}", brl(calculation_base), vacation_days)),
        round_money(vacation_pay),
    );

    let vacation_one_third = vacation_pay / Decimal::from(3);
    ledger.append(
        "One-third vacation bonus",
        Some(format!("{} / 3", brl(vacation_pay))),
        round_money(vacation_one_third),
    );

    let statutory_deposit = calculation_base * statutory_deposit_rate();
    ledger.append(
        "FGTS deposit",
        Some(format!(
            "{} x {}",
            brl(calculation_base),
            percent(statutory_deposit_rate())
        )),
        round_money(statutory_deposit),
    );

    let deposit_penalty = if breached_by_employer {
        statutory_deposit * deposit_penalty_rate()
    } else {
        Decimal::ZERO
    };
    let penalty_formula = if breached_by_employer {
        format!(
            "{} x {}",
            brl(statutory_deposit),
            percent(deposit_penalty_rate())
        )
    } else {
        "Not due: the employee ended the contract".to_string()
    };
    ledger.append("FGTS penalty", Some(penalty_formula), round_money(deposit_penalty));

    let total = notice_in_lieu
        + thirteenth_salary
        + vacation_pay
        + vacation_one_third
        + statutory_deposit
        + deposit_penalty;
    ledger.append_highlighted(
        "Total due",
        Some("notice + 13th + vacation + 1/3 + FGTS + FGTS penalty"),
        round_money(total),
    );

    let outcome = ExperienceBreachOutcome {
        start_date: start,
        planned_end_date: planned_end,
        actual_end_date: actual_end,
        planned_duration_days,
        worked_days,
        days_early,
        breach,
        breached_by_employer,
        calculation_base: round_money(calculation_base),
        notice_in_lieu: round_money(notice_in_lieu),
        completed_months: months,
        thirteenth_salary: round_money(thirteenth_salary),
        vacation_days,
        vacation_pay: round_money(vacation_pay),
        vacation_one_third: round_money(vacation_one_third),
        statutory_deposit: round_money(statutory_deposit),
        deposit_penalty: round_money(deposit_penalty),
        total: round_money(total),
    };

    Ok(CalculationResult {
        calculator: CalculatorKind::ExperienceBreach,
        outcome,
        ledger,
        legal_basis: LegalBasis::new(
            "Experience contract early termination",
            "CLT, arts. 479 and 480; Lei 8.036/1990, art. 18",
            "When an experience contract ends before its agreed date the employer owes \
             notice in lieu and the 40% FGTS penalty on top of the proportional 13th salary, \
             proportional vacation with its one-third bonus and the FGTS deposit.",
        ),
        notes: Vec::new(),
    })
}
