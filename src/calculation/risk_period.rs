//! Termination inside the risk window.
//!
//! A termination that falls within 30 days of the contract's base date
//! triggers a penalty of half the calculation base. The window end is
//! inclusive.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationResult, CalculatorKind, DateInterval, Ledger, LegalBasis};

use super::date_interval::{completed_months, fractional_months, inclusive_days};
use super::money::{brl, ensure_non_negative, ensure_positive, percent, round_money};

/// Length of the risk window after the base date, in days.
pub const RISK_WINDOW_DAYS: i64 = 30;

/// Penalty rate for a termination inside the risk window (50%).
pub fn risk_period_penalty_rate() -> Decimal {
    Decimal::new(50, 2)
}

/// Whether the termination fell inside the risk window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWindowStatus {
    /// Terminated on or before the window end.
    Inside,
    /// Terminated after the window closed.
    Closed,
}

impl RiskWindowStatus {
    /// Classifies a termination date against the risk window (inclusive).
    pub fn classify(window: &DateInterval, termination: NaiveDate) -> Self {
        if window.contains(termination) {
            RiskWindowStatus::Inside
        } else {
            RiskWindowStatus::Closed
        }
    }
}

/// Inputs for [`compute_risk_period_penalty`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPeriodInput {
    /// The contract's base date.
    pub base_date: NaiveDate,
    /// The termination date.
    pub termination_date: NaiveDate,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Average variable pay added to the salary.
    #[serde(default)]
    pub average_pay_supplement: Decimal,
}

impl RiskPeriodInput {
    /// Creates an input with no variable pay supplement.
    pub fn new(base_date: NaiveDate, termination_date: NaiveDate, salary: Decimal) -> Self {
        Self {
            base_date,
            termination_date,
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
        if self.termination_date < self.base_date {
            return Err(EngineError::invalid_input(
                "termination_date",
                "must not be before base_date",
            ));
        }
        Ok(())
    }

    /// The window from the base date through its last day.
    fn risk_window(&self) -> EngineResult<DateInterval> {
        let window_end = self
            .base_date
            .checked_add_signed(Duration::days(RISK_WINDOW_DAYS))
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "base_date",
                    format!("risk window would end after {}", NaiveDate::MAX),
                )
            })?;
        Ok(DateInterval::new(self.base_date, window_end))
    }
}

/// The result of a risk-period evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPeriodOutcome {
    /// The contract's base date.
    pub base_date: NaiveDate,
    /// The termination date.
    pub termination_date: NaiveDate,
    /// Days from base date to termination, inclusive.
    pub worked_days: i64,
    /// Whole months from base date to termination.
    pub worked_months: u32,
    /// Months including the running fraction, to four places.
    pub fractional_months: Decimal,
    /// Last day of the risk window.
    pub risk_window_end: NaiveDate,
    /// Inside or after the window.
    pub window_status: RiskWindowStatus,
    /// Convenience flag mirroring `window_status`.
    pub in_risk_window: bool,
    /// Salary plus average variable pay.
    pub calculation_base: Decimal,
    /// Penalty due (zero outside the window).
    pub penalty: Decimal,
}

/// Evaluates whether a termination owes the risk-period penalty.
///
/// # Arguments
///
/// * `input` - Base date, termination date, salary and supplement
///
/// # Returns
///
/// A [`CalculationResult`] with the window classification and penalty, or
/// `InvalidInput` when the salary is not positive, the supplement is
/// negative, or termination precedes the base date.
///
/// # Legal Reference
///
/// CLT art. 477.
///
/// # Example
///
/// ```
/// use settlement_engine::calculation::{compute_risk_period_penalty, RiskPeriodInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = RiskPeriodInput::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     Decimal::from(2000),
/// );
/// let result = compute_risk_period_penalty(&input).unwrap();
/// assert!(result.outcome.in_risk_window);
/// assert_eq!(result.outcome.penalty.to_string(), "1000.00");
/// ```
pub fn compute_risk_period_penalty(
    input: &RiskPeriodInput,
) -> EngineResult<CalculationResult<RiskPeriodOutcome>> {
    input.validate()?;
    let risk_window = input.risk_window()?;

    let mut ledger = Ledger::new();
    let base_date = input.base_date;
    let termination = input.termination_date;

    ledger.append("Base date", None::<String>, base_date.to_string());
    ledger.append("Termination date", None::<String>, termination.to_string());

    let worked_days = inclusive_days(base_date, termination);
    ledger.append(
        "Days worked since base date",
        Some(format!("{} - {} + 1", termination, base_date)),
        worked_days,
    );

    let worked_months = completed_months(base_date, termination);
    let months_with_fraction = fractional_months(base_date, termination).round_dp(4);
    ledger.append(
        "Months worked since base date",
        Some(format!("{} including the running month", months_with_fraction.normalize())),
        worked_months,
    );

    let risk_window_end = risk_window.end;
    ledger.append(
        "Risk window end",
        Some(format!("{} + {} days", base_date, RISK_WINDOW_DAYS)),
        risk_window_end.to_string(),
    );

    let window_status = RiskWindowStatus::classify(&risk_window, termination);
    let in_risk_window = window_status == RiskWindowStatus::Inside;
    ledger.append(
        "Termination inside risk window",
        Some(format!("{} <= {}", termination, risk_window_end)),
        if in_risk_window { "Yes" } else { "No" },
    );

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

    let penalty = match window_status {
        RiskWindowStatus::Inside => {
            let penalty = calculation_base * risk_period_penalty_rate();
            ledger.append_highlighted(
                "Art. 477 penalty",
                Some(format!(
                    "{} x {}",
                    brl(calculation_base),
                    percent(risk_period_penalty_rate())
                )),
                round_money(penalty),
            );
            penalty
        }
        RiskWindowStatus::Closed => {
            ledger.append_highlighted(
                "Art. 477 penalty",
                Some(format!(
                    "Not due: the risk window closed on {}",
                    risk_window_end
                )),
                round_money(Decimal::ZERO),
            );
            Decimal::ZERO
        }
    };

    let outcome = RiskPeriodOutcome {
        base_date,
        termination_date: termination,
        worked_days,
        worked_months,
        fractional_months: months_with_fraction,
        risk_window_end,
        window_status,
        in_risk_window,
        calculation_base: round_money(calculation_base),
        penalty: round_money(penalty),
    };

    Ok(CalculationResult {
        calculator: CalculatorKind::RiskPeriodPenalty,
        outcome,
        ledger,
        legal_basis: LegalBasis::new(
            "Risk period termination penalty",
            "CLT, art. 477",
            "A dismissal within 30 days after the base date is penalised with half of \
             the calculation base, salary plus average variable pay.",
        ),
        notes: Vec::new(),
    })
}
