//! Request types for the settlement engine API.
//!
//! Dates arrive as raw `YYYY-MM-DD` strings and are parsed here, so a
//! malformed date surfaces as an `InvalidInput` error naming the field
//! rather than as a generic JSON error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{ExperienceBreachInput, RiskPeriodInput, VacationAccrualInput};
use crate::error::{EngineError, EngineResult};
use crate::models::{DateInterval, HazardGrade};

/// Request body for `/experience-breach`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceBreachRequest {
    /// First day of the contract.
    pub start_date: String,
    /// Planned last day.
    pub planned_end_date: String,
    /// Actual last day.
    pub actual_end_date: String,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Average variable pay.
    #[serde(default)]
    pub average_pay_supplement: Decimal,
}

/// A leave interval in a vacation accrual request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveIntervalRequest {
    /// First day of leave.
    pub start_date: String,
    /// Last day of leave.
    pub end_date: String,
}

/// Request body for `/vacation-accrual`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationAccrualRequest {
    /// The employee's admission date.
    pub admission_date: String,
    /// Cutoff date for the accrual.
    pub reference_date: String,
    /// Periods of INSS leave.
    #[serde(default)]
    pub leave_intervals: Vec<LeaveIntervalRequest>,
    /// Unjustified absences.
    #[serde(default)]
    pub absences: u32,
    /// Vacation days already taken.
    #[serde(default)]
    pub days_already_taken: u32,
}

/// Request body for `/hazard-premium`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardPremiumRequest {
    /// Monthly base salary.
    pub salary: Decimal,
}

/// Request body for `/unhealthiness-premium`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnhealthinessPremiumRequest {
    /// Grade name; medium when omitted.
    #[serde(default)]
    pub grade: Option<String>,
    /// Date whose minimum wage applies; the latest configured when omitted.
    #[serde(default)]
    pub reference_date: Option<String>,
}

/// Request body for `/risk-period-penalty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPeriodRequest {
    /// The contract's base date.
    pub base_date: String,
    /// The termination date.
    pub termination_date: String,
    /// Monthly base salary.
    pub salary: Decimal,
    /// Average variable pay.
    #[serde(default)]
    pub average_pay_supplement: Decimal,
}

/// Parses a `YYYY-MM-DD` date, naming the field on failure.
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        EngineError::invalid_input(
            field,
            format!("malformed date '{}', expected YYYY-MM-DD", value),
        )
    })
}

impl TryFrom<ExperienceBreachRequest> for ExperienceBreachInput {
    type Error = EngineError;

    fn try_from(req: ExperienceBreachRequest) -> EngineResult<Self> {
        Ok(ExperienceBreachInput::new(
            parse_date("start_date", &req.start_date)?,
            parse_date("planned_end_date", &req.planned_end_date)?,
            parse_date("actual_end_date", &req.actual_end_date)?,
            req.salary,
        )
        .with_supplement(req.average_pay_supplement))
    }
}

impl TryFrom<VacationAccrualRequest> for VacationAccrualInput {
    type Error = EngineError;

    fn try_from(req: VacationAccrualRequest) -> EngineResult<Self> {
        let leave_intervals = req
            .leave_intervals
            .iter()
            .map(|leave| {
                Ok(DateInterval::new(
                    parse_date("leave_intervals.start_date", &leave.start_date)?,
                    parse_date("leave_intervals.end_date", &leave.end_date)?,
                ))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        Ok(VacationAccrualInput {
            admission_date: parse_date("admission_date", &req.admission_date)?,
            reference_date: parse_date("reference_date", &req.reference_date)?,
            leave_intervals,
            absences: req.absences,
            days_already_taken: req.days_already_taken,
        })
    }
}

impl TryFrom<RiskPeriodRequest> for RiskPeriodInput {
    type Error = EngineError;

    fn try_from(req: RiskPeriodRequest) -> EngineResult<Self> {
        Ok(RiskPeriodInput::new(
            parse_date("base_date", &req.base_date)?,
            parse_date("termination_date", &req.termination_date)?,
            req.salary,
        )
        .with_supplement(req.average_pay_supplement))
    }
}

impl UnhealthinessPremiumRequest {
    /// The requested grade, falling back to medium when none was given.
    pub fn grade(&self) -> EngineResult<HazardGrade> {
        match &self.grade {
            Some(grade) => grade.parse(),
            None => Ok(HazardGrade::Medium),
        }
    }

    /// The parsed reference date, if one was given.
    pub fn reference_date(&self) -> EngineResult<Option<NaiveDate>> {
        self.reference_date
            .as_deref()
            .map(|date| parse_date("reference_date", date))
            .transpose()
    }
}
